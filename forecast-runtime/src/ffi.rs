use super::Forecaster;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::path::PathBuf;

pub const FORECAST_OK: c_int = 0;
pub const FORECAST_NULL_POINTER: c_int = -1;
pub const FORECAST_PREDICT_FAILED: c_int = -2;
pub const FORECAST_BAD_ARGS: c_int = -3;
pub const FORECAST_OUT_TOO_SMALL: c_int = -4;

/// Load a model artifact. Returns null if the path is null or the artifact
/// cannot be loaded.
#[no_mangle]
pub extern "C" fn forecast_load(model_path: *const c_char) -> *mut Forecaster {
    if model_path.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(model_path) };
    let path = PathBuf::from(c_str.to_string_lossy().into_owned());
    match Forecaster::load(&path) {
        Ok(forecaster) => Box::into_raw(Box::new(forecaster)),
        Err(err) => {
            log::debug!("forecast_load failed: {}", err);
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
pub extern "C" fn forecast_n_features(handle: *const Forecaster) -> usize {
    if handle.is_null() {
        return 0;
    }
    let forecaster = unsafe { &*handle };
    forecaster.n_features()
}

#[no_mangle]
pub extern "C" fn forecast_n_targets(handle: *const Forecaster) -> usize {
    if handle.is_null() {
        return 0;
    }
    let forecaster = unsafe { &*handle };
    forecaster.n_targets()
}

/// Predict `rows` samples of `cols` features each, laid out row-major in
/// `data`. Up to `out_cap` values are written to `out`; the number of values
/// produced is stored in `out_len`, also when `out` is too small, so the
/// caller can retry with a larger buffer.
#[no_mangle]
pub extern "C" fn forecast_predict(
    handle: *const Forecaster,
    data: *const f64,
    rows: usize,
    cols: usize,
    out: *mut f64,
    out_cap: usize,
    out_len: *mut usize,
) -> c_int {
    if handle.is_null() || out_len.is_null() || (rows > 0 && (data.is_null() || out.is_null())) {
        return FORECAST_NULL_POINTER;
    }
    // slices may not span more than isize::MAX bytes
    let n_values = match rows.checked_mul(cols) {
        Some(n) if n <= isize::MAX as usize / std::mem::size_of::<f64>() => n,
        _ => return FORECAST_BAD_ARGS,
    };
    if rows > 0 && cols == 0 {
        return FORECAST_BAD_ARGS;
    }
    let forecaster = unsafe { &*handle };
    let input: Vec<Vec<f64>> = if rows == 0 {
        Vec::new()
    } else {
        let flat = unsafe { std::slice::from_raw_parts(data, n_values) };
        flat.chunks_exact(cols).map(|chunk| chunk.to_vec()).collect()
    };
    let predictions = match forecaster.predict_from_input(&input) {
        Ok(p) => p,
        Err(err) => {
            log::debug!("forecast_predict failed: {}", err);
            return FORECAST_PREDICT_FAILED;
        }
    };
    let flat: Vec<f64> = predictions.into_iter().flatten().collect();
    unsafe {
        *out_len = flat.len();
    }
    if flat.len() > out_cap {
        return FORECAST_OUT_TOO_SMALL;
    }
    if !flat.is_empty() {
        unsafe { std::ptr::copy_nonoverlapping(flat.as_ptr(), out, flat.len()) };
    }
    FORECAST_OK
}

#[no_mangle]
pub extern "C" fn forecast_free(handle: *mut Forecaster) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)); }
    }
}
