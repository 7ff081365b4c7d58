use forecast_model::LinearModel;
use forecast_runtime::*;
use ndarray::array;
use std::ffi::CString;
use tempfile::NamedTempFile;

#[test]
fn ffi_load_predict_free() {
    let model = LinearModel::new(array![[1.0, 1.0], [2.0, 0.0]], array![0.5, 0.0]).unwrap();
    let tmp = NamedTempFile::new().unwrap();
    ModelArtifact::new(model).save(tmp.path()).unwrap();

    let path = CString::new(tmp.path().to_str().unwrap()).unwrap();
    let handle = forecast_load(path.as_ptr());
    assert!(!handle.is_null());
    assert_eq!(forecast_n_features(handle), 2);
    assert_eq!(forecast_n_targets(handle), 2);

    let data = [1.0, 2.0, 3.0, 4.0];
    let mut out = [0.0f64; 4];
    let mut out_len = 0usize;
    let rc = forecast_predict(handle, data.as_ptr(), 2, 2, out.as_mut_ptr(), out.len(), &mut out_len);
    assert_eq!(rc, FORECAST_OK);
    assert_eq!(out_len, 4);
    assert_eq!(out, [3.5, 2.0, 7.5, 6.0]);

    let rc = forecast_predict(handle, data.as_ptr(), 1, 3, out.as_mut_ptr(), out.len(), &mut out_len);
    assert_eq!(rc, FORECAST_PREDICT_FAILED);

    forecast_free(handle);
}

#[test]
fn ffi_empty_input() {
    let tmp = NamedTempFile::new().unwrap();
    ModelArtifact::new(LinearModel::random(3, 1).unwrap()).save(tmp.path()).unwrap();
    let path = CString::new(tmp.path().to_str().unwrap()).unwrap();
    let handle = forecast_load(path.as_ptr());
    assert!(!handle.is_null());

    let mut out_len = 99usize;
    let rc = forecast_predict(handle, std::ptr::null(), 0, 3, std::ptr::null_mut(), 0, &mut out_len);
    assert_eq!(rc, FORECAST_OK);
    assert_eq!(out_len, 0);
    forecast_free(handle);
}

#[test]
fn ffi_null_and_missing() {
    assert!(forecast_load(std::ptr::null()).is_null());
    let missing = CString::new("/nonexistent/ml/model.bin").unwrap();
    assert!(forecast_load(missing.as_ptr()).is_null());

    let mut out_len = 0usize;
    let rc = forecast_predict(
        std::ptr::null(),
        std::ptr::null(),
        1,
        1,
        std::ptr::null_mut(),
        0,
        &mut out_len,
    );
    assert_eq!(rc, FORECAST_NULL_POINTER);
    assert_eq!(forecast_n_features(std::ptr::null()), 0);
    forecast_free(std::ptr::null_mut());
}

fn load_linear(model: LinearModel) -> (NamedTempFile, *mut Forecaster) {
    let tmp = NamedTempFile::new().unwrap();
    ModelArtifact::new(model).save(tmp.path()).unwrap();
    let path = CString::new(tmp.path().to_str().unwrap()).unwrap();
    let handle = forecast_load(path.as_ptr());
    assert!(!handle.is_null());
    (tmp, handle)
}

#[test]
fn ffi_overflowing_shape_rejected() {
    let (_tmp, handle) = load_linear(LinearModel::random(2, 1).unwrap());
    let data = [1.0, 2.0];
    let mut out = [0.0f64; 2];
    let mut out_len = 0usize;

    let rc = forecast_predict(
        handle,
        data.as_ptr(),
        usize::MAX / 2 + 1,
        2,
        out.as_mut_ptr(),
        out.len(),
        &mut out_len,
    );
    assert_eq!(rc, FORECAST_BAD_ARGS);

    // fits in usize but not in an addressable slice
    let rc = forecast_predict(handle, data.as_ptr(), usize::MAX / 4, 2, out.as_mut_ptr(), out.len(), &mut out_len);
    assert_eq!(rc, FORECAST_BAD_ARGS);

    let rc = forecast_predict(handle, data.as_ptr(), 3, 0, out.as_mut_ptr(), out.len(), &mut out_len);
    assert_eq!(rc, FORECAST_BAD_ARGS);
    forecast_free(handle);
}

#[test]
fn ffi_output_buffer_too_small() {
    let model = LinearModel::new(array![[1.0, 0.0], [0.0, 1.0]], array![0.0, 0.0]).unwrap();
    let (_tmp, handle) = load_linear(model);
    let data = [1.0, 2.0, 3.0, 4.0];
    let mut out = [-1.0f64; 4];
    let mut out_len = 0usize;

    let rc = forecast_predict(handle, data.as_ptr(), 2, 2, out.as_mut_ptr(), 3, &mut out_len);
    assert_eq!(rc, FORECAST_OUT_TOO_SMALL);
    assert_eq!(out_len, 4);
    assert_eq!(out, [-1.0; 4]);

    let rc = forecast_predict(handle, data.as_ptr(), 2, 2, out.as_mut_ptr(), 4, &mut out_len);
    assert_eq!(rc, FORECAST_OK);
    assert_eq!(out, [1.0, 2.0, 3.0, 4.0]);
    forecast_free(handle);
}
