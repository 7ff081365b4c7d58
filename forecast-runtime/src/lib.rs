//! Loads a trained model artifact once and serves predictions from it.
//!
//! Build one [`Forecaster`] at startup and pass it (or a reference to it) to
//! whatever needs predictions. A load failure is meant to stop the process
//! before any prediction is attempted.

use forecast_model::{to_rows, FeatureMatrix, LinearModel, ModelError, Predict};
use std::path::Path;

pub mod artifact;
pub mod cli;
pub mod ffi;
pub mod input;

pub use artifact::{ArtifactError, ModelArtifact};
pub use ffi::*;

/// Relative path the model artifact is read from unless told otherwise.
pub const DEFAULT_MODEL_PATH: &str = "ml/model.bin";

/// Holds a loaded model, read-only for its whole lifetime.
pub struct Forecaster<M = LinearModel> {
    model: M,
}

impl Forecaster<LinearModel> {
    /// Read the artifact at `path`, preferring a memory-mapped read.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact = read_artifact(
            path,
            || ModelArtifact::load_mmap(path),
            || ModelArtifact::load(path),
        )?;
        log::debug!(
            "loaded model from {}: {} features, {} targets",
            path.display(),
            artifact.model.n_features(),
            artifact.model.n_targets()
        );
        Ok(Self::new(artifact.model))
    }
}

/// Try the mapped read first. Only an I/O failure falls back to a plain
/// read; a format error is final.
fn read_artifact<F, G>(path: &Path, mapped: F, plain: G) -> Result<ModelArtifact, ArtifactError>
where
    F: FnOnce() -> Result<ModelArtifact, ArtifactError>,
    G: FnOnce() -> Result<ModelArtifact, ArtifactError>,
{
    match mapped() {
        Err(ArtifactError::Io(err)) => {
            log::debug!("mmap of {} failed ({}), reading instead", path.display(), err);
            plain()
        }
        other => other,
    }
}

impl<M: Predict> Forecaster<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    pub fn n_targets(&self) -> usize {
        self.model.n_targets()
    }

    /// Turn rows of feature values into rows of predictions.
    ///
    /// Every row must carry exactly [`n_features`](Self::n_features) values.
    /// An empty input gives an empty output. Errors from the model come back
    /// as-is.
    pub fn predict_from_input(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ModelError> {
        log::debug!("predicting {} rows", data.len());
        let x = FeatureMatrix::from_rows(data, self.model.n_features())?;
        let y = self.model.predict(&x)?;
        Ok(to_rows(&y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sample() -> ModelArtifact {
        ModelArtifact::new(LinearModel::random(2, 1).unwrap())
    }

    #[test]
    fn test_io_error_falls_back_to_plain_read() {
        let plain_reads = Cell::new(0);
        let res = read_artifact(
            Path::new("ml/model.bin"),
            || Err(std::io::Error::new(std::io::ErrorKind::Unsupported, "no mmap").into()),
            || {
                plain_reads.set(plain_reads.get() + 1);
                Ok(sample())
            },
        );
        assert!(res.is_ok());
        assert_eq!(plain_reads.get(), 1);
    }

    #[test]
    fn test_format_error_not_retried() {
        let plain_reads = Cell::new(0);
        let res = read_artifact(
            Path::new("ml/model.bin"),
            || Err(ArtifactError::BadMagic(*b"PKL\0")),
            || {
                plain_reads.set(plain_reads.get() + 1);
                Ok(sample())
            },
        );
        assert!(matches!(res, Err(ArtifactError::BadMagic(_))));
        assert_eq!(plain_reads.get(), 0);
    }

    #[test]
    fn test_mapped_success_skips_plain_read() {
        let plain_reads = Cell::new(0);
        let res = read_artifact(
            Path::new("ml/model.bin"),
            || Ok(sample()),
            || {
                plain_reads.set(plain_reads.get() + 1);
                Ok(sample())
            },
        );
        assert!(res.is_ok());
        assert_eq!(plain_reads.get(), 0);
    }
}
