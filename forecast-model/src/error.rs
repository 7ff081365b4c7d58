use thiserror::Error;

/// Errors raised while shaping input or running a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("row {row} has {found} features, model expects {expected}")]
    FeatureMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid array shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("invalid model: {0}")]
    InvalidModel(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
