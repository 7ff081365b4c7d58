//! Library crate holding the numeric side of the forecaster.
//!
//! Models take a [`FeatureMatrix`] (one row per sample) and produce one row
//! of predictions per sample. Loading models from disk lives in the runtime
//! crate.

pub mod error;
pub mod matrix;
pub mod model;

pub use error::{ModelError, Result};
pub use matrix::{to_rows, FeatureMatrix};
pub use model::{LinearModel, Predict};
