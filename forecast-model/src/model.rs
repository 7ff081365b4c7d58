use ndarray::{Array1, Array2, Axis};
use rand::Rng;

use crate::error::{ModelError, Result};
use crate::matrix::FeatureMatrix;

/// The one capability a loaded model must offer.
pub trait Predict {
    /// Number of columns each input row must have.
    fn n_features(&self) -> usize;

    /// Number of values produced per input row.
    fn n_targets(&self) -> usize;

    /// Predict one output row per input row, giving a
    /// `n_samples x n_targets` array.
    fn predict(&self, x: &FeatureMatrix) -> Result<Array2<f64>>;
}

/// Linear regressor: `y = x · Wᵀ + b`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearModel {
    coefficients: Array2<f64>, // n_targets x n_features
    intercepts: Array1<f64>,   // n_targets
}

impl LinearModel {
    /// Build a model from its weights. `coefficients` has one row per target.
    pub fn new(coefficients: Array2<f64>, intercepts: Array1<f64>) -> Result<Self> {
        if coefficients.nrows() == 0 || coefficients.ncols() == 0 {
            return Err(ModelError::InvalidModel(format!(
                "coefficient matrix must be non-empty, got {}x{}",
                coefficients.nrows(),
                coefficients.ncols()
            )));
        }
        if coefficients.nrows() != intercepts.len() {
            return Err(ModelError::InvalidModel(format!(
                "{} coefficient rows but {} intercepts",
                coefficients.nrows(),
                intercepts.len()
            )));
        }
        Ok(Self { coefficients, intercepts })
    }

    /// Randomly initialised weights in `[-0.1, 0.1)`, for demo artifacts.
    pub fn random(n_features: usize, n_targets: usize) -> Result<Self> {
        let mut rng = rand::thread_rng();
        let coefficients =
            Array2::from_shape_fn((n_targets, n_features), |_| rng.gen_range(-0.1..0.1));
        let intercepts = Array1::from_shape_fn(n_targets, |_| rng.gen_range(-0.1..0.1));
        Self::new(coefficients, intercepts)
    }

    pub fn coefficients(&self) -> &Array2<f64> {
        &self.coefficients
    }

    pub fn intercepts(&self) -> &Array1<f64> {
        &self.intercepts
    }
}

impl Predict for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.ncols()
    }

    fn n_targets(&self) -> usize {
        self.coefficients.nrows()
    }

    fn predict(&self, x: &FeatureMatrix) -> Result<Array2<f64>> {
        // ndarray panics on a dot product with mismatched inner dimensions
        if x.n_features() != self.n_features() {
            return Err(ModelError::FeatureMismatch {
                row: 0,
                expected: self.n_features(),
                found: x.n_features(),
            });
        }
        let mut y = x.view().dot(&self.coefficients.t());
        y += &self.intercepts.view().insert_axis(Axis(0));
        Ok(y)
    }
}
