//! Dense feature matrix handed to models.

use ndarray::{Array2, ArrayView2};

use crate::error::{ModelError, Result};

/// Samples as rows, features as columns.
///
/// The column count is fixed at construction. Rows that do not match it are
/// rejected rather than truncated or padded.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    data: Array2<f64>,
}

impl FeatureMatrix {
    /// Build a matrix from nested rows, requiring every row to hold exactly
    /// `n_features` values. An empty slice gives a `0 x n_features` matrix.
    pub fn from_rows(rows: &[Vec<f64>], n_features: usize) -> Result<Self> {
        let mut flat = Vec::with_capacity(rows.len() * n_features);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n_features {
                return Err(ModelError::FeatureMismatch {
                    row,
                    expected: n_features,
                    found: values.len(),
                });
            }
            flat.extend_from_slice(values);
        }
        let data = Array2::from_shape_vec((rows.len(), n_features), flat)?;
        Ok(Self { data })
    }

    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }
}

/// Flatten a prediction array back into plain nested vectors, one per row.
pub fn to_rows(predictions: &Array2<f64>) -> Vec<Vec<f64>> {
    predictions.outer_iter().map(|row| row.to_vec()).collect()
}
