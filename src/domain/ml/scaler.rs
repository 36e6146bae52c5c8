use crate::domain::errors::ModelPackageError;
use serde::{Deserialize, Serialize};

/// Per-feature affine transform fitted at training time: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Mean 0, scale 1 for every column.
    pub fn identity(width: usize) -> Self {
        Self {
            mean: vec![0.0; width],
            scale: vec![1.0; width],
        }
    }

    pub fn validate(&self, width: usize) -> Result<(), ModelPackageError> {
        if self.mean.len() != width {
            return Err(ModelPackageError::ScalerDimension {
                field: "mean",
                actual: self.mean.len(),
                expected: width,
            });
        }
        if self.scale.len() != width {
            return Err(ModelPackageError::ScalerDimension {
                field: "scale",
                actual: self.scale.len(),
                expected: width,
            });
        }
        if let Some((index, &value)) = self
            .scale
            .iter()
            .enumerate()
            .find(|(_, s)| !s.is_finite() || **s == 0.0)
        {
            return Err(ModelPackageError::InvalidScale { index, value });
        }
        Ok(())
    }

    /// Assumes `validate` passed for `values.len()`.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect()
    }
}
