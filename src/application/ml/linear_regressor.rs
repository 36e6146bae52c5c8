use crate::domain::errors::PredictionError;
use crate::domain::ml::regressor::Regressor;

/// Linear model stored inline in the bundle (ridge, lasso, plain OLS all
/// reduce to this at inference time).
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError> {
        if row.len() != self.coefficients.len() {
            return Err(PredictionError::inference(
                self.kind(),
                format!(
                    "expected {} inputs, got {}",
                    self.coefficients.len(),
                    row.len()
                ),
            ));
        }
        let dot: f64 = self.coefficients.iter().zip(row).map(|(c, x)| c * x).sum();
        Ok(dot + self.intercept)
    }

    fn input_width(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn kind(&self) -> &str {
        "linear"
    }
}
