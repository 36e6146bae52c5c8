use crate::domain::errors::PredictionError;

/// Interface for a fitted base model of the ensemble
pub trait Regressor: Send + Sync {
    /// Score one already-scaled feature row
    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError>;

    /// Number of inputs the model was fitted on, when it can tell
    fn input_width(&self) -> Option<usize> {
        None
    }

    /// Get model name/type
    fn kind(&self) -> &str;
}
