use thiserror::Error;

/// Errors raised while serving a single prediction request
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("Invalid voucher_date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Model '{model}' failed: {reason}")]
    Inference { model: String, reason: String },
}

impl PredictionError {
    /// True when the failure comes from missing prediction capability rather
    /// than from computing this particular request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, PredictionError::ModelUnavailable)
    }

    pub fn inference(model: &str, reason: impl Into<String>) -> Self {
        PredictionError::Inference {
            model: model.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors related to loading and validating the ensemble model bundle
#[derive(Debug, Error)]
pub enum ModelPackageError {
    #[error("Unknown feature column '{name}' at position {position}")]
    UnknownFeature { name: String, position: usize },

    #[error("Model package has no base models")]
    NoBaseModels,

    #[error("Weight count mismatch: {weights} weights for {models} base models")]
    WeightCountMismatch { weights: usize, models: usize },

    #[error("Scaler {field} has {actual} entries, expected {expected}")]
    ScalerDimension {
        field: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("Scaler scale at index {index} is not usable: {value}")]
    InvalidScale { index: usize, value: f64 },

    #[error("Base model '{model}' expects {actual} inputs, package provides {expected}")]
    ModelDimension {
        model: String,
        actual: usize,
        expected: usize,
    },

    #[error("Failed to load base model '{model}': {reason}")]
    ModelLoad { model: String, reason: String },
}
