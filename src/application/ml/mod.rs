pub mod linear_regressor;
pub mod onnx_regressor;
pub mod prediction_service;
pub mod smartcore_regressor;

pub use prediction_service::{PredictionResult, PredictionService};
