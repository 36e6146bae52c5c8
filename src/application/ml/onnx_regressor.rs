use crate::domain::errors::PredictionError;
use crate::domain::ml::regressor::Regressor;
use anyhow::{Context, Result};
use ort::session::Session;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Regressor exported to ONNX (e.g. gradient boosting via skl2onnx).
/// Input is a single `[1, n_features]` f32 tensor, the first output value is
/// the prediction.
pub struct OnnxRegressor {
    // `Session::run` needs exclusive access.
    session: Mutex<Session>,
}

impl OnnxRegressor {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("ONNX model file not found at {:?}", path);
        }
        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(path)
            .with_context(|| format!("Failed to load ONNX model {:?}", path))?;
        info!("Loaded ONNX model from {:?}", path);
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError> {
        let kind = self.kind();
        let mut session = self
            .session
            .lock()
            .map_err(|e| PredictionError::inference(kind, format!("Mutex lock failed: {}", e)))?;

        let data: Vec<f32> = row.iter().map(|&v| v as f32).collect();
        let shape = vec![1, row.len()];
        let input_value = ort::value::Value::from_array((shape.as_slice(), data))
            .map_err(|e| PredictionError::inference(kind, format!("Input value creation failed: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_value])
            .map_err(|e| PredictionError::inference(kind, e.to_string()))?;

        let output_value = outputs
            .iter()
            .next()
            .map(|(_, v)| v)
            .ok_or_else(|| PredictionError::inference(kind, "No output found"))?;
        let tensor = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictionError::inference(kind, e.to_string()))?;
        tensor
            .1
            .iter()
            .next()
            .map(|&v| v as f64)
            .ok_or_else(|| PredictionError::inference(kind, "Empty output"))
    }

    fn kind(&self) -> &str {
        "onnx"
    }
}
