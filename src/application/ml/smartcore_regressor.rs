use crate::domain::errors::PredictionError;
use crate::domain::ml::regressor::Regressor;
use anyhow::{Context, Result};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Random forest fitted with smartcore and serialized with serde_json.
pub struct SmartCoreRegressor {
    model: ForestModel,
}

impl SmartCoreRegressor {
    pub fn new(model: ForestModel) -> Self {
        Self { model }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open forest model {:?}", path))?;
        let model: ForestModel = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to deserialize forest model {:?}", path))?;
        info!("Loaded random forest from {:?}", path);
        Ok(Self { model })
    }
}

impl Regressor for SmartCoreRegressor {
    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError> {
        let input_matrix = DenseMatrix::from_2d_vec(&vec![row.to_vec()])
            .map_err(|e| PredictionError::inference(self.kind(), format!("Matrix creation failed: {}", e)))?;

        let predictions = self
            .model
            .predict(&input_matrix)
            .map_err(|e| PredictionError::inference(self.kind(), format!("Prediction failed: {}", e)))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::inference(self.kind(), "No prediction returned"))
    }

    fn kind(&self) -> &str {
        "random_forest"
    }
}
