use super::ensemble::{EnsemblePrediction, NamedModel, weighted_sum};
use super::feature_registry::{FeatureArray, FeatureLayout};
use super::scaler::StandardScaler;
use crate::domain::errors::{ModelPackageError, PredictionError};

/// Fitted ensemble bundle. Built once at startup, read-only afterwards.
///
/// Construction validates everything that could otherwise fail per request:
/// every column resolves to a known feature, the scaler and the models match
/// the column count, and there is exactly one weight per base model.
#[derive(Debug)]
pub struct ModelPackage {
    layout: FeatureLayout,
    scaler: StandardScaler,
    base_models: Vec<NamedModel>,
    weights: Vec<f64>,
}

impl ModelPackage {
    pub fn new<S: AsRef<str>>(
        feature_columns: &[S],
        scaler: StandardScaler,
        base_models: Vec<NamedModel>,
        weights: Vec<f64>,
    ) -> Result<Self, ModelPackageError> {
        let layout = FeatureLayout::resolve(feature_columns)?;
        Self::with_layout(layout, scaler, base_models, weights)
    }

    pub fn with_layout(
        layout: FeatureLayout,
        scaler: StandardScaler,
        base_models: Vec<NamedModel>,
        weights: Vec<f64>,
    ) -> Result<Self, ModelPackageError> {
        if base_models.is_empty() {
            return Err(ModelPackageError::NoBaseModels);
        }
        if weights.len() != base_models.len() {
            return Err(ModelPackageError::WeightCountMismatch {
                weights: weights.len(),
                models: base_models.len(),
            });
        }
        scaler.validate(layout.len())?;
        for entry in &base_models {
            if let Some(width) = entry.model.input_width()
                && width != layout.len()
            {
                return Err(ModelPackageError::ModelDimension {
                    model: entry.name.clone(),
                    actual: width,
                    expected: layout.len(),
                });
            }
        }

        Ok(Self {
            layout,
            scaler,
            base_models,
            weights,
        })
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.base_models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Project onto the package's column order, scale, then combine.
    pub fn score(&self, features: &FeatureArray) -> Result<EnsemblePrediction, PredictionError> {
        let row = self.layout.project(features);
        let scaled = self.scaler.transform(&row);
        weighted_sum(&self.base_models, &self.weights, &scaled)
    }
}
