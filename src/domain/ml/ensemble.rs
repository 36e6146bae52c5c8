use super::regressor::Regressor;
use crate::domain::errors::PredictionError;

/// A base model with the name it was registered under in the bundle.
pub struct NamedModel {
    pub name: String,
    pub model: Box<dyn Regressor>,
}

impl NamedModel {
    pub fn new(name: impl Into<String>, model: Box<dyn Regressor>) -> Self {
        Self {
            name: name.into(),
            model,
        }
    }
}

impl std::fmt::Debug for NamedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedModel")
            .field("name", &self.name)
            .field("kind", &self.model.kind())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelContribution {
    pub name: String,
    pub output: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnsemblePrediction {
    pub value: f64,
    pub contributions: Vec<ModelContribution>,
}

impl EnsemblePrediction {
    pub fn weights(&self) -> Vec<f64> {
        self.contributions.iter().map(|c| c.weight).collect()
    }
}

/// `Σ weight_i * output_i` in model order. Weights are applied as given,
/// they are not renormalized and need not sum to one.
///
/// Callers guarantee `models.len() == weights.len()`.
pub fn weighted_sum(
    models: &[NamedModel],
    weights: &[f64],
    row: &[f64],
) -> Result<EnsemblePrediction, PredictionError> {
    let mut value = 0.0;
    let mut contributions = Vec::with_capacity(models.len());

    for (entry, &weight) in models.iter().zip(weights) {
        let output = entry.model.predict(row)?;
        if !output.is_finite() {
            return Err(PredictionError::inference(
                &entry.name,
                format!("non-finite output {}", output),
            ));
        }
        value += weight * output;
        contributions.push(ModelContribution {
            name: entry.name.clone(),
            output,
            weight,
        });
    }

    Ok(EnsemblePrediction {
        value,
        contributions,
    })
}
