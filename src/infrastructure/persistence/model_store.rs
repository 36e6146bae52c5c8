//! Loading of the ensemble model bundle from disk.
//!
//! The bundle is a JSON document. Linear models are stored inline; forest
//! and ONNX models are separate files referenced relative to the bundle.

use crate::application::ml::linear_regressor::LinearRegressor;
use crate::application::ml::onnx_regressor::OnnxRegressor;
use crate::application::ml::smartcore_regressor::SmartCoreRegressor;
use crate::domain::errors::ModelPackageError;
use crate::domain::ml::ensemble::NamedModel;
use crate::domain::ml::model_package::ModelPackage;
use crate::domain::ml::regressor::Regressor;
use crate::domain::ml::scaler::StandardScaler;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaseModelKind {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        path: PathBuf,
    },
    Onnx {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseModelEntry {
    pub name: String,
    #[serde(flatten)]
    pub kind: BaseModelKind,
}

/// On-disk shape of the bundle. `base_models` is a list so that the
/// pairing with `weights` is positional and explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub feature_columns: Vec<String>,
    pub scaler: StandardScaler,
    pub base_models: Vec<BaseModelEntry>,
    pub weights: Vec<f64>,
}

impl ModelBundle {
    /// Builds the runtime package; relative model paths resolve against `base_dir`.
    pub fn into_package(self, base_dir: &Path) -> Result<ModelPackage, ModelPackageError> {
        let mut models = Vec::with_capacity(self.base_models.len());
        for entry in self.base_models {
            let model = build_regressor(&entry, base_dir)?;
            models.push(NamedModel::new(entry.name, model));
        }
        ModelPackage::new(&self.feature_columns, self.scaler, models, self.weights)
    }
}

fn build_regressor(
    entry: &BaseModelEntry,
    base_dir: &Path,
) -> Result<Box<dyn Regressor>, ModelPackageError> {
    let load_error = |e: anyhow::Error| ModelPackageError::ModelLoad {
        model: entry.name.clone(),
        reason: format!("{:#}", e),
    };

    Ok(match &entry.kind {
        BaseModelKind::Linear {
            coefficients,
            intercept,
        } => Box::new(LinearRegressor::new(coefficients.clone(), *intercept)),
        BaseModelKind::RandomForest { path } => {
            Box::new(SmartCoreRegressor::load(&base_dir.join(path)).map_err(load_error)?)
        }
        BaseModelKind::Onnx { path } => {
            Box::new(OnnxRegressor::load(&base_dir.join(path)).map_err(load_error)?)
        }
    })
}

pub struct ModelStore {
    file_path: PathBuf,
}

impl ModelStore {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn read_bundle(&self) -> Result<ModelBundle> {
        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read model bundle {:?}", self.file_path))?;
        serde_json::from_str(&content).context("Failed to parse model bundle JSON")
    }

    pub fn load(&self) -> Result<ModelPackage> {
        let bundle = self.read_bundle()?;
        let base_dir = self
            .file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let package = bundle
            .into_package(&base_dir)
            .context("Model bundle failed validation")?;
        info!(
            "Loaded ensemble from {:?}: {} features, models {:?}, weights {:?}",
            self.file_path,
            package.layout().len(),
            package.model_names(),
            package.weights()
        );
        Ok(package)
    }

    /// Startup variant: a missing or broken bundle disables prediction
    /// instead of failing the service.
    pub fn load_optional(&self) -> Option<ModelPackage> {
        if !self.file_path.exists() {
            warn!(
                "Model bundle not found at {:?}. Predictions disabled.",
                self.file_path
            );
            return None;
        }
        match self.load() {
            Ok(package) => Some(package),
            Err(e) => {
                error!("Model loading failed (predictions disabled): {:#}", e);
                None
            }
        }
    }
}
