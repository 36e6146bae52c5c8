//! Artifact locations.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL_FILE: &str = "ensemble_model.json";

#[derive(Debug, Clone)]
pub struct DataEnvConfig {
    /// Directory holding the CSV/JSON tables and the model bundle
    pub data_dir: PathBuf,
    /// Model bundle file name, relative to `data_dir` unless absolute
    pub model_file: PathBuf,
}

impl Default for DataEnvConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("output"),
            model_file: PathBuf::from(DEFAULT_MODEL_FILE),
        }
    }
}

impl DataEnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            model_file: env::var("MODEL_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_file),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.data_dir.join(&self.model_file)
    }
}
