use crate::domain::inventory::{EnsembleMetrics, InventoryItem, InventorySnapshot, PredictionRecord};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const TURNOVER_FILE: &str = "inventory_turnover_predictions.csv";
pub const PREDICTIONS_FILE: &str = "ensemble_predictions.csv";
pub const METRICS_FILE: &str = "ensemble_metrics.json";

/// Reads the precomputed analytics tables from the data directory.
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn load(&self) -> Result<InventorySnapshot> {
        info!("Loading data files from {:?}...", self.data_dir);

        let items: Vec<InventoryItem> = read_csv(&self.data_dir.join(TURNOVER_FILE))?;
        let predictions: Vec<PredictionRecord> = read_csv(&self.data_dir.join(PREDICTIONS_FILE))?;

        let metrics_path = self.data_dir.join(METRICS_FILE);
        let content = fs::read_to_string(&metrics_path)
            .with_context(|| format!("Failed to read {:?}", metrics_path))?;
        let metrics: EnsembleMetrics = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", metrics_path))?;

        info!(
            "Data loaded: {} inventory items, {} predictions",
            items.len(),
            predictions.len()
        );

        Ok(InventorySnapshot {
            items,
            predictions,
            metrics,
        })
    }
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("Failed to open {:?}", path))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(row, record)| record.with_context(|| format!("{:?}: bad record {}", path, row + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "jewelai_test_{}_{}_data",
            std::process::id(),
            unique_id
        ));
        fs::create_dir_all(&dir).expect("Failed to create test temp dir");
        dir
    }

    fn write_metrics(dir: &Path) {
        fs::write(
            dir.join(METRICS_FILE),
            r#"{"ensemble": {"r2_score": 0.91, "rmse": 1200.5, "mae": 800.0, "mape": 12.5},
                "base_models": {"ridge": {"r2_score": 0.85}},
                "training_info": {"samples": 5000}}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_load_ignores_extra_columns() {
        let dir = temp_dir();
        fs::write(
            dir.join(TURNOVER_FILE),
            "label_no,category,net_weight,predicted_potential_sales,days_to_sell,inventory_risk_score,turnover_category\n\
             L001,RING,4.2,25000.0,12.5,31.0,Medium\n\
             L002,CHAIN,12.0,80000.0,40.0,49.5,Slow\n",
        )
        .unwrap();
        fs::write(
            dir.join(PREDICTIONS_FILE),
            "actual_sales,ensemble_prediction\n100.0,110.0\n",
        )
        .unwrap();
        write_metrics(&dir);

        let snapshot = DatasetStore::new(dir.clone()).load().unwrap();
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.items[1].label_no, "L002");
        assert_eq!(snapshot.items[1].inventory_risk_score, 49.5);
        assert_eq!(snapshot.predictions[0].product_category, None);
        assert_eq!(snapshot.metrics.ensemble.r2_score, 0.91);
        assert_eq!(snapshot.metrics.training_info["samples"], 5000);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = temp_dir();
        write_metrics(&dir);
        let err = DatasetStore::new(dir.clone()).load().unwrap_err();
        assert!(format!("{:#}", err).contains(TURNOVER_FILE));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_row_reports_position() {
        let dir = temp_dir();
        fs::write(
            dir.join(TURNOVER_FILE),
            "label_no,category,predicted_potential_sales,days_to_sell,inventory_risk_score,turnover_category\n\
             L001,RING,not-a-number,12.5,31.0,Medium\n",
        )
        .unwrap();
        let err = DatasetStore::new(dir.clone()).load().unwrap_err();
        assert!(format!("{:#}", err).contains("bad record 1"));
        fs::remove_dir_all(dir).ok();
    }
}
