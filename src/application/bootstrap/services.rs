use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::warn;

use crate::application::analytics_service::AnalyticsService;
use crate::application::ml::prediction_service::PredictionService;
use crate::config::Config;
use crate::domain::inventory::InventorySnapshot;
use crate::domain::ml::encoder::FeatureEncoder;
use crate::infrastructure::observability::Metrics;
use crate::infrastructure::persistence::{DatasetStore, ModelStore};

/// Everything request handlers share. Built once, read-only afterwards.
#[derive(Clone)]
pub struct ServicesHandle {
    pub analytics: AnalyticsService,
    pub predictor: Arc<PredictionService>,
    pub metrics: Metrics,
}

impl ServicesHandle {
    pub fn new(inventory: InventorySnapshot, predictor: PredictionService, metrics: Metrics) -> Self {
        let analytics = AnalyticsService::new(inventory);
        metrics.inventory_items.set(analytics.item_count() as f64);
        Self {
            analytics,
            predictor: Arc::new(predictor),
            metrics,
        }
    }
}

pub struct ServicesBootstrap;

impl ServicesBootstrap {
    /// Loads the analytics tables and the model bundle.
    ///
    /// Missing tables abort startup. A missing or invalid model bundle only
    /// disables the prediction endpoint.
    pub fn init(config: &Config) -> Result<ServicesHandle> {
        let metrics = Metrics::new().context("Failed to create metrics registry")?;

        // 1. Analytics tables
        let inventory = DatasetStore::new(config.data.data_dir.clone())
            .load()
            .context("Failed to load analytics data")?;

        // 2. Ensemble model (optional)
        let package = ModelStore::new(config.data.model_path())
            .load_optional()
            .map(Arc::new);
        if package.is_none() {
            warn!("Running without ensemble model: /api/predict/sales will return 503");
        }

        let encoder = FeatureEncoder::new(config.encoder.stats);
        let predictor = PredictionService::new(package, encoder, metrics.clone());

        Ok(ServicesHandle::new(inventory, predictor, metrics))
    }
}
