use crate::domain::inventory::analytics::{
    self, CategorySummary, ItemFilter, ItemsPage, KpiSummary, MarketTrend, PredictionPoint,
};
use crate::domain::inventory::{EnsembleMetrics, InventorySnapshot};
use std::sync::Arc;

/// Default number of rows in the actual vs predicted chart.
pub const DEFAULT_COMPARISON_LIMIT: usize = 50;

/// Read-only reporting over the snapshot loaded at startup.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    snapshot: Arc<InventorySnapshot>,
}

impl AnalyticsService {
    pub fn new(snapshot: InventorySnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn item_count(&self) -> usize {
        self.snapshot.items.len()
    }

    pub fn kpis(&self) -> KpiSummary {
        analytics::kpi_summary(&self.snapshot.items)
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        analytics::category_breakdown(&self.snapshot.items)
    }

    pub fn market_trends(&self) -> Vec<MarketTrend> {
        analytics::market_trends(&self.snapshot.items)
    }

    pub fn items(&self, filter: &ItemFilter) -> ItemsPage {
        analytics::filter_items(&self.snapshot.items, filter)
    }

    pub fn prediction_comparison(&self, limit: Option<usize>) -> Vec<PredictionPoint> {
        analytics::prediction_comparison(
            &self.snapshot.predictions,
            limit.unwrap_or(DEFAULT_COMPARISON_LIMIT),
        )
    }

    pub fn performance(&self) -> &EnsembleMetrics {
        &self.snapshot.metrics
    }
}
