//! Read-only summaries over the precomputed inventory tables.

use super::records::{InventoryItem, PredictionRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Risk score above which an item counts as ageing stock.
pub const AGEING_RISK_THRESHOLD: f64 = 45.0;
/// Risk score above which an item is expected to become deadstock.
pub const DEADSTOCK_RISK_THRESHOLD: f64 = 48.0;
/// Risk score below which an item counts as fast moving.
pub const FAST_MOVING_RISK_THRESHOLD: f64 = 30.0;

pub const MAX_ITEMS_PER_PAGE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_stock_value: f64,
    pub ageing_stock: usize,
    pub predicted_deadstock: usize,
    pub fast_moving_items: usize,
    pub total_items: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VelocityTrend {
    Rising,
    Stable,
    Falling,
}

impl VelocityTrend {
    pub fn from_avg_days_to_sell(days: f64) -> Self {
        if days < 7.0 {
            VelocityTrend::Rising
        } else if days > 30.0 {
            VelocityTrend::Falling
        } else {
            VelocityTrend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub stock_value: f64,
    pub avg_days_to_sell: f64,
    pub risk_score: f64,
    pub item_count: usize,
    pub trend: VelocityTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketTrend {
    pub category: String,
    pub total_sales: f64,
    pub avg_sales: f64,
    pub risk: f64,
    pub turnover_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemsPage {
    /// Matches before truncation
    pub total: usize,
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Clone)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub risk_min: f64,
    pub risk_max: f64,
}

impl ItemFilter {
    pub fn new(category: Option<String>, risk_min: Option<f64>, risk_max: Option<f64>) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()),
            risk_min: risk_min.unwrap_or(0.0),
            risk_max: risk_max.unwrap_or(100.0),
        }
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(category) = &self.category
            && item.category != category.to_uppercase()
        {
            return false;
        }
        item.inventory_risk_score >= self.risk_min && item.inventory_risk_score <= self.risk_max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionPoint {
    pub actual: f64,
    pub predicted: f64,
    pub category: String,
}

#[derive(Default)]
struct CategoryAccumulator {
    sales: f64,
    days: f64,
    risk: f64,
    count: usize,
}

impl CategoryAccumulator {
    fn push(&mut self, item: &InventoryItem) {
        self.sales += item.predicted_potential_sales;
        self.days += item.days_to_sell;
        self.risk += item.inventory_risk_score;
        self.count += 1;
    }

    fn mean(&self, total: f64) -> f64 {
        total / self.count as f64
    }
}

/// Groups by category name in ascending order.
fn group_by_category(items: &[InventoryItem]) -> BTreeMap<&str, CategoryAccumulator> {
    let mut groups: BTreeMap<&str, CategoryAccumulator> = BTreeMap::new();
    for item in items {
        groups.entry(item.category.as_str()).or_default().push(item);
    }
    groups
}

pub fn kpi_summary(items: &[InventoryItem]) -> KpiSummary {
    let count_where = |pred: fn(f64) -> bool| {
        items
            .iter()
            .filter(|i| pred(i.inventory_risk_score))
            .count()
    };

    KpiSummary {
        total_stock_value: items.iter().map(|i| i.predicted_potential_sales).sum(),
        ageing_stock: count_where(|r| r > AGEING_RISK_THRESHOLD),
        predicted_deadstock: count_where(|r| r > DEADSTOCK_RISK_THRESHOLD),
        fast_moving_items: count_where(|r| r < FAST_MOVING_RISK_THRESHOLD),
        total_items: items.len(),
    }
}

pub fn category_breakdown(items: &[InventoryItem]) -> Vec<CategorySummary> {
    group_by_category(items)
        .into_iter()
        .map(|(category, acc)| {
            let avg_days = acc.mean(acc.days);
            CategorySummary {
                category: category.to_string(),
                stock_value: acc.sales,
                avg_days_to_sell: avg_days,
                risk_score: acc.mean(acc.risk),
                item_count: acc.count,
                trend: VelocityTrend::from_avg_days_to_sell(avg_days),
            }
        })
        .collect()
}

pub fn market_trends(items: &[InventoryItem]) -> Vec<MarketTrend> {
    group_by_category(items)
        .into_iter()
        .map(|(category, acc)| MarketTrend {
            category: category.to_string(),
            total_sales: acc.sales,
            avg_sales: acc.mean(acc.sales),
            risk: acc.mean(acc.risk),
            turnover_days: acc.mean(acc.days),
        })
        .collect()
}

pub fn filter_items(items: &[InventoryItem], filter: &ItemFilter) -> ItemsPage {
    let matched: Vec<&InventoryItem> = items.iter().filter(|i| filter.matches(i)).collect();
    ItemsPage {
        total: matched.len(),
        items: matched
            .into_iter()
            .take(MAX_ITEMS_PER_PAGE)
            .cloned()
            .collect(),
    }
}

pub fn prediction_comparison(records: &[PredictionRecord], limit: usize) -> Vec<PredictionPoint> {
    records
        .iter()
        .take(limit)
        .map(|r| PredictionPoint {
            actual: r.actual_sales,
            predicted: r.ensemble_prediction,
            category: r
                .product_category
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect()
}
