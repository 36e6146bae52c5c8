pub mod analytics;
pub mod records;

pub use records::{
    EnsembleMetrics, EnsembleScores, InventoryItem, InventorySnapshot, PredictionRecord,
};
