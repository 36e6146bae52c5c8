// Domain-specific error types
pub mod errors;

// Inventory tables and reporting rules
pub mod inventory;

// Feature encoding and ensemble scoring
pub mod ml;
