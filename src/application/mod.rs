// Reporting over the precomputed inventory tables
pub mod analytics_service;

// Startup wiring
pub mod bootstrap;

// Base regressors and the prediction service
pub mod ml;
