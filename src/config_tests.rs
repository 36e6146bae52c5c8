use crate::config::{Config, DEFAULT_CORS_ORIGINS, DataEnvConfig};
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: &[&str] = &[
    "HOST",
    "PORT",
    "CORS_ORIGINS",
    "DATA_DIR",
    "MODEL_FILE",
    "FEATURE_MARKET_SHARE",
    "FEATURE_SALES_MOMENTUM",
    "OBSERVABILITY_ENABLED",
    "OBSERVABILITY_INTERVAL",
];

fn clear_env() {
    for key in KEYS {
        // SAFETY: guarded by ENV_LOCK, no other test thread touches the environment.
        unsafe { env::remove_var(key) };
    }
}

fn set_env(key: &str, value: &str) {
    // SAFETY: guarded by ENV_LOCK.
    unsafe { env::set_var(key, value) };
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.cors_origins.len(), DEFAULT_CORS_ORIGINS.len());
    assert_eq!(config.data.data_dir, PathBuf::from("output"));
    assert_eq!(config.encoder.stats.market_share, 13.0);
    assert!(!config.observability.enabled);
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    set_env("PORT", "9100");
    set_env("CORS_ORIGINS", "https://dash.example.com");
    set_env("DATA_DIR", "/srv/jewelai");
    set_env("FEATURE_SALES_MOMENTUM", "88000");
    set_env("OBSERVABILITY_ENABLED", "true");

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.cors_origins, vec!["https://dash.example.com"]);
    assert_eq!(
        config.data.model_path(),
        PathBuf::from("/srv/jewelai/ensemble_model.json")
    );
    assert_eq!(config.encoder.stats.sales_momentum, 88000.0);
    assert_eq!(config.encoder.stats.market_share, 13.0);
    assert!(config.observability.enabled);

    clear_env();
}

#[test]
fn test_model_file_resolves_against_data_dir() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    set_env("DATA_DIR", "/srv/jewelai");
    set_env("MODEL_FILE", "bundles/v2.json");
    let data = DataEnvConfig::from_env();
    assert_eq!(data.model_path(), PathBuf::from("/srv/jewelai/bundles/v2.json"));

    set_env("MODEL_FILE", "/models/bundle.json");
    assert_eq!(
        DataEnvConfig::from_env().model_path(),
        PathBuf::from("/models/bundle.json")
    );

    clear_env();
}

#[test]
fn test_config_rejects_bad_numbers() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    set_env("PORT", "eighty");
    assert!(Config::from_env().is_err());
    clear_env();

    set_env("FEATURE_MARKET_SHARE", "lots");
    assert!(Config::from_env().is_err());
    clear_env();
}
