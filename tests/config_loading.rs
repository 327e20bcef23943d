//! Integration test: Configuration utilities
//!
//! Tests config path resolution and loading of the dashboard config.

use gex_dashboard::bin_common::{load_config_from_env, ConfigType};
use gex_dashboard::gexsim::{DashboardConfig, Timeframe};
use std::env;

#[test]
fn test_dashboard_config_default_path() {
    env::remove_var("DASHBOARD_CONFIG_PATH");

    let config_path = load_config_from_env(ConfigType::Dashboard);
    assert_eq!(
        config_path.to_str().unwrap(),
        "config/dashboard_config.yaml"
    );
}

#[test]
fn test_custom_config() {
    let custom = ConfigType::Custom("custom/path.yaml".to_string());
    let config_path = load_config_from_env(custom);

    assert_eq!(config_path.to_str().unwrap(), "custom/path.yaml");
}

#[test]
fn test_config_type_env_var_names() {
    assert_eq!(ConfigType::Dashboard.env_var_name(), "DASHBOARD_CONFIG_PATH");
}

#[test]
fn test_shipped_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/dashboard_config.yaml");
    let config = DashboardConfig::load(path).unwrap();

    assert_eq!(config.simulation.tick_interval_ms, 500);
    assert_eq!(config.simulation.initial_timeframe, Timeframe::Days30);
    assert_eq!(config.simulation.initial_spot_price, 75.0);
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let config = DashboardConfig::load_or_default("does/not/exist.yaml").unwrap();
    assert_eq!(config.simulation.tick_interval_ms, 500);
    assert_eq!(config.log_level, "info");
}
