//! Dashboard configuration.
//!
//! Read once at startup from the JSON file named by `DASHBOARD_CONFIG`, or
//! `dashboard.json` in the working directory. Partial files are fine:
//! missing fields take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset to load when none is given on the command line.
    pub data_path: Option<PathBuf>,

    /// Investment target for the progress page.
    pub target: f64,

    /// Currency label shown on the metric cards.
    pub currency: String,

    /// Delay per percentage point of the progress fill.
    pub animation_step_ms: u64,

    /// Window width on startup.
    pub window_width: f32,

    /// Window height on startup.
    pub window_height: f32,

    /// Columns shown in the raw table before the user picks any.
    pub table_columns: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            target: 3_000_000_000.0,
            currency: "TZS".to_string(),
            animation_step_ms: 100,
            window_width: 1200.0,
            window_height: 800.0,
            table_columns: Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Load from `$DASHBOARD_CONFIG`, then `./dashboard.json`, else defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(local);
        }
        log::info!("no config file, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn animation_step(&self) -> Duration {
        Duration::from_millis(self.animation_step_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, r#"{ "target": 1000000, "currency": "USD" }"#).unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(config.target, 1_000_000.0);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.animation_step_ms, 100);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, "{ target: ").unwrap();
        assert!(DashboardConfig::load_from(&path).is_err());
    }
}
