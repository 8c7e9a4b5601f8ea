// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::aggregate::EventFilter;
use crate::alert::{AlertSettings, MinuteBand};
use crate::context::AppContext;
use crate::storage::LocalStorage;
use crate::window::Granularity;
use anyhow::{Error, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_week_start() -> Weekday {
    Weekday::Sun
}
fn default_granularity() -> Granularity {
    Granularity::Month
}
fn default_poll_interval() -> u64 {
    60
}
fn default_compact_day_limit() -> usize {
    3
}
fn default_upcoming_horizon() -> u32 {
    7
}
fn default_upcoming_limit() -> usize {
    10
}

fn default_international_min() -> i64 {
    120
}
fn default_international_max() -> i64 {
    180
}
fn default_domestic_min() -> i64 {
    90
}
fn default_domestic_max() -> i64 {
    120
}
fn default_international_marker() -> String {
    "international".to_string()
}
fn default_tight_transition() -> i64 {
    60
}
fn default_duration() -> i64 {
    60
}

/// `[alerts]` table. Lead times are minutes before departure: a reminder fires
/// while the remaining time is in `(min, max]`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AlertConfig {
    #[serde(default = "default_international_min")]
    pub international_lead_min: i64,
    #[serde(default = "default_international_max")]
    pub international_lead_max: i64,
    #[serde(default = "default_domestic_min")]
    pub domestic_lead_min: i64,
    #[serde(default = "default_domestic_max")]
    pub domestic_lead_max: i64,
    #[serde(default = "default_international_marker")]
    pub international_marker: String,
    #[serde(default = "default_tight_transition")]
    pub tight_transition_minutes: i64,
    #[serde(default = "default_duration")]
    pub default_duration_minutes: i64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            international_lead_min: 120,
            international_lead_max: 180,
            domestic_lead_min: 90,
            domestic_lead_max: 120,
            international_marker: "international".to_string(),
            tight_transition_minutes: 60,
            default_duration_minutes: 60,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    #[serde(default = "default_granularity")]
    pub default_granularity: Granularity,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_compact_day_limit")]
    pub compact_day_limit: usize,
    #[serde(default = "default_upcoming_horizon")]
    pub upcoming_horizon_days: u32,
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
    #[serde(default)]
    pub filter: EventFilter,
    #[serde(default)]
    pub alerts: AlertConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Match the serde defaults
            week_start: Weekday::Sun,
            default_granularity: Granularity::Month,
            poll_interval_secs: 60,
            compact_day_limit: 3,
            upcoming_horizon_days: 7,
            upcoming_limit: 10,
            filter: EventFilter::default(),
            alerts: AlertConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Loads the config, falling back to defaults only when the file is missing.
    /// A file that exists but doesn't parse is still an error.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::info!("No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Detects whether an error means the config file was missing, either via our
    /// explicit message or an underlying IO NotFound anywhere in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    pub fn alert_settings(&self) -> AlertSettings {
        let a = &self.alerts;
        AlertSettings {
            international_band: MinuteBand::new(a.international_lead_min, a.international_lead_max),
            domestic_band: MinuteBand::new(a.domestic_lead_min, a.domestic_lead_max),
            international_marker: a.international_marker.clone(),
            tight_transition_minutes: a.tight_transition_minutes,
            default_duration_minutes: a.default_duration_minutes,
        }
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        // Sub-minute precision isn't needed; anything below 5s is treated as 5s.
        std::time::Duration::from_secs(self.poll_interval_secs.max(5))
    }
}
