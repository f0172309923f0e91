use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::reports::{LOW_STOCK_THRESHOLD, RECENT_SALES_DAYS, UPCOMING_WINDOW_DAYS};

const DEFAULT_CONFIG_FILE: &str = "optica";
const ENV_PREFIX: &str = "OPTICA";
const DEFAULT_MAILBOX_CAPACITY: usize = 32;
const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Runtime settings for the store and its reports.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShopConfig {
    /// Products at or below this quantity count as low stock
    pub low_stock_threshold: u32,

    /// Days ahead covered by the appointment window report
    pub upcoming_window_days: i64,

    /// Days back covered by the recent sales figure
    pub recent_sales_days: i64,

    /// Bounded mailbox size of the store actor
    pub mailbox_capacity: usize,

    /// Buffered store events per subscriber before it starts lagging
    pub event_capacity: usize,

    /// JSON snapshot loaded on startup and written on shutdown
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            upcoming_window_days: UPCOMING_WINDOW_DAYS,
            recent_sales_days: RECENT_SALES_DAYS,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            snapshot_path: None,
        }
    }
}

impl ShopConfig {
    /// Loads defaults, then an optional `optica.{toml,json,yaml}` in the working directory,
    /// then `OPTICA__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = with_defaults()?
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));
        Self::build(builder)
    }

    /// Loads defaults overlaid with one explicit file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = with_defaults()?.add_source(File::from(path.as_ref()).required(true));
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: ShopConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        info!(
            low_stock_threshold = config.low_stock_threshold,
            upcoming_window_days = config.upcoming_window_days,
            snapshot = ?config.snapshot_path,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::Message("mailbox_capacity must be greater than 0".into()));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Message("event_capacity must be greater than 0".into()));
        }
        for (name, days) in [
            ("upcoming_window_days", self.upcoming_window_days),
            ("recent_sales_days", self.recent_sales_days),
        ] {
            if !(0..=MAX_WINDOW_DAYS).contains(&days) {
                return Err(ConfigError::Message(format!(
                    "{} must be between 0 and {} days, got {}",
                    name, MAX_WINDOW_DAYS, days
                )));
            }
        }
        Ok(())
    }
}

/// Longest report window accepted from configuration, roughly a century.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = ShopConfig::default();
    Config::builder()
        .set_default("low_stock_threshold", i64::from(defaults.low_stock_threshold))?
        .set_default("upcoming_window_days", defaults.upcoming_window_days)?
        .set_default("recent_sales_days", defaults.recent_sales_days)?
        .set_default("mailbox_capacity", defaults.mailbox_capacity as i64)?
        .set_default("event_capacity", defaults.event_capacity as i64)
}
