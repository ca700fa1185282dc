//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.airline-analyzer.toml` in current directory
//! 4. `~/.config/airline-analyzer/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [database]
//! path = "travel.sqlite"
//! tables = ["aircrafts_data", "airports_data", "boarding_passes", "bookings",
//!           "flights", "seats", "ticket_flights", "tickets"]
//!
//! [report]
//! head_rows = 5
//! uplift_rate = 0.10
//! large_aircraft_seats = 100
//! charts = true
//! chart_width = 60
//! chart_height = 12
//!
//! [logging]
//! level = "warn"
//! json = false
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `AIRLINE_DB` | Database file path |
//! | `AIRLINE_UPLIFT_RATE` | Occupancy uplift as a fraction |
//! | `AIRLINE_LOG_LEVEL` | Log level (`error` … `trace`) |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::error::{AppResult, config_error, file_read_error};

/// Tables the analysis previews and requires, in report order
pub const DEFAULT_TABLES: [&str; 8] = [
    "aircrafts_data",
    "airports_data",
    "boarding_passes",
    "bookings",
    "flights",
    "seats",
    "ticket_flights",
    "tickets"
];

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub report:   ReportConfig,
    #[serde(default)]
    pub logging:  LoggingSection
}

/// Database location and expected tables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path:   String,
    pub tables: Vec<String>
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path:   String::from("travel.sqlite"),
            tables: DEFAULT_TABLES.iter().map(|t| t.to_string()).collect()
        }
    }
}

/// Report content and chart layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub head_rows:            usize,
    pub uplift_rate:          f64,
    pub large_aircraft_seats: i64,
    pub charts:               bool,
    pub chart_width:          usize,
    pub chart_height:         usize
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            head_rows:            5,
            uplift_rate:          0.10,
            large_aircraft_seats: 100,
            charts:               true,
            chart_width:          60,
            chart_height:         12
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub json:  bool
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
            json:  false
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.airline-analyzer.toml)
    /// 3. Config file in home directory
    ///    (~/.config/airline-analyzer/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        // Try to load from home directory config
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("airline-analyzer")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Try to load from current directory config (overrides home config)
        let local_config = PathBuf::from(".airline-analyzer.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        let location = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| file_read_error(&location, e))?;
        Self::parse(&content)
    }

    /// Override values from environment variables looked up with `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        if let Some(path) = lookup("AIRLINE_DB") {
            self.database.path = path;
        }

        if let Some(rate) = lookup("AIRLINE_UPLIFT_RATE") {
            self.report.uplift_rate = rate.trim().parse().map_err(|_| {
                config_error(format!("AIRLINE_UPLIFT_RATE is not a number: '{}'", rate))
            })?;
        }

        if let Some(level) = lookup("AIRLINE_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Reject values the analysis cannot work with
    pub fn validate(&self) -> AppResult<()> {
        let rate = self.report.uplift_rate;
        if !rate.is_finite() || rate <= -1.0 {
            return Err(config_error(format!(
                "uplift_rate must be a finite number greater than -1, got {}",
                rate
            )));
        }
        if self.report.chart_width < 10 {
            return Err(config_error("chart_width must be at least 10"));
        }
        if self.report.chart_height < 3 {
            return Err(config_error("chart_height must be at least 3"));
        }
        if self.database.tables.is_empty() {
            return Err(config_error("database.tables must list at least one table"));
        }
        Ok(())
    }
}
