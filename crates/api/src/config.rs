//! # Console Configuration
//!
//! Loads the console service's settings from environment variables, with defaults
//! where the product has a sensible one.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `ATTENDANCE_STORE_PATH`: Where local state is persisted; memory-only when unset
//! - `ATTENDANCE_TIMEZONE`: IANA zone the attendance day is counted in (default: "Asia/Seoul")
//! - `ATTENDANCE_DEADLINE_MORNING`, `ATTENDANCE_DEADLINE_LUNCH`, `ATTENDANCE_DEADLINE_DINNER`:
//!   `HH:MM` after which an unrecorded slot counts as absent (defaults 10:00, 14:00, 19:00)

use std::{env, path::PathBuf};

use attendance_core::{
    clock::DEFAULT_TIMEZONE,
    models::slot::{parse_clock_time, DeadlineTable, Slot},
};
use chrono_tz::Tz;
use eyre::{eyre, Result, WrapErr};
use tracing::Level;

/// Configuration for the console service
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use attendance_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting console on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the console (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the console to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Local store file (optional)
    pub store_path: Option<PathBuf>,

    /// Time zone the attendance day is counted in
    pub timezone: Tz,

    /// Per-slot absence deadlines shared by every view
    pub deadlines: DeadlineTable,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
            store_path: None,
            timezone: DEFAULT_TIMEZONE,
            deadlines: DeadlineTable::default(),
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - ATTENDANCE_TIMEZONE is not a known IANA zone
    /// - A deadline override is not a valid `HH:MM` time
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Local state
        let store_path = env::var("ATTENDANCE_STORE_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let timezone = match env::var("ATTENDANCE_TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|e| eyre!("Invalid ATTENDANCE_TIMEZONE value {}: {}", name, e))?,
            Err(_) => DEFAULT_TIMEZONE,
        };

        let mut deadlines = DeadlineTable::default();
        for slot in Slot::ALL {
            let key = format!("ATTENDANCE_DEADLINE_{}", slot.as_str());
            if let Ok(value) = env::var(&key) {
                let deadline =
                    parse_clock_time(&value).wrap_err_with(|| format!("Invalid {} value", key))?;
                deadlines = deadlines.with_deadline(slot, deadline);
            }
        }

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            store_path,
            timezone,
            deadlines,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
