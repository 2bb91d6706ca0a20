use eyre::{eyre, Result};
use serde::Deserialize;
use std::env;

/// Connection settings for the attendance backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend REST API, without a trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Course the console operates on
    pub course_id: i64,
    /// How often unread notifications are polled, in seconds
    pub poll_interval: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            request_timeout: 30,
            course_id: 1,
            poll_interval: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = env::var("ATTENDANCE_API_BASE_URL")
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        let request_timeout = env::var("ATTENDANCE_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|_| eyre!("ATTENDANCE_REQUEST_TIMEOUT_SECONDS must be a valid u64"))?
            .unwrap_or(defaults.request_timeout);

        let course_id = env::var("ATTENDANCE_COURSE_ID")
            .ok()
            .map(|v| v.parse::<i64>())
            .transpose()
            .map_err(|_| eyre!("ATTENDANCE_COURSE_ID must be a valid integer"))?
            .unwrap_or(defaults.course_id);

        let poll_interval = env::var("ATTENDANCE_POLL_SECONDS")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|_| eyre!("ATTENDANCE_POLL_SECONDS must be a valid u64"))?
            .unwrap_or(defaults.poll_interval);

        if poll_interval == 0 {
            return Err(eyre!("ATTENDANCE_POLL_SECONDS must be greater than zero"));
        }

        Ok(Self {
            base_url,
            request_timeout,
            course_id,
            poll_interval,
        })
    }
}
