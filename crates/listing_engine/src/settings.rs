use std::fs;
use std::path::Path;
use std::time::Duration;

use engine_logging::{engine_error, engine_warn};
use serde::Deserialize;

use crate::fetch::{FetchSettings, DEFAULT_USER_AGENT};

const DEFAULT_REQUEST_TIMEOUT_SECS: f64 = 20.0;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_MAX_WORKERS: usize = 4;

/// Run settings as read from the settings JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapeSettings {
    pub user_agent: String,
    /// Per-attempt request timeout in seconds.
    pub request_timeout: f64,
    pub max_retries: u32,
    pub max_workers: usize,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl ScrapeSettings {
    /// Per-worker fetch configuration.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            user_agent: self.user_agent.clone(),
            request_timeout: self.timeout_duration(),
            max_retries: self.max_retries,
            ..FetchSettings::default()
        }
    }

    fn timeout_duration(&self) -> Duration {
        // Duration::from_secs_f64 panics on negative or non-finite input.
        if self.request_timeout.is_finite() && self.request_timeout >= 0.0 {
            Duration::from_secs_f64(self.request_timeout)
        } else {
            Duration::from_secs_f64(DEFAULT_REQUEST_TIMEOUT_SECS)
        }
    }
}

/// Load settings from a JSON file.
///
/// A missing or malformed settings source falls back to the defaults
/// wholesale; individually absent keys take their documented default.
pub fn load_settings(path: &Path) -> ScrapeSettings {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            engine_warn!(
                "settings file {} not readable ({error}), using defaults",
                path.display()
            );
            return ScrapeSettings::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(settings) => settings,
        Err(error) => {
            engine_error!(
                "failed to parse settings file {} ({error}), using defaults",
                path.display()
            );
            ScrapeSettings::default()
        }
    }
}
