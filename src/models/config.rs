//! Configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Provider page listing the VPN servers
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// CSS selector (tag + class) of the elements holding hostnames
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Flat file caching the hostname list, one per line
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,

    /// Age after which the cached list is fetched again
    #[serde(default = "default_cache_max_age_days")]
    pub cache_max_age_days: u64,

    /// Number of echo requests sent to each server
    #[serde(default = "default_ping_count")]
    pub ping_count: u32,

    /// Echo utility invoked as `<ping_command> -c <count> -- <host>`
    #[serde(default = "default_ping_command")]
    pub ping_command: String,

    /// Number of servers probed at the same time
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Timeout for fetching the listing page
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_seconds: u64,

    /// Directory the saved report is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Suppress per-server progress lines
    #[serde(default)]
    pub quiet: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            selector: default_selector(),
            cache_file: default_cache_file(),
            cache_max_age_days: default_cache_max_age_days(),
            ping_count: default_ping_count(),
            ping_command: default_ping_command(),
            jobs: default_jobs(),
            fetch_timeout_seconds: default_fetch_timeout_secs(),
            output_dir: default_output_dir(),
            enable_color: default_enable_color(),
            quiet: false,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Staleness window of the server list cache
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_days.saturating_mul(SECONDS_PER_DAY))
    }

    /// Get fetch timeout as Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    /// Validate the configuration and return the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.source_url.is_empty() {
            return Err(AppError::config("Listing URL cannot be empty"));
        }

        match url::Url::parse(&self.source_url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!(
                        "Listing URL must use http or https: {}",
                        self.source_url
                    )));
                }
            }
            Err(e) => {
                return Err(AppError::config(format!(
                    "Invalid listing URL '{}': {}",
                    self.source_url, e
                )));
            }
        }

        if self.selector.trim().is_empty() {
            return Err(AppError::config("Listing selector cannot be empty"));
        }

        if self.cache_file.as_os_str().is_empty() {
            return Err(AppError::config("Cache file path cannot be empty"));
        }

        if self.cache_max_age_days == 0 {
            return Err(AppError::config("Cache max age must be at least one day"));
        }

        if self.ping_count == 0 {
            return Err(AppError::config("Ping count must be greater than 0"));
        }

        if self.ping_command.trim().is_empty() {
            return Err(AppError::config("Ping command cannot be empty"));
        }

        if self.jobs == 0 {
            return Err(AppError::config("Jobs must be greater than 0"));
        }

        if self.fetch_timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.fetch_timeout_seconds > 300 {
            return Err(AppError::config("Timeout cannot exceed 300 seconds"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_vars(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary variable lookup
    pub fn merge_from_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VPN_LIST_URL") {
            self.source_url = url.trim().to_string();
        }

        if let Some(selector) = lookup("VPN_LIST_SELECTOR") {
            self.selector = selector.trim().to_string();
        }

        if let Some(cache_file) = lookup("VPN_CACHE_FILE") {
            self.cache_file = PathBuf::from(cache_file.trim());
        }

        if let Some(days) = lookup("CACHE_MAX_AGE_DAYS") {
            self.cache_max_age_days = days.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid CACHE_MAX_AGE_DAYS value '{}': {}", days, e)))?;
        }

        if let Some(count) = lookup("PING_COUNT") {
            self.ping_count = count.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid PING_COUNT value '{}': {}", count, e)))?;
        }

        if let Some(command) = lookup("PING_COMMAND") {
            self.ping_command = command.trim().to_string();
        }

        if let Some(jobs) = lookup("PING_JOBS") {
            self.jobs = jobs.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid PING_JOBS value '{}': {}", jobs, e)))?;
        }

        if let Some(timeout) = lookup("FETCH_TIMEOUT_SECONDS") {
            self.fetch_timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid FETCH_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_source_url() -> String {
    crate::defaults::DEFAULT_SOURCE_URL.to_string()
}

fn default_selector() -> String {
    crate::defaults::DEFAULT_SELECTOR.to_string()
}

fn default_cache_file() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_CACHE_FILE)
}

fn default_cache_max_age_days() -> u64 {
    crate::defaults::DEFAULT_CACHE_MAX_AGE_DAYS
}

fn default_ping_count() -> u32 {
    crate::defaults::DEFAULT_PING_COUNT
}

fn default_ping_command() -> String {
    crate::defaults::DEFAULT_PING_COMMAND.to_string()
}

fn default_jobs() -> usize {
    crate::defaults::DEFAULT_JOBS
}

fn default_fetch_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_FETCH_TIMEOUT.as_secs()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ping_count, 10);
        assert_eq!(config.cache_file, PathBuf::from("vpn-urls"));
    }

    #[test]
    fn test_default_staleness_window_is_two_weeks() {
        let config = Config::default();
        assert_eq!(config.cache_max_age(), Duration::from_secs(14 * 24 * 60 * 60));
    }

    #[test]
    fn test_invalid_source_url() {
        let mut config = Config::default();
        config.source_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.source_url = "ftp://example.com/list".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_values_invalid() {
        let mut config = Config::default();
        config.ping_count = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.jobs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cache_max_age_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_selector_invalid() {
        let mut config = Config::default();
        config.selector = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_from_vars() {
        let env = vars(&[
            ("VPN_LIST_URL", "https://example.com/servers"),
            ("VPN_CACHE_FILE", "/tmp/servers"),
            ("PING_COUNT", "3"),
            ("PING_JOBS", "4"),
            ("ENABLE_COLOR", "false"),
        ]);

        let mut config = Config::default();
        config.merge_from_vars(|key| env.get(key).cloned()).unwrap();

        assert_eq!(config.source_url, "https://example.com/servers");
        assert_eq!(config.cache_file, PathBuf::from("/tmp/servers"));
        assert_eq!(config.ping_count, 3);
        assert_eq!(config.jobs, 4);
        assert!(!config.enable_color);
        assert_eq!(config.selector, "span.mr-2");
    }

    #[test]
    fn test_merge_rejects_bad_numbers() {
        let env = vars(&[("PING_COUNT", "ten")]);
        let mut config = Config::default();
        let result = config.merge_from_vars(|key| env.get(key).cloned());
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
