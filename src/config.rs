//! Layered runtime settings.
//!
//! Defaults, then an optional config file, then `STATUSWATCH_*` environment
//! variables. Command-line flags are applied on top by the binary.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::FilterState;
use crate::source::{HttpSourceConfig, DEFAULT_BASE_URL};

/// Prefix for environment overrides, e.g. `STATUSWATCH_REFRESH_SECS=30`.
pub const ENV_PREFIX: &str = "STATUSWATCH";

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Status page root URL.
    pub base_url: String,
    /// Seconds between refresh cycles.
    pub refresh_secs: u64,
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Initial search term.
    pub search: String,
    /// Start with "only show issues" enabled.
    pub only_issues: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_secs: 60,
            timeout_secs: 10,
            search: String::new(),
            only_issues: false,
        }
    }
}

impl Settings {
    /// Load settings from the optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings using the given environment source.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(env.try_parsing(true))
            .build()
            .with_context(|| match path {
                Some(p) => format!("Failed to load config from {}", p.display()),
                None => "Failed to load config from environment".to_string(),
            })?;

        config.try_deserialize().context("Invalid configuration")
    }

    /// Interval between refresh cycles, never below one second.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    /// Settings for the HTTP data source.
    pub fn http_config(&self) -> HttpSourceConfig {
        HttpSourceConfig {
            base_url: self.base_url.clone(),
            refresh_interval: self.refresh_interval(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }

    /// Filter the dashboard starts with.
    pub fn initial_filter(&self) -> FilterState {
        FilterState::new(self.search.clone(), self.only_issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_with_env(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.refresh_interval(), Duration::from_secs(60));
        assert_eq!(settings.initial_filter(), FilterState::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "base_url = \"https://status.example.com\"").unwrap();
        writeln!(file, "refresh_secs = 15").unwrap();
        writeln!(file, "only_issues = true").unwrap();
        file.flush().unwrap();

        let settings = Settings::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(settings.base_url, "https://status.example.com");
        assert_eq!(settings.refresh_secs, 15);
        assert!(settings.only_issues);
        assert_eq!(settings.timeout_secs, 10);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "refresh_secs = 15").unwrap();
        file.flush().unwrap();

        let settings = Settings::load_with_env(
            Some(file.path()),
            env(&[("STATUSWATCH_REFRESH_SECS", "30"), ("STATUSWATCH_SEARCH", "dns")]),
        )
        .unwrap();
        assert_eq!(settings.refresh_secs, 30);
        assert_eq!(settings.search, "dns");
        assert_eq!(settings.initial_filter().search_term, "dns");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = Path::new("/nonexistent/statuswatch.toml");
        let err = Settings::load_with_env(Some(missing), env(&[])).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_http_config_clamps_zero() {
        let settings = Settings {
            refresh_secs: 0,
            timeout_secs: 0,
            ..Settings::default()
        };
        let http = settings.http_config();
        assert_eq!(http.refresh_interval, Duration::from_secs(1));
        assert_eq!(http.timeout, Duration::from_secs(1));
        assert_eq!(http.base_url, DEFAULT_BASE_URL);
    }
}
