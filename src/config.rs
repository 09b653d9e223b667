//! Runtime settings resolved from the environment.
//!
//! Every value has a default except the league/user identifiers, which the
//! CLI resolves separately (flag first, then environment).

use std::{env, path::PathBuf, time::Duration};

use crate::{core::CacheDurations, FflError, Result};

pub const SLEEPER_API_URL_ENV_VAR: &str = "SLEEPER_API_URL";
pub const SLEEPER_DATA_URL_ENV_VAR: &str = "SLEEPER_DATA_URL";
pub const LEAGUE_ID_ENV_VAR: &str = "FFL_SLEEPER_LEAGUE_ID";
pub const USERNAME_ENV_VAR: &str = "FFL_SLEEPER_USERNAME";
pub const RATE_LIMIT_ENV_VAR: &str = "FFL_RATE_LIMIT_PER_MINUTE";
pub const ESPN_RATE_LIMIT_ENV_VAR: &str = "FFL_ESPN_RATE_LIMIT_PER_MINUTE";
pub const REQUEST_TIMEOUT_ENV_VAR: &str = "FFL_REQUEST_TIMEOUT_SECS";
pub const ESPN_PROXY_URL_ENV_VAR: &str = "FFL_ESPN_PROXY_URL";
pub const ESPN_LEAGUE_ID_ENV_VAR: &str = "FFL_ESPN_LEAGUE_ID";
pub const SNAPSHOT_DB_ENV_VAR: &str = "FFL_SNAPSHOT_DB";

pub const DEFAULT_SLEEPER_API_URL: &str = "https://api.sleeper.app";
pub const DEFAULT_SLEEPER_DATA_URL: &str = "https://api.sleeper.com";
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 1000;
pub const DEFAULT_ESPN_RATE_LIMIT_PER_MINUTE: u32 = 60;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one process.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base of the documented `/v1/...` endpoints.
    pub sleeper_api_url: String,
    /// Base of the per-player and list-style projection/stat endpoints.
    pub sleeper_data_url: String,
    pub rate_limit_per_minute: u32,
    pub espn_rate_limit_per_minute: u32,
    pub request_timeout: Duration,
    /// Server-side proxy for the secondary platform; `None` means fixture mode.
    pub espn_proxy_url: Option<String>,
    /// `None` disables the offline snapshot.
    pub snapshot_db: Option<PathBuf>,
    pub cache_durations: CacheDurations,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sleeper_api_url: DEFAULT_SLEEPER_API_URL.to_string(),
            sleeper_data_url: DEFAULT_SLEEPER_DATA_URL.to_string(),
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            espn_rate_limit_per_minute: DEFAULT_ESPN_RATE_LIMIT_PER_MINUTE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            espn_proxy_url: None,
            snapshot_db: default_snapshot_path(),
            cache_durations: CacheDurations::default(),
        }
    }
}

impl Settings {
    /// Read settings from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            sleeper_api_url: env_string(SLEEPER_API_URL_ENV_VAR)
                .unwrap_or(defaults.sleeper_api_url),
            sleeper_data_url: env_string(SLEEPER_DATA_URL_ENV_VAR)
                .unwrap_or(defaults.sleeper_data_url),
            rate_limit_per_minute: env_parse(RATE_LIMIT_ENV_VAR)?
                .unwrap_or(defaults.rate_limit_per_minute),
            espn_rate_limit_per_minute: env_parse(ESPN_RATE_LIMIT_ENV_VAR)?
                .unwrap_or(defaults.espn_rate_limit_per_minute),
            request_timeout: env_parse(REQUEST_TIMEOUT_ENV_VAR)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            espn_proxy_url: env_string(ESPN_PROXY_URL_ENV_VAR),
            snapshot_db: env_string(SNAPSHOT_DB_ENV_VAR)
                .map(PathBuf::from)
                .or(defaults.snapshot_db),
            cache_durations: defaults.cache_durations,
        })
    }

    /// Settings pointing both primary bases at one server, without a snapshot.
    pub fn for_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            sleeper_api_url: base.clone(),
            sleeper_data_url: base,
            snapshot_db: None,
            ..Self::default()
        }
    }
}

/// Path: ~/.cache/ffl-lineup/snapshot.db
pub fn default_snapshot_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("ffl-lineup").join("snapshot.db"))
}

fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env_string(name) {
        Some(raw) => raw.parse().map(Some).map_err(|_| FflError::InvalidId {
            kind: "numeric setting",
            value: format!("{name}={raw}"),
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that touch process environment run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sleeper_api_url, DEFAULT_SLEEPER_API_URL);
        assert_eq!(settings.rate_limit_per_minute, 1000);
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert!(settings.espn_proxy_url.is_none());
        assert_eq!(settings.cache_durations, CacheDurations::default());
    }

    #[test]
    fn test_for_base_url_strips_trailing_slash() {
        let settings = Settings::for_base_url("http://127.0.0.1:9999/");
        assert_eq!(settings.sleeper_api_url, "http://127.0.0.1:9999");
        assert_eq!(settings.sleeper_data_url, "http://127.0.0.1:9999");
        assert!(settings.snapshot_db.is_none());
    }

    #[test]
    fn test_from_env_reads_overrides() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var(ESPN_RATE_LIMIT_ENV_VAR, "12");
        std::env::set_var(ESPN_PROXY_URL_ENV_VAR, "http://proxy.local");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.espn_rate_limit_per_minute, 12);
        assert_eq!(
            settings.espn_proxy_url.as_deref(),
            Some("http://proxy.local")
        );

        std::env::remove_var(ESPN_RATE_LIMIT_ENV_VAR);
        std::env::remove_var(ESPN_PROXY_URL_ENV_VAR);
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var(REQUEST_TIMEOUT_ENV_VAR, "soon");
        assert!(Settings::from_env().is_err());
        std::env::remove_var(REQUEST_TIMEOUT_ENV_VAR);
    }
}
