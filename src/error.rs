//! Error types for the fantasy lineup service

use std::time::Duration;
use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, FflError>;

/// Crate-wide error.
///
/// Cloneable so one in-flight request can resolve every deduplicated caller
/// with the same outcome. Wrapped library errors are kept by message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FflError {
    /// Local admission control rejected the call, or upstream answered 429.
    #[error("rate limit exceeded{}", fmt_retry_after(.retry_after))]
    RateLimitExceeded { retry_after: Option<Duration> },

    #[error("upstream returned HTTP {status} for {url}")]
    UpstreamHttp { status: u16, url: String },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parsing failed: {0}")]
    Json(String),

    #[error("player data unavailable for sport '{sport}' (no live data, cache or snapshot)")]
    PlayerDataUnavailable { sport: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("{env_var} not provided on the command line or in the environment")]
    MissingConfig { env_var: String },

    #[error("invalid scoring class: {value} (expected std, half or ppr)")]
    InvalidScoringClass { value: String },

    #[error("invalid {kind}: {value}")]
    InvalidId { kind: &'static str, value: String },

    #[error("no roster owned by {owner} in this league")]
    RosterNotFound { owner: String },

    #[error("user not found: {username}")]
    UserNotFound { username: String },
}

fn fmt_retry_after(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(d) => format!(" (retry after {}s)", d.as_secs()),
        None => String::new(),
    }
}

impl FflError {
    /// True for local rejections and upstream 429s, the only retryable class.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FflError::RateLimitExceeded { .. })
    }

    /// Server-supplied `Retry-After` hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            FflError::RateLimitExceeded { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FflError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return FflError::Json(err.to_string());
        }
        match err.status() {
            Some(status) => FflError::UpstreamHttp {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => FflError::Http(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FflError {
    fn from(err: serde_json::Error) -> Self {
        FflError::Json(err.to_string())
    }
}

impl From<std::io::Error> for FflError {
    fn from(err: std::io::Error) -> Self {
        FflError::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for FflError {
    fn from(err: rusqlite::Error) -> Self {
        FflError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for FflError {
    fn from(err: anyhow::Error) -> Self {
        FflError::Storage(format!("{err:#}"))
    }
}

impl From<reqwest::header::InvalidHeaderValue> for FflError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        FflError::Http(err.to_string())
    }
}
