//! ID types for the upstream fantasy platforms.
//!
//! The primary platform hands out every identifier as a string (team
//! defenses use their team abbreviation as a player id), so ids wrap `String`.

use crate::error::{FflError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for league IDs.
///
/// # Examples
///
/// ```rust
/// use ffl_lineup::LeagueId;
///
/// let league_id: LeagueId = "992211821861576704".parse().unwrap();
/// assert_eq!(league_id.as_str(), "992211821861576704");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(String);

impl LeagueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LeagueId {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(FflError::InvalidId {
                kind: "league id",
                value: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }
}

/// Type-safe wrapper for player IDs (`"4046"`, or `"DET"` for a team defense)
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The roster marker for an unfilled starter slot.
    pub fn is_empty_slot(&self) -> bool {
        self.0 == "0" || self.0.is_empty()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type-safe wrapper for user (roster owner) IDs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FflError::InvalidId {
                kind: "user id",
                value: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_id_parse() {
        let id: LeagueId = " 1234567890 ".parse().unwrap();
        assert_eq!(id.as_str(), "1234567890");
        assert_eq!(id.to_string(), "1234567890");
    }

    #[test]
    fn test_league_id_rejects_non_numeric() {
        assert!("abc".parse::<LeagueId>().is_err());
        assert!("".parse::<LeagueId>().is_err());
    }

    #[test]
    fn test_player_id_empty_slot() {
        assert!(PlayerId::new("0").is_empty_slot());
        assert!(!PlayerId::new("4046").is_empty_slot());
        assert!(!PlayerId::new("DET").is_empty_slot());
    }

    #[test]
    fn test_player_id_serde_transparent() {
        let id: PlayerId = serde_json::from_str("\"4046\"").unwrap();
        assert_eq!(id, PlayerId::from("4046"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"4046\"");
    }
}
