//! Fantasy football position types and utilities.

use crate::error::FflError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy-relevant player positions.
///
/// # Examples
///
/// ```rust
/// use ffl_lineup::Position;
///
/// assert_eq!("dst".parse::<Position>().unwrap(), Position::DEF);
/// assert_eq!(Position::QB.to_string(), "QB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
}

impl Position {
    /// Positions requested from the bulk projection and stat endpoints.
    pub const FANTASY: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DEF,
    ];

    /// Map an ESPN default position id to a position.
    pub fn from_espn_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Position::QB),
            2 => Some(Position::RB),
            3 => Some(Position::WR),
            4 => Some(Position::TE),
            5 => Some(Position::K),
            16 => Some(Position::DEF),
            _ => None,
        }
    }

    /// ESPN lineup slot ids that hold this position.
    pub fn espn_slot_ids(&self) -> Vec<u8> {
        match self {
            Position::QB => vec![0],
            Position::RB => vec![2],
            Position::WR => vec![4],
            Position::TE => vec![6],
            Position::K => vec![17],
            Position::DEF => vec![16],
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            "DEF" | "D/ST" | "DST" => Ok(Position::DEF),
            _ => Err(FflError::InvalidId {
                kind: "position",
                value: s.to_string(),
            }),
        }
    }
}
