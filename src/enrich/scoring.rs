//! Scoring classification and point-field selection.

use crate::{sleeper::types::ScoringConfig, FflError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A league's point-per-reception rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringClass {
    Standard,
    HalfPpr,
    FullPpr,
}

/// Stat field holding a player's fantasy points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointsField {
    #[serde(rename = "pts_half_ppr")]
    HalfPpr,
    #[serde(rename = "pts_ppr")]
    Ppr,
}

impl PointsField {
    pub fn key(&self) -> &'static str {
        match self {
            PointsField::HalfPpr => "pts_half_ppr",
            PointsField::Ppr => "pts_ppr",
        }
    }
}

impl fmt::Display for PointsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl ScoringClass {
    /// Classify by reception coefficient: 1 is full, 0.5 is half, anything
    /// else (0 or absent included) is standard.
    pub fn from_reception(coefficient: Option<f64>) -> Self {
        match coefficient {
            Some(c) if (c - 1.0).abs() < f64::EPSILON => ScoringClass::FullPpr,
            Some(c) if (c - 0.5).abs() < f64::EPSILON => ScoringClass::HalfPpr,
            _ => ScoringClass::Standard,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::from_reception(config.reception())
    }

    /// The upstream has no standard-scoring points field, so standard
    /// reads the half-PPR field.
    pub fn points_field(&self) -> PointsField {
        match self {
            ScoringClass::FullPpr => PointsField::Ppr,
            ScoringClass::HalfPpr | ScoringClass::Standard => PointsField::HalfPpr,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringClass::Standard => "std",
            ScoringClass::HalfPpr => "half",
            ScoringClass::FullPpr => "ppr",
        }
    }
}

impl fmt::Display for ScoringClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringClass {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "std" | "standard" => Ok(ScoringClass::Standard),
            "half" | "half_ppr" | "half-ppr" => Ok(ScoringClass::HalfPpr),
            "ppr" | "full" | "full_ppr" | "full-ppr" => Ok(ScoringClass::FullPpr),
            _ => Err(FflError::InvalidScoringClass {
                value: s.to_string(),
            }),
        }
    }
}
