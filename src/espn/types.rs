use crate::{cli::types::Position, enrich::RosterRole, FflError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};


/// Lineup slot for the bench.
pub const BENCH_SLOT: u8 = 20;
/// Lineup slot for injured reserve.
pub const IR_SLOT: u8 = 21;

/// Type-safe wrapper for secondary-platform league ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EspnLeagueId(pub u32);

impl EspnLeagueId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EspnLeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EspnLeagueId {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| FflError::InvalidId {
                kind: "ESPN league id",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EspnPlayer {
    pub id: i64,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "defaultPositionId", default)]
    pub default_position_id: i32,
    #[serde(rename = "proTeamId", default)]
    pub pro_team_id: Option<u32>,
    #[serde(rename = "injuryStatus", default)]
    pub injury_status: Option<String>,
}

impl EspnPlayer {
    pub fn position(&self) -> Option<Position> {
        Position::from_espn_id(self.default_position_id)
    }

    pub fn name(&self) -> String {
        self.full_name
            .clone()
            .unwrap_or_else(|| format!("Unknown ({})", self.id))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerPoolEntry {
    pub player: EspnPlayer,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RosterEntry {
    #[serde(rename = "playerId")]
    pub player_id: i64,
    #[serde(rename = "lineupSlotId")]
    pub lineup_slot_id: u8,
    #[serde(rename = "playerPoolEntry", default)]
    pub player_pool_entry: Option<PlayerPoolEntry>,
}

impl RosterEntry {
    pub fn role(&self) -> RosterRole {
        match self.lineup_slot_id {
            BENCH_SLOT => RosterRole::Bench,
            IR_SLOT => RosterRole::Reserve,
            _ => RosterRole::Starter,
        }
    }

    pub fn player(&self) -> Option<&EspnPlayer> {
        self.player_pool_entry.as_ref().map(|e| &e.player)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct EspnRoster {
    #[serde(default)]
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EspnTeam {
    pub id: u32,
    #[serde(default)]
    pub abbrev: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub roster: EspnRoster,
}

impl EspnTeam {
    /// Newer leagues send `name`; older ones split it into location and nickname.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match (&self.location, &self.nickname) {
            (Some(l), Some(n)) => format!("{l} {n}"),
            (Some(s), None) | (None, Some(s)) => s.clone(),
            (None, None) => format!("Team {}", self.id),
        }
    }
}

/// Root of the `mRoster` view
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EspnLeague {
    pub id: u32,
    #[serde(rename = "seasonId", default)]
    pub season_id: Option<u16>,
    #[serde(rename = "scoringPeriodId", default)]
    pub scoring_period_id: Option<u16>,
    #[serde(default)]
    pub teams: Vec<EspnTeam>,
}

impl EspnLeague {
    pub fn team(&self, team_id: u32) -> Option<&EspnTeam> {
        self.teams.iter().find(|t| t.id == team_id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchupSide {
    #[serde(rename = "teamId")]
    pub team_id: u32,
    #[serde(rename = "totalPoints", default)]
    pub total_points: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EspnMatchup {
    pub id: u32,
    #[serde(rename = "matchupPeriodId")]
    pub matchup_period_id: u16,
    pub home: MatchupSide,
    /// Absent on bye weeks.
    #[serde(default)]
    pub away: Option<MatchupSide>,
    #[serde(default)]
    pub winner: Option<String>,
}

/// Root of the `mMatchupScore` view
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EspnSchedule {
    #[serde(default)]
    pub schedule: Vec<EspnMatchup>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EspnFreeAgent {
    pub id: i64,
    #[serde(default)]
    pub status: Option<String>,
    pub player: EspnPlayer,
}

/// Root of the `kona_player_info` view
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EspnPlayerList {
    #[serde(default)]
    pub players: Vec<EspnFreeAgent>,
}
