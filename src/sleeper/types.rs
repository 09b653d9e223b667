use crate::cli::types::{LeagueId, PlayerId, Position, Season, SeasonType, UserId};
use crate::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};


/// Sport key used by the catalog and state endpoints.
pub const SPORT_NFL: &str = "nfl";

/// Upstream sends `null` for empty lists and objects; treat it as the default.
fn de_null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Catalog entry for one player.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub player_id: PlayerId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub fantasy_positions: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub injury_status: Option<String>,
    #[serde(default)]
    pub search_rank: Option<u64>,
}

impl PlayerRecord {
    /// Stand-in for a rostered id the catalog does not know.
    pub fn placeholder(player_id: PlayerId) -> Self {
        Self {
            player_id,
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => format!("Unknown ({})", self.player_id),
        }
    }

    /// Holds at least one position a fantasy lineup can start.
    pub fn is_fantasy_relevant(&self) -> bool {
        self.fantasy_positions
            .iter()
            .any(|p| p.parse::<Position>().is_ok())
    }
}

/// Whole player catalog for one sport, keyed by player id.
pub type PlayerCatalog = HashMap<PlayerId, PlayerRecord>;

/// Parse the catalog payload (an object keyed by player id).
///
/// The map key wins over any `player_id` inside the record.
pub fn parse_catalog(value: Value) -> Result<PlayerCatalog> {
    let raw: HashMap<String, PlayerRecord> = serde_json::from_value(value)?;
    Ok(raw
        .into_iter()
        .map(|(id, mut record)| {
            let id = PlayerId::new(id);
            record.player_id = id.clone();
            (id, record)
        })
        .collect())
}

/// Win/loss and points-for bookkeeping on a roster.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RosterSettings {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub fpts: f64,
    #[serde(default)]
    pub fpts_decimal: f64,
}

impl RosterSettings {
    pub fn points_for(&self) -> f64 {
        self.fpts + self.fpts_decimal / 100.0
    }
}

/// One team's roster within a league.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RosterSnapshot {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub starters: Vec<PlayerId>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub players: Vec<PlayerId>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub reserve: Vec<PlayerId>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub taxi: Vec<PlayerId>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub settings: RosterSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// League member as listed by the league users endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LeagueUser {
    pub user_id: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub metadata: UserMetadata,
}

impl LeagueUser {
    pub fn team_name(&self) -> String {
        self.metadata
            .team_name
            .clone()
            .or_else(|| self.display_name.clone())
            .unwrap_or_else(|| self.user_id.to_string())
    }
}

/// Account returned by the user lookup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SleeperUser {
    pub user_id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Stat abbreviation → points awarded per unit (`rec`, `pass_yd`, `rush_td`, ...).
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ScoringConfig(pub BTreeMap<String, f64>);

impl ScoringConfig {
    /// Points per reception; `None` when the league does not score receptions.
    pub fn reception(&self) -> Option<f64> {
        self.0.get("rec").copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for ScoringConfig {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// League object returned by the league endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct League {
    pub league_id: LeagueId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_rosters: Option<u32>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub scoring_settings: ScoringConfig,
    #[serde(default, deserialize_with = "de_null_default")]
    pub roster_positions: Vec<String>,
}

/// Pull the scoring sub-object out of a raw league response.
pub fn extract_scoring(value: &Value) -> Result<ScoringConfig> {
    match value.get("scoring_settings") {
        Some(Value::Null) | None => Ok(ScoringConfig::default()),
        Some(scoring) => Ok(serde_json::from_value(scoring.clone())?),
    }
}

/// One roster's side of a weekly matchup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Matchup {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub starters: Vec<PlayerId>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub players: Vec<PlayerId>,
}

/// Active week and season as reported by the state endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NflState {
    pub week: u16,
    pub season: String,
    #[serde(default)]
    pub season_type: Option<String>,
    #[serde(default)]
    pub display_week: Option<u16>,
}

impl NflState {
    pub fn season(&self) -> Option<Season> {
        self.season.parse().ok()
    }

    /// Season type, defaulting to regular for values the API adds later.
    pub fn season_type(&self) -> SeasonType {
        self.season_type
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// Raw stat mapping for one player and one week (projected or actual).
///
/// Only numeric values are kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StatLine(BTreeMap<String, f64>);

impl StatLine {
    /// Accepts either a bare stat object or an entry wrapping one under `stats`.
    pub fn from_value(value: &Value) -> Self {
        let stats = match value.get("stats") {
            Some(inner @ Value::Object(_)) => inner,
            _ => value,
        };
        let map = stats
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                    .collect()
            })
            .unwrap_or_default();
        Self(map)
    }

    pub fn get(&self, stat: &str) -> Option<f64> {
        self.0.get(stat).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for StatLine {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Player id → stat line for one (season, week, season type).
pub type WeeklyStatMap = HashMap<PlayerId, StatLine>;

/// Week number → stat line for one player's season.
pub type SeasonSeries = BTreeMap<u16, StatLine>;

/// Parse a bulk weekly payload into a map keyed by player id.
///
/// Accepts the object form (`{"4046": {...}}`) and the list form
/// (`[{"player_id": "4046", "stats": {...}}]`); list rows without a
/// `player_id` are dropped.
pub fn parse_weekly_stat_map(value: Value) -> Result<WeeklyStatMap> {
    match value {
        Value::Object(obj) => Ok(obj
            .iter()
            .map(|(id, v)| (PlayerId::new(id.clone()), StatLine::from_value(v)))
            .collect()),
        Value::Array(rows) => Ok(rows
            .iter()
            .filter_map(|row| {
                let id = row.get("player_id")?.as_str()?;
                Some((PlayerId::new(id), StatLine::from_value(row)))
            })
            .collect()),
        Value::Null => Ok(WeeklyStatMap::new()),
        other => Err(crate::FflError::Json(format!(
            "expected player-keyed object or list, got {}",
            json_kind(&other)
        ))),
    }
}

/// Parse a per-player season payload (`{"1": {...}, "2": null, ...}`).
///
/// Weeks that are `null` or not numeric are dropped.
pub fn parse_season_series(value: Value) -> Result<SeasonSeries> {
    let obj = match value {
        Value::Object(obj) => obj,
        Value::Null => return Ok(SeasonSeries::new()),
        other => {
            return Err(crate::FflError::Json(format!(
                "expected week-keyed object, got {}",
                json_kind(&other)
            )))
        }
    };
    Ok(obj
        .iter()
        .filter(|(_, v)| !v.is_null())
        .filter_map(|(week, v)| Some((week.parse::<u16>().ok()?, StatLine::from_value(v))))
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
