//! Helpers shared across commands: id resolution and output.

use crate::{
    config::{ESPN_LEAGUE_ID_ENV_VAR, LEAGUE_ID_ENV_VAR, USERNAME_ENV_VAR},
    enrich::RosterOwner,
    espn::EspnLeagueId,
    FflError, LeagueId, Result, UserId,
};
use serde::Serialize;

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Flag first, then `FFL_SLEEPER_LEAGUE_ID`.
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    match league_id {
        Some(id) => Ok(id),
        None => env_value(LEAGUE_ID_ENV_VAR)
            .ok_or_else(|| FflError::MissingConfig {
                env_var: LEAGUE_ID_ENV_VAR.to_string(),
            })?
            .parse(),
    }
}

/// Owner id flag, then username flag, then `FFL_SLEEPER_USERNAME`.
pub fn resolve_owner(owner_id: Option<UserId>, username: Option<String>) -> Result<RosterOwner> {
    if let Some(id) = owner_id {
        return Ok(RosterOwner::UserId(id));
    }
    username
        .or_else(|| env_value(USERNAME_ENV_VAR))
        .map(RosterOwner::Username)
        .ok_or_else(|| FflError::MissingConfig {
            env_var: USERNAME_ENV_VAR.to_string(),
        })
}

/// Flag first, then `FFL_ESPN_LEAGUE_ID`.
pub fn resolve_espn_league_id(league_id: Option<EspnLeagueId>) -> Result<EspnLeagueId> {
    match league_id {
        Some(id) => Ok(id),
        None => env_value(ESPN_LEAGUE_ID_ENV_VAR)
            .ok_or_else(|| FflError::MissingConfig {
                env_var: ESPN_LEAGUE_ID_ENV_VAR.to_string(),
            })?
            .parse(),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Points with one decimal, the way every table prints them.
pub fn fmt_points(points: f64) -> String {
    format!("{points:.1}")
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
