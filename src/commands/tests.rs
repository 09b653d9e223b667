//! Tests for id resolution shared by the command handlers

use super::*;
use crate::config::{ESPN_LEAGUE_ID_ENV_VAR, LEAGUE_ID_ENV_VAR, USERNAME_ENV_VAR};
use crate::{enrich::RosterOwner, espn::EspnLeagueId, FflError, LeagueId, UserId};
use std::sync::Mutex;

// Tests that touch process environment run one at a time
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_resolve_league_id_from_option() {
    let id = resolve_league_id(Some(LeagueId::new("12345"))).unwrap();
    assert_eq!(id.as_str(), "12345");
}

#[test]
fn test_resolve_league_id_from_env() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(LEAGUE_ID_ENV_VAR, "54321");

    let id = resolve_league_id(None).unwrap();
    assert_eq!(id.as_str(), "54321");

    std::env::remove_var(LEAGUE_ID_ENV_VAR);
}

#[test]
fn test_resolve_league_id_missing() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var(LEAGUE_ID_ENV_VAR);

    match resolve_league_id(None) {
        Err(FflError::MissingConfig { env_var }) => assert_eq!(env_var, LEAGUE_ID_ENV_VAR),
        other => panic!("Expected MissingConfig error, got {other:?}"),
    }
}

#[test]
fn test_resolve_league_id_invalid_env() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(LEAGUE_ID_ENV_VAR, "not_a_number");

    assert!(matches!(
        resolve_league_id(None),
        Err(FflError::InvalidId { .. })
    ));

    std::env::remove_var(LEAGUE_ID_ENV_VAR);
}

#[test]
fn test_resolve_owner_precedence() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(USERNAME_ENV_VAR, "from_env");

    assert_eq!(
        resolve_owner(Some(UserId::new("u1")), Some("alice".to_string())).unwrap(),
        RosterOwner::UserId(UserId::new("u1"))
    );
    assert_eq!(
        resolve_owner(None, Some("alice".to_string())).unwrap(),
        RosterOwner::Username("alice".to_string())
    );
    assert_eq!(
        resolve_owner(None, None).unwrap(),
        RosterOwner::Username("from_env".to_string())
    );

    std::env::remove_var(USERNAME_ENV_VAR);
    assert!(matches!(
        resolve_owner(None, None),
        Err(FflError::MissingConfig { .. })
    ));
}

#[test]
fn test_resolve_espn_league_id() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var(ESPN_LEAGUE_ID_ENV_VAR);
    assert!(resolve_espn_league_id(None).is_err());

    std::env::set_var(ESPN_LEAGUE_ID_ENV_VAR, "123456");
    assert_eq!(resolve_espn_league_id(None).unwrap(), EspnLeagueId::new(123456));
    std::env::remove_var(ESPN_LEAGUE_ID_ENV_VAR);
}

#[test]
fn test_fmt_points() {
    assert_eq!(common::fmt_points(14.24), "14.2");
    assert_eq!(common::fmt_points(0.0), "0.0");
    assert_eq!(common::or_dash(None), "-");
}
