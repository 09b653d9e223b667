//! Integration tests for the league accessors

mod common;

use common::{catalog, mount_json, mount_status, service, service_with_snapshot, LEAGUE};
use ffl_lineup::{
    enrich::ScoringClass, sleeper::types::SPORT_NFL, storage::SnapshotStore, FflError, LeagueId,
    PlayerId, UserId,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_league_fetched_once_then_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/league/784512"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "league_id": LEAGUE,
            "name": "Sunday Scaries",
            "season": "2024",
            "scoring_settings": {"rec": 0.5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service(&server);
    let league_id = LeagueId::new(LEAGUE);

    let (a, b) = tokio::join!(
        service.league().league(&league_id),
        service.league().league(&league_id)
    );
    assert_eq!(a.unwrap().name.as_deref(), Some("Sunday Scaries"));
    assert_eq!(b.unwrap().name.as_deref(), Some("Sunday Scaries"));

    let cached = service.league().league(&league_id).await.unwrap();
    assert_eq!(cached.season.as_deref(), Some("2024"));
}

#[tokio::test]
async fn test_scoring_settings_without_sub_object_is_standard() {
    let server = MockServer::start().await;
    mount_json(&server, "/v1/league/784512", json!({"league_id": LEAGUE})).await;

    let scoring = service(&server)
        .league()
        .scoring_settings(&LeagueId::new(LEAGUE))
        .await
        .unwrap();
    assert!(scoring.is_empty());
    assert_eq!(ScoringClass::from_config(&scoring), ScoringClass::Standard);
}

#[tokio::test]
async fn test_unknown_username_is_user_not_found() {
    let server = MockServer::start().await;
    mount_json(&server, "/v1/user/nobody", json!(null)).await;

    let err = service(&server).league().user("nobody").await.unwrap_err();
    assert!(matches!(err, FflError::UserNotFound { username } if username == "nobody"));
}

#[tokio::test]
async fn test_roster_for_unknown_owner_is_roster_not_found() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/v1/league/784512/rosters",
        json!([{"roster_id": 1, "owner_id": "u1", "players": ["4046"]}]),
    )
    .await;

    let service = service(&server);
    let league_id = LeagueId::new(LEAGUE);
    let found = service
        .league()
        .roster_for_owner(&league_id, &UserId::new("u1"))
        .await
        .unwrap();
    assert_eq!(found.roster_id, 1);

    let err = service
        .league()
        .roster_for_owner(&league_id, &UserId::new("u2"))
        .await
        .unwrap_err();
    assert!(matches!(err, FflError::RosterNotFound { owner } if owner == "u2"));
}

#[tokio::test]
async fn test_upstream_error_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/league/784512/users"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let service = service(&server);
    let league_id = LeagueId::new(LEAGUE);
    for _ in 0..2 {
        let err = service.league().users(&league_id).await.unwrap_err();
        assert!(matches!(err, FflError::UpstreamHttp { status: 503, .. }));
    }
}

#[tokio::test]
async fn test_catalog_falls_back_to_snapshot() {
    let store = Arc::new(SnapshotStore::open_in_memory().unwrap());

    let live = MockServer::start().await;
    mount_json(&live, "/v1/players/nfl", catalog()).await;
    let fresh = service_with_snapshot(&live, Arc::clone(&store))
        .league()
        .players(SPORT_NFL)
        .await
        .unwrap();
    assert_eq!(fresh.len(), 4);

    let down = MockServer::start().await;
    mount_status(&down, "/v1/players/nfl", 500).await;
    let restored = service_with_snapshot(&down, store)
        .league()
        .players(SPORT_NFL)
        .await
        .unwrap();

    // Only fantasy-relevant players are persisted
    assert_eq!(restored.len(), 3);
    let mahomes = &restored[&PlayerId::new("4046")];
    assert_eq!(mahomes.display_name(), "Patrick Mahomes");
    assert!(!restored.contains_key(&PlayerId::new("7001")));
}

#[tokio::test]
async fn test_catalog_without_snapshot_is_unavailable() {
    let server = MockServer::start().await;
    mount_status(&server, "/v1/players/nfl", 500).await;

    let err = service(&server)
        .league()
        .players(SPORT_NFL)
        .await
        .unwrap_err();
    assert!(matches!(err, FflError::PlayerDataUnavailable { sport } if sport == "nfl"));
}

#[tokio::test]
async fn test_free_agents_exclude_rostered_players() {
    let server = MockServer::start().await;
    mount_json(&server, "/v1/players/nfl", catalog()).await;
    mount_json(
        &server,
        "/v1/league/784512/rosters",
        json!([
            {"roster_id": 1, "owner_id": "u1", "players": ["6794"]},
            {"roster_id": 2, "owner_id": "u2", "players": [], "taxi": ["8137"]}
        ]),
    )
    .await;

    let free = service(&server)
        .league()
        .free_agents(&LeagueId::new(LEAGUE), SPORT_NFL, 10)
        .await
        .unwrap();
    let ids: Vec<String> = free.iter().map(|p| p.player_id.to_string()).collect();
    assert_eq!(ids, vec!["4046"]);
}
