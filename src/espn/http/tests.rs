use super::*;
use crate::core::{build_http_client, RetryPolicy};
use crate::enrich::RosterRole;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{header_exists, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn espn(proxy: Option<String>) -> EspnClient {
    EspnClient::new(
        RateLimitedClient::new("espn", 60, RetryPolicy::default()),
        build_http_client(Duration::from_secs(5)).unwrap(),
        proxy,
    )
}

const LEAGUE: EspnLeagueId = EspnLeagueId(123456);

#[tokio::test]
async fn test_fixture_rosters_without_proxy() {
    let client = espn(None);
    assert!(!client.is_live());

    let league = client.rosters(LEAGUE, Season::new(2025)).await.unwrap();
    assert_eq!(league.teams.len(), 2);
    let team = league.team(1).unwrap();
    assert_eq!(team.display_name(), "Motor City Maulers");

    let roles: Vec<RosterRole> = team.roster.entries.iter().map(|e| e.role()).collect();
    assert_eq!(roles.iter().filter(|r| **r == RosterRole::Bench).count(), 1);
    assert_eq!(roles.iter().filter(|r| **r == RosterRole::Reserve).count(), 1);
    // No request was admitted
    assert_eq!(client.client().status().count, 0);
}

#[tokio::test]
async fn test_fixture_matchups_filtered_by_week() {
    let matchups = espn(None)
        .matchups(LEAGUE, Season::new(2025), Week::new(1))
        .await
        .unwrap();
    assert_eq!(matchups.len(), 1);
    assert_eq!(matchups[0].winner.as_deref(), Some("HOME"));
}

#[tokio::test]
async fn test_fixture_free_agents_apply_positions_and_limit() {
    let client = espn(None);
    let wrs = client
        .free_agents(LEAGUE, Season::new(2025), Week::new(1), &[Position::WR], 10)
        .await
        .unwrap();
    let names: Vec<String> = wrs.iter().map(|fa| fa.player.name()).collect();
    assert_eq!(names, vec!["Romeo Doubs", "Rashee Rice"]);

    let top_two = client
        .free_agents(LEAGUE, Season::new(2025), Week::new(1), &[], 2)
        .await
        .unwrap();
    assert_eq!(top_two.len(), 2);
}

#[tokio::test]
async fn test_live_rosters_through_proxy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apis/v3/games/ffl/seasons/2024/segments/0/leagues/123456"))
        .and(query_param("view", "mRoster"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 123456,
            "teams": [{"id": 5, "name": "Proxy Team", "roster": {"entries": []}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = espn(Some(format!("{}/", server.uri())));
    assert!(client.is_live());
    let league = client.rosters(LEAGUE, Season::new(2024)).await.unwrap();
    assert_eq!(league.teams[0].display_name(), "Proxy Team");
    assert_eq!(client.client().status().count, 1);
}

#[tokio::test]
async fn test_live_free_agents_send_filter_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("view", "kona_player_info"))
        .and(query_param("scoringPeriodId", "3"))
        .and(header_exists("x-fantasy-filter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "players": [{
                "id": 1,
                "status": "FREEAGENT",
                "player": {"id": 1, "fullName": "Some Kicker", "defaultPositionId": 5}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let free_agents = espn(Some(server.uri()))
        .free_agents(LEAGUE, Season::new(2024), Week::new(3), &[Position::K], 5)
        .await
        .unwrap();
    assert_eq!(free_agents.len(), 1);
    assert_eq!(free_agents[0].player.position(), Some(Position::K));
}

#[tokio::test]
async fn test_live_upstream_error_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = espn(Some(server.uri()))
        .rosters(LEAGUE, Season::new(2024))
        .await
        .unwrap_err();
    assert!(matches!(err, crate::FflError::UpstreamHttp { status: 503, .. }));
}
