//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use ffl_lineup::{config::Settings, storage::SnapshotStore, FantasyData};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const LEAGUE: &str = "784512";

pub fn service(server: &MockServer) -> FantasyData {
    FantasyData::with_snapshot(&Settings::for_base_url(&server.uri()), None).unwrap()
}

pub fn service_with_snapshot(server: &MockServer, store: Arc<SnapshotStore>) -> FantasyData {
    FantasyData::with_snapshot(&Settings::for_base_url(&server.uri()), Some(store)).unwrap()
}

pub async fn mount_json(server: &MockServer, at: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, at: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn catalog() -> Value {
    json!({
        "4046": {
            "player_id": "4046", "first_name": "Patrick", "last_name": "Mahomes",
            "team": "KC", "position": "QB", "fantasy_positions": ["QB"], "search_rank": 5
        },
        "6794": {
            "player_id": "6794", "first_name": "Justin", "last_name": "Jefferson",
            "team": "MIN", "position": "WR", "fantasy_positions": ["WR"], "search_rank": 2
        },
        "8137": {
            "player_id": "8137", "first_name": "George", "last_name": "Pickens",
            "team": "PIT", "position": "WR", "fantasy_positions": ["WR"], "search_rank": 40
        },
        "7001": {
            "player_id": "7001", "first_name": "Trey", "last_name": "Smith",
            "team": "KC", "position": "OL", "fantasy_positions": ["OL"], "search_rank": 900
        }
    })
}
