//! URL and query builders for the primary platform.

use crate::cli::types::{LeagueId, PlayerId, Position, Season, SeasonType, Week};

/// A request target: absolute URL plus query pairs in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    fn bare(url: String) -> Self {
        Self { url, query: vec![] }
    }
}

/// Endpoint builder over the two primary bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleeperEndpoints {
    api: String,
    data: String,
}

fn position_params() -> impl Iterator<Item = (String, String)> {
    Position::FANTASY
        .iter()
        .map(|p| ("position[]".to_string(), p.to_string()))
}

impl SleeperEndpoints {
    pub fn new(api: &str, data: &str) -> Self {
        Self {
            api: api.trim_end_matches('/').to_string(),
            data: data.trim_end_matches('/').to_string(),
        }
    }

    pub fn user(&self, username: &str) -> Request {
        Request::bare(format!("{}/v1/user/{username}", self.api))
    }

    pub fn league(&self, league_id: &LeagueId) -> Request {
        Request::bare(format!("{}/v1/league/{league_id}", self.api))
    }

    pub fn rosters(&self, league_id: &LeagueId) -> Request {
        Request::bare(format!("{}/v1/league/{league_id}/rosters", self.api))
    }

    pub fn users(&self, league_id: &LeagueId) -> Request {
        Request::bare(format!("{}/v1/league/{league_id}/users", self.api))
    }

    pub fn matchups(&self, league_id: &LeagueId, week: Week) -> Request {
        Request::bare(format!(
            "{}/v1/league/{league_id}/matchups/{week}",
            self.api
        ))
    }

    pub fn players(&self, sport: &str) -> Request {
        Request::bare(format!("{}/v1/players/{sport}", self.api))
    }

    pub fn state(&self, sport: &str) -> Request {
        Request::bare(format!("{}/v1/state/{sport}", self.api))
    }

    /// Weekly projections for every fantasy position.
    pub fn bulk_projections(&self, season: Season, week: Week, season_type: SeasonType) -> Request {
        Request {
            url: format!(
                "{}/v1/projections/nfl/{season_type}/{season}/{week}",
                self.api
            ),
            query: position_params().collect(),
        }
    }

    /// League-wide actual stats for one week (list response).
    pub fn bulk_stats(&self, season: Season, week: Week, season_type: SeasonType) -> Request {
        let mut query = vec![("season_type".to_string(), season_type.to_string())];
        query.extend(position_params());
        Request {
            url: format!("{}/stats/nfl/{season}/{week}", self.data),
            query,
        }
    }

    /// One player's projections for a whole season, grouped by week.
    pub fn player_projections(
        &self,
        player_id: &PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Request {
        Request {
            url: format!("{}/projections/nfl/player/{player_id}", self.data),
            query: player_season_query(season, season_type),
        }
    }

    /// One player's actual stats for a whole season, grouped by week.
    pub fn player_stats(
        &self,
        player_id: &PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Request {
        Request {
            url: format!("{}/stats/nfl/player/{player_id}", self.data),
            query: player_season_query(season, season_type),
        }
    }
}

fn player_season_query(season: Season, season_type: SeasonType) -> Vec<(String, String)> {
    vec![
        ("season_type".to_string(), season_type.to_string()),
        ("season".to_string(), season.to_string()),
        ("grouping".to_string(), "week".to_string()),
    ]
}
