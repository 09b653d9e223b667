//! Secondary platform client.
//!
//! Live calls go through a server-side proxy and their own rate-limited
//! client. Without a proxy no request is made and bundled fixture payloads
//! stand in for the responses.

use super::{
    filters::{free_agent_filter, IntoHeaderValue, FANTASY_FILTER_HEADER},
    types::{EspnFreeAgent, EspnLeague, EspnLeagueId, EspnMatchup, EspnPlayerList, EspnSchedule},
};
use crate::{
    cli::types::{Position, Season, Week},
    core::{get_json, request_key, RateLimitedClient},
    Result,
};
use reqwest::header::{HeaderMap, HeaderName};
use serde_json::Value;
use tracing::{info, warn};

#[cfg(test)]
mod tests;

/// Path of the league resource under the platform (or proxy) root.
pub const FFL_LEAGUE_PATH: &str = "apis/v3/games/ffl/seasons";

const ROSTER_FIXTURE: &str = include_str!("fixtures/roster.json");
const MATCHUP_FIXTURE: &str = include_str!("fixtures/matchups.json");
const FREE_AGENT_FIXTURE: &str = include_str!("fixtures/free_agents.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EspnSource {
    Proxy(String),
    Fixtures,
}

/// Roster, matchup and free-agent access to the secondary platform.
#[derive(Clone)]
pub struct EspnClient {
    client: RateLimitedClient,
    http: reqwest::Client,
    source: EspnSource,
}

impl EspnClient {
    pub fn new(client: RateLimitedClient, http: reqwest::Client, proxy_url: Option<String>) -> Self {
        let source = match proxy_url {
            Some(url) => EspnSource::Proxy(url.trim_end_matches('/').to_string()),
            None => EspnSource::Fixtures,
        };
        Self {
            client,
            http,
            source,
        }
    }

    pub fn source(&self) -> &EspnSource {
        &self.source
    }

    pub fn is_live(&self) -> bool {
        matches!(self.source, EspnSource::Proxy(_))
    }

    pub fn client(&self) -> &RateLimitedClient {
        &self.client
    }

    /// Every team with its roster (`mRoster` view).
    pub async fn rosters(&self, league_id: EspnLeagueId, season: Season) -> Result<EspnLeague> {
        let value = self
            .fetch(league_id, season, "mRoster", vec![], None, ROSTER_FIXTURE)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Matchups of one scoring period (`mMatchupScore` view).
    pub async fn matchups(
        &self,
        league_id: EspnLeagueId,
        season: Season,
        week: Week,
    ) -> Result<Vec<EspnMatchup>> {
        let query = vec![("scoringPeriodId".to_string(), week.to_string())];
        let value = self
            .fetch(league_id, season, "mMatchupScore", query, None, MATCHUP_FIXTURE)
            .await?;
        let schedule: EspnSchedule = serde_json::from_value(value)?;
        Ok(schedule
            .schedule
            .into_iter()
            .filter(|m| m.matchup_period_id == week.as_u16())
            .collect())
    }

    /// Available players at `positions` (all when empty), most owned first.
    pub async fn free_agents(
        &self,
        league_id: EspnLeagueId,
        season: Season,
        week: Week,
        positions: &[Position],
        limit: u32,
    ) -> Result<Vec<EspnFreeAgent>> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(FANTASY_FILTER_HEADER),
            free_agent_filter(positions, limit).to_header_value()?,
        );
        let query = vec![("scoringPeriodId".to_string(), week.to_string())];
        let value = self
            .fetch(
                league_id,
                season,
                "kona_player_info",
                query,
                Some(headers),
                FREE_AGENT_FIXTURE,
            )
            .await?;

        // The fixture is unfiltered, so the filter is applied here as well
        let list: EspnPlayerList = serde_json::from_value(value)?;
        Ok(list
            .players
            .into_iter()
            .filter(|fa| {
                positions.is_empty()
                    || fa.player.position().is_some_and(|p| positions.contains(&p))
            })
            .take(limit as usize)
            .collect())
    }

    async fn fetch(
        &self,
        league_id: EspnLeagueId,
        season: Season,
        view: &'static str,
        mut query: Vec<(String, String)>,
        headers: Option<HeaderMap>,
        fixture: &'static str,
    ) -> Result<Value> {
        let base = match &self.source {
            EspnSource::Proxy(base) => base,
            EspnSource::Fixtures => {
                warn!(view, %league_id, "no ESPN proxy configured, serving bundled fixture");
                return Ok(serde_json::from_str(fixture)?);
            }
        };

        let url = format!("{base}/{FFL_LEAGUE_PATH}/{season}/segments/0/leagues/{league_id}");
        query.insert(0, ("view".to_string(), view.to_string()));

        let mut key = request_key(&url, &query);
        if let Some(filter) = headers
            .as_ref()
            .and_then(|h| h.get(FANTASY_FILTER_HEADER))
            .and_then(|v| v.to_str().ok())
        {
            key.push('#');
            key.push_str(filter);
        }
        info!(key = %key, "fetching");

        let http = self.http.clone();
        self.client
            .call(key, move || {
                let http = http.clone();
                let url = url.clone();
                let query = query.clone();
                let headers = headers.clone();
                async move { get_json(&http, &url, &query, headers).await }
            })
            .await
    }
}
