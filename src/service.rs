//! Process-wide service wiring and the cache administration surface.

use crate::{
    cli::types::{Season, SeasonType, UserId, Week},
    config::Settings,
    core::{build_http_client, CacheClassStatus, RateLimitStatus, RateLimitedClient, RetryPolicy},
    enrich::{
        enrich_group, split_roster, EnrichContext, EnrichedLineup, LineupRequest, RosterOwner,
        ScoringClass,
    },
    espn::EspnClient,
    sleeper::{
        types::{PlayerCatalog, ScoringConfig, WeeklyStatMap, SPORT_NFL},
        LeagueData, ProjectionData, SleeperApi, SleeperEndpoints,
    },
    storage::SnapshotStore,
    Result,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Rate-limit consumption of one upstream client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRateLimit {
    pub api: &'static str,
    #[serde(flatten)]
    pub status: RateLimitStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatusReport {
    pub caches: Vec<CacheClassStatus>,
    pub rate_limits: Vec<ApiRateLimit>,
}

/// Every accessor, cache and client of one process.
///
/// Construct one per process (or per test) and share it by reference or
/// clone; clones share all state.
#[derive(Clone)]
pub struct FantasyData {
    league: LeagueData,
    projections: ProjectionData,
    espn: EspnClient,
    sleeper_client: RateLimitedClient,
}

impl FantasyData {
    pub fn new(settings: &Settings) -> Result<Self> {
        let snapshot = match &settings.snapshot_db {
            Some(path) => match SnapshotStore::open(path) {
                Ok(store) => Some(Arc::new(store)),
                Err(e) => {
                    warn!(path = %path.display(), error = %format!("{e:#}"), "snapshot store unavailable");
                    None
                }
            },
            None => None,
        };
        Self::with_snapshot(settings, snapshot)
    }

    /// Like [`FantasyData::new`] with an explicit snapshot store.
    pub fn with_snapshot(settings: &Settings, snapshot: Option<Arc<SnapshotStore>>) -> Result<Self> {
        let http = build_http_client(settings.request_timeout)?;
        let sleeper_client = RateLimitedClient::new(
            "sleeper",
            settings.rate_limit_per_minute,
            RetryPolicy::default(),
        );
        let espn_client = RateLimitedClient::new(
            "espn",
            settings.espn_rate_limit_per_minute,
            RetryPolicy::default(),
        );

        let api = SleeperApi::new(
            sleeper_client.clone(),
            http.clone(),
            SleeperEndpoints::new(&settings.sleeper_api_url, &settings.sleeper_data_url),
        );
        let durations = &settings.cache_durations;

        Ok(Self {
            league: LeagueData::new(api.clone(), durations, snapshot),
            projections: ProjectionData::new(api, durations),
            espn: EspnClient::new(espn_client, http, settings.espn_proxy_url.clone()),
            sleeper_client,
        })
    }

    pub fn league(&self) -> &LeagueData {
        &self.league
    }

    pub fn projections(&self) -> &ProjectionData {
        &self.projections
    }

    pub fn espn(&self) -> &EspnClient {
        &self.espn
    }

    /// Per-class cache state plus each client's rate-limit consumption.
    pub fn cache_status(&self) -> CacheStatusReport {
        let mut caches = self.league.caches().statuses();
        caches.extend(self.projections.caches().statuses());
        CacheStatusReport {
            caches,
            rate_limits: vec![
                ApiRateLimit {
                    api: self.sleeper_client.name(),
                    status: self.sleeper_client.status(),
                },
                ApiRateLimit {
                    api: self.espn.client().name(),
                    status: self.espn.client().status(),
                },
            ],
        }
    }

    /// Wipe every cache class and both pending-request registries.
    pub fn clear_all_caches(&self) {
        self.league.clear();
        self.projections.clear();
        self.sleeper_client.clear_pending();
        self.espn.client().clear_pending();
        info!("all caches cleared");
    }

    /// Enrich one roster.
    ///
    /// Fails only when the roster itself cannot be loaded (or the owner
    /// cannot be resolved); missing enrichment inputs degrade to zeros.
    pub async fn enriched_lineup(&self, request: &LineupRequest) -> Result<EnrichedLineup> {
        if request.options.force_refresh {
            self.projections.clear();
        }

        let owner = self.resolve_owner(&request.owner).await?;
        let roster = self
            .league
            .roster_for_owner(&request.league_id, &owner)
            .await?;

        let (season, week, season_type) = self.resolve_timing(request).await;

        let catalog = match self.league.players(SPORT_NFL).await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "player catalog unavailable, using placeholder names");
                Arc::new(PlayerCatalog::new())
            }
        };

        let scoring_class = match request.options.scoring_override {
            Some(class) => class,
            None => {
                let scoring = self
                    .league
                    .scoring_settings(&request.league_id)
                    .await
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "scoring settings unavailable, using default class");
                        ScoringConfig::default()
                    });
                ScoringClass::from_config(&scoring)
            }
        };
        let points_field = scoring_class.points_field();

        let projections = self
            .projections
            .bulk_projections(season, week, season_type)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, %week, "bulk projections unavailable");
                Arc::new(WeeklyStatMap::new())
            });
        let history = match week.previous() {
            Some(prior) => self
                .projections
                .weekly_stats(season, prior, season_type)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, week = %prior, "previous week stats unavailable");
                    Arc::new(WeeklyStatMap::new())
                }),
            None => Arc::new(WeeklyStatMap::new()),
        };

        let groups = split_roster(&roster, &catalog);
        let ctx = EnrichContext {
            projections: &projections,
            history: &history,
            points_field,
            week,
            season,
            season_type,
        };
        let starters = enrich_group(&self.projections, &groups.starters, &ctx).await;
        let bench = enrich_group(&self.projections, &groups.bench, &ctx).await;
        let reserve = enrich_group(&self.projections, &groups.reserve, &ctx).await;

        let lineup = EnrichedLineup {
            league_id: request.league_id.clone(),
            roster_id: roster.roster_id,
            owner_id: roster.owner_id.clone(),
            season,
            week,
            season_type,
            scoring_class,
            points_field,
            starters,
            bench,
            reserve,
        };
        info!(
            roster_id = lineup.roster_id,
            players = lineup.player_count(),
            partial_failures = lineup.failures().count(),
            %scoring_class,
            "lineup enriched"
        );
        Ok(lineup)
    }

    async fn resolve_owner(&self, owner: &RosterOwner) -> Result<UserId> {
        match owner {
            RosterOwner::UserId(id) => Ok(id.clone()),
            RosterOwner::Username(name) => Ok(self.league.user(name).await?.user_id),
        }
    }

    /// Explicit values win; gaps are filled from the state endpoint, then defaults.
    async fn resolve_timing(&self, request: &LineupRequest) -> (Season, Week, SeasonType) {
        if let (Some(season), Some(week)) = (request.season, request.week) {
            return (season, week, request.season_type.unwrap_or_default());
        }
        let state = self
            .league
            .nfl_state()
            .await
            .map_err(|e| warn!(error = %e, "current state unavailable, using defaults"))
            .ok();

        let season = request
            .season
            .or_else(|| state.as_ref().and_then(|s| s.season()))
            .unwrap_or_default();
        let week = request
            .week
            .or_else(|| state.as_ref().map(|s| Week::new(s.week.max(1))))
            .unwrap_or_default();
        let season_type = request
            .season_type
            .or_else(|| state.as_ref().map(|s| s.season_type()))
            .unwrap_or_default();
        (season, week, season_type)
    }
}
