//! Projection and stat accessors, all in the 30-minute cache class.

use super::{
    cache_or_fetch,
    types::{parse_season_series, parse_weekly_stat_map, SeasonSeries, WeeklyStatMap},
    SleeperApi,
};
use crate::{
    cli::types::{PlayerId, Season, SeasonType, Week},
    core::{CacheClassStatus, CacheDurations, TtlCache},
    Result,
};
use std::sync::Arc;
use tracing::debug;

const BULK_CACHE_CAPACITY: usize = 64;
const PLAYER_CACHE_CAPACITY: usize = 2048;

/// Key of the league-wide weekly payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekKey {
    pub season: Season,
    pub week: Week,
    pub season_type: SeasonType,
}

/// Key of the per-player season payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerSeasonKey {
    pub player_id: PlayerId,
    pub season: Season,
    pub season_type: SeasonType,
}

#[derive(Clone)]
pub struct ProjectionCaches {
    pub bulk_projections: TtlCache<WeekKey, Arc<WeeklyStatMap>>,
    pub player_projections: TtlCache<PlayerSeasonKey, Arc<SeasonSeries>>,
    pub player_stats: TtlCache<PlayerSeasonKey, Arc<SeasonSeries>>,
    pub weekly_stats: TtlCache<WeekKey, Arc<WeeklyStatMap>>,
}

impl ProjectionCaches {
    pub fn new(durations: &CacheDurations) -> Self {
        let ttl = durations.projections;
        Self {
            bulk_projections: TtlCache::new("bulk_projections", ttl, BULK_CACHE_CAPACITY),
            player_projections: TtlCache::new("player_projections", ttl, PLAYER_CACHE_CAPACITY),
            player_stats: TtlCache::new("player_stats", ttl, PLAYER_CACHE_CAPACITY),
            weekly_stats: TtlCache::new("weekly_stats", ttl, BULK_CACHE_CAPACITY),
        }
    }

    pub fn statuses(&self) -> Vec<CacheClassStatus> {
        vec![
            self.bulk_projections.status(),
            self.player_projections.status(),
            self.player_stats.status(),
            self.weekly_stats.status(),
        ]
    }
}

/// Cache-or-fetch access to projections and actual stats.
#[derive(Clone)]
pub struct ProjectionData {
    api: SleeperApi,
    caches: ProjectionCaches,
}

impl ProjectionData {
    pub fn new(api: SleeperApi, durations: &CacheDurations) -> Self {
        Self {
            api,
            caches: ProjectionCaches::new(durations),
        }
    }

    pub fn caches(&self) -> &ProjectionCaches {
        &self.caches
    }

    /// Empty every projection/stat cache. League and catalog caches are untouched.
    pub fn clear(&self) {
        self.caches.bulk_projections.clear();
        self.caches.player_projections.clear();
        self.caches.player_stats.clear();
        self.caches.weekly_stats.clear();
        debug!("projection caches cleared");
    }

    /// Projections for every fantasy-position player in one week.
    pub async fn bulk_projections(
        &self,
        season: Season,
        week: Week,
        season_type: SeasonType,
    ) -> Result<Arc<WeeklyStatMap>> {
        let key = WeekKey {
            season,
            week,
            season_type,
        };
        let request = self
            .api
            .endpoints()
            .bulk_projections(season, week, season_type);
        cache_or_fetch(&self.api, &self.caches.bulk_projections, key, request, |v| {
            Ok(Arc::new(parse_weekly_stat_map(v)?))
        })
        .await
    }

    /// One player's projections for the season, by week.
    pub async fn player_projections(
        &self,
        player_id: &PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Result<Arc<SeasonSeries>> {
        let key = PlayerSeasonKey {
            player_id: player_id.clone(),
            season,
            season_type,
        };
        let request = self
            .api
            .endpoints()
            .player_projections(player_id, season, season_type);
        cache_or_fetch(&self.api, &self.caches.player_projections, key, request, |v| {
            Ok(Arc::new(parse_season_series(v)?))
        })
        .await
    }

    /// One player's actual stats for the season, by week.
    pub async fn player_stats(
        &self,
        player_id: &PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Result<Arc<SeasonSeries>> {
        let key = PlayerSeasonKey {
            player_id: player_id.clone(),
            season,
            season_type,
        };
        let request = self
            .api
            .endpoints()
            .player_stats(player_id, season, season_type);
        cache_or_fetch(&self.api, &self.caches.player_stats, key, request, |v| {
            Ok(Arc::new(parse_season_series(v)?))
        })
        .await
    }

    /// League-wide actual stats for one week, keyed by player id.
    pub async fn weekly_stats(
        &self,
        season: Season,
        week: Week,
        season_type: SeasonType,
    ) -> Result<Arc<WeeklyStatMap>> {
        let key = WeekKey {
            season,
            week,
            season_type,
        };
        let request = self.api.endpoints().bulk_stats(season, week, season_type);
        cache_or_fetch(&self.api, &self.caches.weekly_stats, key, request, |v| {
            Ok(Arc::new(parse_weekly_stat_map(v)?))
        })
        .await
    }
}
