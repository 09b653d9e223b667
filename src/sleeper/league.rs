//! League-scoped accessors: rosters, users, scoring settings, matchups,
//! current state, user lookup, free agents and the player catalog.

use super::{
    cache_or_fetch,
    types::{
        extract_scoring, parse_catalog, League, LeagueUser, Matchup, NflState, PlayerCatalog,
        PlayerRecord, RosterSnapshot, ScoringConfig, SleeperUser, SPORT_NFL,
    },
    SleeperApi,
};
use crate::{
    cli::types::{LeagueId, PlayerId, UserId, Week},
    core::{CacheClassStatus, CacheDurations, TtlCache},
    storage::SnapshotStore,
    FflError, Result,
};
use std::{collections::HashSet, sync::Arc};
use tracing::{info, warn};

const LEAGUE_CACHE_CAPACITY: usize = 64;
const CATALOG_CACHE_CAPACITY: usize = 4;

/// The league data class (5 min) plus the player catalog class (24 h).
#[derive(Clone)]
pub struct LeagueCaches {
    pub players: TtlCache<String, Arc<PlayerCatalog>>,
    pub leagues: TtlCache<LeagueId, Arc<League>>,
    pub rosters: TtlCache<LeagueId, Arc<Vec<RosterSnapshot>>>,
    pub users: TtlCache<LeagueId, Arc<Vec<LeagueUser>>>,
    pub scoring: TtlCache<LeagueId, ScoringConfig>,
    pub matchups: TtlCache<(LeagueId, Week), Arc<Vec<Matchup>>>,
    pub state: TtlCache<String, NflState>,
}

impl LeagueCaches {
    pub fn new(durations: &CacheDurations) -> Self {
        let league = durations.league;
        Self {
            players: TtlCache::new("players", durations.player_catalog, CATALOG_CACHE_CAPACITY),
            leagues: TtlCache::new("league", league, LEAGUE_CACHE_CAPACITY),
            rosters: TtlCache::new("rosters", league, LEAGUE_CACHE_CAPACITY),
            users: TtlCache::new("users", league, LEAGUE_CACHE_CAPACITY),
            scoring: TtlCache::new("scoring_settings", league, LEAGUE_CACHE_CAPACITY),
            matchups: TtlCache::new("matchups", league, LEAGUE_CACHE_CAPACITY),
            state: TtlCache::new("nfl_state", league, CATALOG_CACHE_CAPACITY),
        }
    }

    pub fn clear(&self) {
        self.players.clear();
        self.leagues.clear();
        self.rosters.clear();
        self.users.clear();
        self.scoring.clear();
        self.matchups.clear();
        self.state.clear();
    }

    pub fn statuses(&self) -> Vec<CacheClassStatus> {
        vec![
            self.players.status(),
            self.leagues.status(),
            self.rosters.status(),
            self.users.status(),
            self.scoring.status(),
            self.matchups.status(),
            self.state.status(),
        ]
    }
}

/// Cache-or-fetch access to league data.
///
/// Clones share caches, the client and the snapshot store.
#[derive(Clone)]
pub struct LeagueData {
    api: SleeperApi,
    caches: LeagueCaches,
    snapshot: Option<Arc<SnapshotStore>>,
}

impl LeagueData {
    pub fn new(
        api: SleeperApi,
        durations: &CacheDurations,
        snapshot: Option<Arc<SnapshotStore>>,
    ) -> Self {
        Self {
            api,
            caches: LeagueCaches::new(durations),
            snapshot,
        }
    }

    pub fn caches(&self) -> &LeagueCaches {
        &self.caches
    }

    pub fn clear(&self) {
        self.caches.clear();
    }

    pub async fn league(&self, league_id: &LeagueId) -> Result<Arc<League>> {
        let request = self.api.endpoints().league(league_id);
        cache_or_fetch(&self.api, &self.caches.leagues, league_id.clone(), request, |v| {
            Ok(Arc::new(serde_json::from_value(v)?))
        })
        .await
    }

    pub async fn rosters(&self, league_id: &LeagueId) -> Result<Arc<Vec<RosterSnapshot>>> {
        let request = self.api.endpoints().rosters(league_id);
        cache_or_fetch(&self.api, &self.caches.rosters, league_id.clone(), request, |v| {
            Ok(Arc::new(serde_json::from_value(v)?))
        })
        .await
    }

    pub async fn users(&self, league_id: &LeagueId) -> Result<Arc<Vec<LeagueUser>>> {
        let request = self.api.endpoints().users(league_id);
        cache_or_fetch(&self.api, &self.caches.users, league_id.clone(), request, |v| {
            Ok(Arc::new(serde_json::from_value(v)?))
        })
        .await
    }

    /// Scoring sub-object of the league; the cached value is the sub-object only.
    pub async fn scoring_settings(&self, league_id: &LeagueId) -> Result<ScoringConfig> {
        let request = self.api.endpoints().league(league_id);
        cache_or_fetch(&self.api, &self.caches.scoring, league_id.clone(), request, |v| {
            extract_scoring(&v)
        })
        .await
    }

    pub async fn matchups(&self, league_id: &LeagueId, week: Week) -> Result<Arc<Vec<Matchup>>> {
        let request = self.api.endpoints().matchups(league_id, week);
        cache_or_fetch(
            &self.api,
            &self.caches.matchups,
            (league_id.clone(), week),
            request,
            |v| Ok(Arc::new(serde_json::from_value(v)?)),
        )
        .await
    }

    /// Active week and season.
    pub async fn nfl_state(&self) -> Result<NflState> {
        let request = self.api.endpoints().state(SPORT_NFL);
        cache_or_fetch(&self.api, &self.caches.state, SPORT_NFL.to_string(), request, |v| {
            Ok(serde_json::from_value(v)?)
        })
        .await
    }

    /// Look up an account by username. Not cached.
    pub async fn user(&self, username: &str) -> Result<SleeperUser> {
        let value = self.api.fetch(self.api.endpoints().user(username)).await?;
        // Unknown usernames come back as 200 with a null body
        if value.is_null() {
            return Err(FflError::UserNotFound {
                username: username.to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The roster owned by `owner`.
    pub async fn roster_for_owner(
        &self,
        league_id: &LeagueId,
        owner: &UserId,
    ) -> Result<RosterSnapshot> {
        self.rosters(league_id)
            .await?
            .iter()
            .find(|r| r.owner_id.as_ref() == Some(owner))
            .cloned()
            .ok_or_else(|| FflError::RosterNotFound {
                owner: owner.to_string(),
            })
    }

    /// Player catalog for `sport`.
    ///
    /// On a cache miss with a failed live fetch, falls back to the persisted
    /// snapshot while it is younger than the catalog duration.
    pub async fn players(&self, sport: &str) -> Result<Arc<PlayerCatalog>> {
        let key = sport.to_string();
        if let Some(hit) = self.caches.players.get(&key) {
            return Ok(hit);
        }

        let request = self.api.endpoints().players(sport);
        match self.api.fetch(request).await.and_then(parse_catalog) {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                info!(sport, players = catalog.len(), "player catalog refreshed");
                self.caches.players.put(key, Arc::clone(&catalog));
                self.write_snapshot(sport, &catalog);
                Ok(catalog)
            }
            Err(e) => {
                warn!(sport, error = %e, "player catalog fetch failed, trying snapshot");
                self.read_snapshot(sport)
                    .map(Arc::new)
                    .ok_or_else(|| FflError::PlayerDataUnavailable {
                        sport: sport.to_string(),
                    })
            }
        }
    }

    fn write_snapshot(&self, sport: &str, catalog: &PlayerCatalog) {
        let Some(store) = &self.snapshot else { return };
        match store.save_catalog(sport, catalog) {
            Ok(saved) => info!(sport, saved, "player snapshot written"),
            Err(e) => warn!(sport, error = %format!("{e:#}"), "player snapshot write failed"),
        }
    }

    fn read_snapshot(&self, sport: &str) -> Option<PlayerCatalog> {
        let store = self.snapshot.as_ref()?;
        match store.load_catalog(sport, self.caches.players.ttl()) {
            Ok(Some(catalog)) => {
                info!(sport, players = catalog.len(), "serving player catalog from snapshot");
                Some(catalog)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(sport, error = %format!("{e:#}"), "player snapshot read failed");
                None
            }
        }
    }

    /// Fantasy-relevant catalog players on no roster in the league, best
    /// search rank first.
    pub async fn free_agents(
        &self,
        league_id: &LeagueId,
        sport: &str,
        limit: usize,
    ) -> Result<Vec<PlayerRecord>> {
        let rosters = self.rosters(league_id).await?;
        let catalog = self.players(sport).await?;
        Ok(rank_free_agents(&rosters, &catalog, limit))
    }
}

fn rank_free_agents(
    rosters: &[RosterSnapshot],
    catalog: &PlayerCatalog,
    limit: usize,
) -> Vec<PlayerRecord> {
    let rostered: HashSet<&PlayerId> = rosters
        .iter()
        .flat_map(|r| r.players.iter().chain(&r.reserve).chain(&r.taxi))
        .collect();

    let mut available: Vec<&PlayerRecord> = catalog
        .values()
        .filter(|p| p.is_fantasy_relevant() && !rostered.contains(&p.player_id))
        .collect();
    available.sort_by_key(|p| (p.search_rank.unwrap_or(u64::MAX), p.player_id.clone()));
    available.into_iter().take(limit).cloned().collect()
}
