//! Enrichment: scoring classification, roster grouping and per-player metrics.

pub mod lineup;
pub mod pipeline;
pub mod scoring;

pub use lineup::{split_roster, RoleGroups, RosterPlayer, RosterRole};
pub use pipeline::{
    enrich_group, rest_of_year, season_average, EnrichContext, EnrichedGroup, EnrichedPlayer,
    Metric, PartialFailure, SeasonDataSource,
};
pub use scoring::{PointsField, ScoringClass};

use crate::cli::types::{LeagueId, Season, SeasonType, UserId, Week};
use serde::Serialize;

/// Whose roster to enrich.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterOwner {
    UserId(UserId),
    Username(String),
}

/// Parameters of one enriched-lineup request.
#[derive(Debug, Clone, PartialEq)]
pub struct LineupRequest {
    pub league_id: LeagueId,
    pub owner: RosterOwner,
    /// `None` reads the active week from the state endpoint.
    pub week: Option<Week>,
    pub season: Option<Season>,
    pub season_type: Option<SeasonType>,
    pub options: EnrichOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Empty the projection/stat caches before fetching.
    pub force_refresh: bool,
    /// Use this class instead of the one derived from league settings.
    pub scoring_override: Option<ScoringClass>,
}

/// A roster with every role group enriched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedLineup {
    pub league_id: LeagueId,
    pub roster_id: u32,
    pub owner_id: Option<UserId>,
    pub season: Season,
    pub week: Week,
    pub season_type: SeasonType,
    pub scoring_class: ScoringClass,
    pub points_field: PointsField,
    pub starters: EnrichedGroup,
    pub bench: EnrichedGroup,
    pub reserve: EnrichedGroup,
}

impl EnrichedLineup {
    pub fn failures(&self) -> impl Iterator<Item = &PartialFailure> {
        self.starters
            .failures
            .iter()
            .chain(&self.bench.failures)
            .chain(&self.reserve.failures)
    }

    pub fn player_count(&self) -> usize {
        self.starters.players.len() + self.bench.players.len() + self.reserve.players.len()
    }
}
