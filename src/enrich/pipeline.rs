//! Per-player metric computation.
//!
//! Every player in a group is enriched concurrently. A failed per-player fetch
//! zeroes the metrics that depended on it and is recorded as a
//! [`PartialFailure`]; it never aborts the group.

use super::{
    lineup::{RosterPlayer, RosterRole},
    scoring::PointsField,
};
use crate::{
    cli::types::{PlayerId, Season, SeasonType, Week, LAST_REGULAR_SEASON_WEEK},
    sleeper::{
        types::{PlayerRecord, SeasonSeries, WeeklyStatMap},
        ProjectionData,
    },
    Result,
};
use futures_util::future::{join, join_all};
use serde::Serialize;
use std::{fmt, future::Future, sync::Arc};
use tracing::warn;

/// Per-player season series used by the pipeline.
pub trait SeasonDataSource {
    fn season_projections(
        &self,
        player_id: &PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> impl Future<Output = Result<Arc<SeasonSeries>>> + Send;

    fn season_stats(
        &self,
        player_id: &PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> impl Future<Output = Result<Arc<SeasonSeries>>> + Send;
}

impl SeasonDataSource for ProjectionData {
    async fn season_projections(
        &self,
        player_id: &PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Result<Arc<SeasonSeries>> {
        self.player_projections(player_id, season, season_type).await
    }

    async fn season_stats(
        &self,
        player_id: &PlayerId,
        season: Season,
        season_type: SeasonType,
    ) -> Result<Arc<SeasonSeries>> {
        self.player_stats(player_id, season, season_type).await
    }
}

/// Inputs shared by every player of one enrichment call.
#[derive(Debug, Clone, Copy)]
pub struct EnrichContext<'a> {
    pub projections: &'a WeeklyStatMap,
    pub history: &'a WeeklyStatMap,
    pub points_field: PointsField,
    pub week: Week,
    pub season: Season,
    pub season_type: SeasonType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPlayer {
    #[serde(flatten)]
    pub record: PlayerRecord,
    pub role: RosterRole,
    pub projected_points: f64,
    pub rest_of_year: f64,
    pub previous_week_points: f64,
    pub season_average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ProjectedPoints,
    RestOfYear,
    SeasonAverage,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Metric::ProjectedPoints => "projected_points",
            Metric::RestOfYear => "rest_of_year",
            Metric::SeasonAverage => "season_average",
        };
        f.write_str(s)
    }
}

/// A metric that defaulted to 0 because its per-player fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartialFailure {
    pub player_id: PlayerId,
    pub metric: Metric,
    pub message: String,
}

/// One role group after enrichment, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichedGroup {
    pub players: Vec<EnrichedPlayer>,
    pub failures: Vec<PartialFailure>,
}

impl EnrichedGroup {
    pub fn projected_total(&self) -> f64 {
        self.players.iter().map(|p| p.projected_points).sum()
    }
}

/// Average of `field` over the weeks that carry it; 0 with no such week.
pub fn season_average(series: &SeasonSeries, field: PointsField) -> f64 {
    let (sum, games) = series
        .values()
        .filter_map(|line| line.get(field.key()))
        .fold((0.0, 0u32), |(sum, n), pts| (sum + pts, n + 1));
    if games == 0 {
        0.0
    } else {
        sum / f64::from(games)
    }
}

/// Sum of `field` over the weeks after `current` through the last regular
/// season week. Weeks without the field add nothing.
pub fn rest_of_year(series: &SeasonSeries, field: PointsField, current: Week) -> f64 {
    let first = current.as_u16().saturating_add(1);
    if first > LAST_REGULAR_SEASON_WEEK {
        return 0.0;
    }
    series
        .range(first..=LAST_REGULAR_SEASON_WEEK)
        .filter_map(|(_, line)| line.get(field.key()))
        .sum()
}

fn week_points(series: &SeasonSeries, week: Week, field: PointsField) -> Option<f64> {
    series.get(&week.as_u16())?.get(field.key())
}

/// Enrich every player of one group. Never fails.
pub async fn enrich_group<S: SeasonDataSource>(
    source: &S,
    players: &[RosterPlayer],
    ctx: &EnrichContext<'_>,
) -> EnrichedGroup {
    let results = join_all(players.iter().map(|p| enrich_player(source, p, ctx))).await;

    let mut group = EnrichedGroup::default();
    for (player, failures) in results {
        group.players.push(player);
        group.failures.extend(failures);
    }
    group
}

async fn enrich_player<S: SeasonDataSource>(
    source: &S,
    player: &RosterPlayer,
    ctx: &EnrichContext<'_>,
) -> (EnrichedPlayer, Vec<PartialFailure>) {
    let id = &player.record.player_id;
    let field = ctx.points_field;
    let mut failures = Vec::new();
    let mut fail = |metric: Metric, message: String| {
        warn!(player_id = %id, %metric, error = %message, "enrichment metric defaulted to 0");
        failures.push(PartialFailure {
            player_id: id.clone(),
            metric,
            message,
        });
    };

    let (projections, stats) = join(
        source.season_projections(id, ctx.season, ctx.season_type),
        source.season_stats(id, ctx.season, ctx.season_type),
    )
    .await;

    let bulk = ctx
        .projections
        .get(id)
        .and_then(|line| line.get(field.key()));

    let (projected_points, rest) = match &projections {
        Ok(series) => (
            bulk.or_else(|| week_points(series, ctx.week, field))
                .unwrap_or(0.0),
            rest_of_year(series, field, ctx.week),
        ),
        Err(e) => {
            if bulk.is_none() {
                fail(Metric::ProjectedPoints, e.to_string());
            }
            fail(Metric::RestOfYear, e.to_string());
            (bulk.unwrap_or(0.0), 0.0)
        }
    };

    let average = match &stats {
        Ok(series) => season_average(series, field),
        Err(e) => {
            fail(Metric::SeasonAverage, e.to_string());
            0.0
        }
    };

    let previous_week_points = ctx
        .history
        .get(id)
        .and_then(|line| line.get(field.key()))
        .unwrap_or(0.0);

    let enriched = EnrichedPlayer {
        record: player.record.clone(),
        role: player.role,
        projected_points,
        rest_of_year: rest,
        previous_week_points,
        season_average: average,
    };
    (enriched, failures)
}
