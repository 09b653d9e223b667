//! Enriched lineup command

use super::common::{fmt_points, or_dash, print_json, resolve_league_id, resolve_owner};
use crate::{
    cli::LeagueArgs,
    enrich::{EnrichOptions, EnrichedGroup, EnrichedLineup, LineupRequest, ScoringClass},
    service::FantasyData,
    Result, UserId,
};
use std::fmt::Write;

/// Parameters for the lineup command
#[derive(Debug)]
pub struct LineupParams {
    pub league: LeagueArgs,
    pub owner_id: Option<UserId>,
    pub username: Option<String>,
    pub scoring: Option<ScoringClass>,
    pub refresh: bool,
    pub as_json: bool,
}

/// Handle the lineup command
pub async fn handle_lineup(service: &FantasyData, params: LineupParams) -> Result<()> {
    let request = LineupRequest {
        league_id: resolve_league_id(params.league.league_id)?,
        owner: resolve_owner(params.owner_id, params.username)?,
        week: params.league.week,
        season: params.league.season,
        season_type: params.league.season_type,
        options: EnrichOptions {
            force_refresh: params.refresh,
            scoring_override: params.scoring,
        },
    };

    let lineup = service.enriched_lineup(&request).await?;

    if params.as_json {
        print_json(&lineup)?;
    } else {
        print!("{}", render_lineup(&lineup));
    }
    Ok(())
}

/// Text table grouped by role.
pub fn render_lineup(lineup: &EnrichedLineup) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Roster {} | {} week {} ({}) | scoring {} ({})",
        lineup.roster_id,
        lineup.season,
        lineup.week,
        lineup.season_type,
        lineup.scoring_class,
        lineup.points_field,
    );

    for (title, group) in [
        ("Starters", &lineup.starters),
        ("Bench", &lineup.bench),
        ("Reserve", &lineup.reserve),
    ] {
        if group.players.is_empty() {
            continue;
        }
        render_group(&mut out, title, group);
    }

    let failures: Vec<_> = lineup.failures().collect();
    if !failures.is_empty() {
        let _ = writeln!(out, "\n{} metric(s) defaulted to 0:", failures.len());
        for f in failures {
            let _ = writeln!(out, "  {} {}: {}", f.player_id, f.metric, f.message);
        }
    }
    out
}

fn render_group(out: &mut String, title: &str, group: &EnrichedGroup) {
    let _ = writeln!(
        out,
        "\n{title} (projected {})",
        fmt_points(group.projected_total())
    );
    let _ = writeln!(
        out,
        "  {:<26} {:<4} {:<4} {:>6} {:>6} {:>6} {:>7}",
        "Player", "Pos", "Team", "Proj", "Prev", "Avg", "ROS"
    );
    for p in &group.players {
        let _ = writeln!(
            out,
            "  {:<26} {:<4} {:<4} {:>6} {:>6} {:>6} {:>7}",
            p.record.display_name(),
            or_dash(p.record.position.as_deref()),
            or_dash(p.record.team.as_deref()),
            fmt_points(p.projected_points),
            fmt_points(p.previous_week_points),
            fmt_points(p.season_average),
            fmt_points(p.rest_of_year),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::types::{PlayerId, Season, SeasonType, Week},
        enrich::{EnrichedPlayer, Metric, PartialFailure, PointsField, RosterRole},
        sleeper::types::PlayerRecord,
        LeagueId,
    };

    fn player(first: &str, last: &str, role: RosterRole, projected: f64) -> EnrichedPlayer {
        EnrichedPlayer {
            record: PlayerRecord {
                player_id: PlayerId::new(last),
                first_name: Some(first.to_string()),
                last_name: Some(last.to_string()),
                position: Some("WR".to_string()),
                team: Some("DET".to_string()),
                ..PlayerRecord::default()
            },
            role,
            projected_points: projected,
            rest_of_year: 100.0,
            previous_week_points: 9.0,
            season_average: 12.5,
        }
    }

    #[test]
    fn test_render_lineup_groups_and_failures() {
        let lineup = EnrichedLineup {
            league_id: LeagueId::new("1"),
            roster_id: 4,
            owner_id: None,
            season: Season::new(2024),
            week: Week::new(6),
            season_type: SeasonType::Regular,
            scoring_class: ScoringClass::FullPpr,
            points_field: PointsField::Ppr,
            starters: EnrichedGroup {
                players: vec![
                    player("Amon-Ra", "St. Brown", RosterRole::Starter, 17.0),
                    player("Jameson", "Williams", RosterRole::Starter, 8.5),
                ],
                failures: vec![],
            },
            bench: EnrichedGroup {
                players: vec![player("Kalif", "Raymond", RosterRole::Bench, 0.0)],
                failures: vec![PartialFailure {
                    player_id: PlayerId::new("Raymond"),
                    metric: Metric::ProjectedPoints,
                    message: "upstream returned 500".to_string(),
                }],
            },
            reserve: EnrichedGroup::default(),
        };

        let text = render_lineup(&lineup);
        assert!(text.starts_with("Roster 4 | 2024 week 6 (regular) | scoring ppr (pts_ppr)"));
        assert!(text.contains("Starters (projected 25.5)"));
        assert!(text.contains("Amon-Ra St. Brown"));
        assert!(text.contains("Bench (projected 0.0)"));
        assert!(!text.contains("Reserve"));
        assert!(text.contains("1 metric(s) defaulted to 0:"));
        assert!(text.contains("Raymond projected_points: upstream returned 500"));
    }
}
