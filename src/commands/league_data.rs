//! League settings summary command

use super::common::{fmt_points, or_dash, print_json, resolve_league_id};
use crate::{
    enrich::ScoringClass,
    service::FantasyData,
    sleeper::types::{League, LeagueUser, RosterSnapshot},
    LeagueId, Result,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub roster_id: u32,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueSummary {
    pub league_id: LeagueId,
    pub name: Option<String>,
    pub season: Option<String>,
    pub scoring_class: ScoringClass,
    pub reception: Option<f64>,
    pub scoring_rules: usize,
    pub teams: Vec<TeamSummary>,
}

/// Join rosters to their owners; teams are ordered by record, then points for.
pub fn summarize_league(
    league: &League,
    rosters: &[RosterSnapshot],
    users: &[LeagueUser],
) -> LeagueSummary {
    let mut teams: Vec<TeamSummary> = rosters
        .iter()
        .map(|r| {
            let owner = r
                .owner_id
                .as_ref()
                .and_then(|id| users.iter().find(|u| &u.user_id == id));
            TeamSummary {
                roster_id: r.roster_id,
                team_name: owner
                    .map(LeagueUser::team_name)
                    .unwrap_or_else(|| format!("Roster {}", r.roster_id)),
                wins: r.settings.wins,
                losses: r.settings.losses,
                ties: r.settings.ties,
                points_for: r.settings.points_for(),
            }
        })
        .collect();
    teams.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.points_for.total_cmp(&a.points_for))
    });

    let scoring = &league.scoring_settings;
    LeagueSummary {
        league_id: league.league_id.clone(),
        name: league.name.clone(),
        season: league.season.clone(),
        scoring_class: ScoringClass::from_config(scoring),
        reception: scoring.reception(),
        scoring_rules: scoring.len(),
        teams,
    }
}

/// Handle the league command
pub async fn handle_league_data(
    service: &FantasyData,
    league_id: Option<LeagueId>,
    as_json: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let data = service.league();
    let league = data.league(&league_id).await?;
    let rosters = data.rosters(&league_id).await?;
    let users = data.users(&league_id).await?;

    let summary = summarize_league(&league, &rosters, &users);
    if as_json {
        return print_json(&summary);
    }

    println!(
        "{} ({}) season {}",
        or_dash(summary.name.as_deref()),
        summary.league_id,
        or_dash(summary.season.as_deref())
    );
    println!(
        "Scoring: {} (reception = {}, {} rules)",
        summary.scoring_class,
        summary
            .reception
            .map(|r| r.to_string())
            .unwrap_or_else(|| "none".to_string()),
        summary.scoring_rules
    );
    for team in &summary.teams {
        println!(
            "  {:>2}. {:<28} {}-{}-{}  PF {}",
            team.roster_id,
            team.team_name,
            team.wins,
            team.losses,
            team.ties,
            fmt_points(team.points_for)
        );
    }
    Ok(())
}
