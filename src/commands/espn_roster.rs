//! Secondary-platform roster command

use super::common::{print_json, resolve_espn_league_id};
use crate::{espn::EspnLeagueId, service::FantasyData, Result, Season};

/// Handle the espn-roster command
pub async fn handle_espn_roster(
    service: &FantasyData,
    league_id: Option<EspnLeagueId>,
    season: Season,
    team: Option<u32>,
    as_json: bool,
) -> Result<()> {
    let league_id = resolve_espn_league_id(league_id)?;
    let espn = service.espn();
    if !espn.is_live() {
        eprintln!("No ESPN proxy configured; showing bundled sample data.");
    }

    let mut league = espn.rosters(league_id, season).await?;
    if let Some(team_id) = team {
        league.teams.retain(|t| t.id == team_id);
    }

    if as_json {
        return print_json(&league);
    }
    for team in &league.teams {
        println!("{} (team {})", team.display_name(), team.id);
        for entry in &team.roster.entries {
            let (name, position) = match entry.player() {
                Some(p) => (
                    p.name(),
                    p.position().map(|pos| pos.to_string()).unwrap_or_default(),
                ),
                None => (format!("Unknown ({})", entry.player_id), String::new()),
            };
            println!("  {:<8} {:<26} {}", entry.role().to_string(), name, position);
        }
    }
    Ok(())
}
