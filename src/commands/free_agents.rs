//! Free agent listing command

use super::common::{or_dash, print_json, resolve_league_id};
use crate::{
    cli::types::Position, service::FantasyData, sleeper::types::PlayerRecord,
    sleeper::types::SPORT_NFL, LeagueId, Result,
};

/// Keep players holding any of `positions`; everyone when `None`.
pub fn filter_positions(players: Vec<PlayerRecord>, positions: Option<&[Position]>) -> Vec<PlayerRecord> {
    let Some(positions) = positions else {
        return players;
    };
    players
        .into_iter()
        .filter(|p| {
            p.fantasy_positions
                .iter()
                .filter_map(|fp| fp.parse::<Position>().ok())
                .any(|fp| positions.contains(&fp))
        })
        .collect()
}

/// Handle the free agents command
pub async fn handle_free_agents(
    service: &FantasyData,
    league_id: Option<LeagueId>,
    positions: Option<Vec<Position>>,
    limit: usize,
    as_json: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;

    // Rank across every position first, then narrow
    let ranked = service
        .league()
        .free_agents(&league_id, SPORT_NFL, usize::MAX)
        .await?;
    let mut players = filter_positions(ranked, positions.as_deref());
    players.truncate(limit);

    if as_json {
        return print_json(&players);
    }
    for (i, p) in players.iter().enumerate() {
        println!(
            "{:>3}. {:<26} {:<4} {:<4} {}",
            i + 1,
            p.display_name(),
            or_dash(p.position.as_deref()),
            or_dash(p.team.as_deref()),
            or_dash(p.injury_status.as_deref()),
        );
    }
    Ok(())
}
