//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use ffl_lineup::{
    cli::{Commands, Ffl, GetCmd},
    commands::{
        cache_status::handle_cache_status,
        espn_roster::handle_espn_roster,
        free_agents::handle_free_agents,
        league_data::handle_league_data,
        lineup::{handle_lineup, LineupParams},
        state::handle_state,
    },
    config::Settings,
    FantasyData, Result,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ffl_lineup=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let app = Ffl::parse();
    let service = FantasyData::new(&Settings::from_env()?)?;

    match app.command {
        Commands::Get { cmd } => match cmd {
            GetCmd::Lineup {
                league,
                owner_id,
                username,
                scoring,
                refresh,
                json,
            } => {
                handle_lineup(
                    &service,
                    LineupParams {
                        league,
                        owner_id,
                        username,
                        scoring,
                        refresh,
                        as_json: json,
                    },
                )
                .await?
            }

            GetCmd::League { league_id, json } => {
                handle_league_data(&service, league_id, json).await?
            }

            GetCmd::FreeAgents {
                league_id,
                positions,
                limit,
                json,
            } => handle_free_agents(&service, league_id, positions, limit, json).await?,

            GetCmd::State { json } => handle_state(&service, json).await?,

            GetCmd::EspnRoster {
                espn_league_id,
                season,
                team,
                json,
            } => handle_espn_roster(&service, espn_league_id, season, team, json).await?,

            GetCmd::CacheStatus { json } => handle_cache_status(&service, json)?,
        },
    }

    Ok(())
}
