//! Current state command

use super::common::print_json;
use crate::{service::FantasyData, Result};

/// Handle the state command
pub async fn handle_state(service: &FantasyData, as_json: bool) -> Result<()> {
    let state = service.league().nfl_state().await?;
    if as_json {
        return print_json(&state);
    }
    println!(
        "Season {} ({}) week {}",
        state.season,
        state.season_type(),
        state.week
    );
    Ok(())
}
