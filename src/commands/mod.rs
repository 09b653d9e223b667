//! Command implementations for the fantasy lineup CLI

pub mod cache_status;
pub mod common;
pub mod espn_roster;
pub mod free_agents;
pub mod league_data;
pub mod lineup;
pub mod state;

#[cfg(test)]
mod tests;

pub use common::{resolve_espn_league_id, resolve_league_id, resolve_owner};
