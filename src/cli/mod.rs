//! CLI argument definitions and parsing.

pub mod types;

use crate::{enrich::ScoringClass, espn::EspnLeagueId};
use clap::{Args, Parser, Subcommand};
use types::{LeagueId, Position, Season, SeasonType, UserId, Week};

/// League and timing arguments shared between commands.
#[derive(Debug, Args)]
pub struct LeagueArgs {
    /// League ID (or set `FFL_SLEEPER_LEAGUE_ID` env var).
    #[clap(long, short)]
    pub league_id: Option<LeagueId>,

    /// Season year (defaults to the current season).
    #[clap(long, short)]
    pub season: Option<Season>,

    /// Week (defaults to the current week).
    #[clap(long, short)]
    pub week: Option<Week>,

    /// Season type: pre, regular or post.
    #[clap(long)]
    pub season_type: Option<SeasonType>,
}

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// Enriched lineup for one roster: projected, previous-week, average and
    /// rest-of-season points per player.
    Lineup {
        #[clap(flatten)]
        league: LeagueArgs,

        /// Roster owner's user id.
        #[clap(long, conflicts_with = "username")]
        owner_id: Option<UserId>,

        /// Roster owner's username (or set `FFL_SLEEPER_USERNAME` env var).
        #[clap(long, short)]
        username: Option<String>,

        /// Override the league's scoring class: std, half or ppr.
        #[clap(long)]
        scoring: Option<ScoringClass>,

        /// Drop cached projections and stats before fetching.
        #[clap(long)]
        refresh: bool,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// League settings summary: scoring class, rosters and members.
    League {
        /// League ID (or set `FFL_SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Best-ranked players on no roster in the league.
    FreeAgents {
        /// League ID (or set `FFL_SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Filter by position (repeatable): `-p QB -p RB`.
        #[clap(short = 'p', long = "position")]
        positions: Option<Vec<Position>>,

        /// Maximum number of players to list.
        #[clap(long, default_value_t = 25)]
        limit: usize,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Current week and season.
    State {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Rosters from the secondary platform (bundled sample data without a proxy).
    EspnRoster {
        /// ESPN league ID (or set `FFL_ESPN_LEAGUE_ID` env var).
        #[clap(long)]
        espn_league_id: Option<EspnLeagueId>,

        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Only this team id.
        #[clap(long)]
        team: Option<u32>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Cache and rate-limit status of a fresh service.
    CacheStatus {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "ffl-lineup", about = "Fantasy football lineup and projection CLI")]
pub struct Ffl {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Get league, lineup and player data
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },
}
