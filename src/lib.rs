//! Fantasy Football Lineup Library
//!
//! Data access and enrichment for fantasy football leagues: league, roster
//! and player catalog accessors over a public fantasy API, weekly and
//! per-player projections, and an enrichment pipeline that turns a raw
//! roster into a lineup with projected, previous-week, season-average and
//! rest-of-season points per player.
//!
//! ## Features
//!
//! - **Rate-limited client**: sliding-window admission, retry with backoff and
//!   de-duplication of identical in-flight requests
//! - **TTL caches**: per-class expiry and capacity, with status reporting
//! - **Enrichment**: one failing player never fails the lineup
//! - **Snapshot store**: SQLite fallback for the player catalog
//! - **Secondary platform**: ESPN rosters, matchups and free agents through a
//!   proxy, or bundled sample data without one
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ffl_lineup::{
//!     config::Settings,
//!     enrich::{EnrichOptions, LineupRequest, RosterOwner},
//!     FantasyData, LeagueId,
//! };
//!
//! # async fn example() -> ffl_lineup::Result<()> {
//! let service = FantasyData::new(&Settings::from_env()?)?;
//! let lineup = service
//!     .enriched_lineup(&LineupRequest {
//!         league_id: LeagueId::new("784512"),
//!         owner: RosterOwner::Username("alice".to_string()),
//!         week: None,
//!         season: None,
//!         season_type: None,
//!         options: EnrichOptions::default(),
//!     })
//!     .await?;
//! println!("{} starters", lineup.starters.players.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set your league ID and username to avoid passing them in every command:
//! ```bash
//! export FFL_SLEEPER_LEAGUE_ID=784512
//! export FFL_SLEEPER_USERNAME=alice
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod enrich;
pub mod error;
pub mod espn;
pub mod service;
pub mod sleeper;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{LeagueId, PlayerId, Position, Season, SeasonType, UserId, Week};
pub use error::{FflError, Result};
pub use service::FantasyData;
