//! Type-safe wrappers and enums for fantasy league data.

pub mod ids;
pub mod position;
pub mod time;

pub use ids::{LeagueId, PlayerId, UserId};
pub use position::Position;
pub use time::{Season, SeasonType, Week, LAST_REGULAR_SEASON_WEEK};
