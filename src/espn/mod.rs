//! Secondary platform (ESPN) access with degraded, fixture-backed support.

pub mod filters;
pub mod http;
pub mod types;

pub use http::{EspnClient, EspnSource};
pub use types::EspnLeagueId;
