//! `x-fantasy-filter` header payloads for the secondary platform.
//!
//! The platform filters player lists server-side from a JSON document sent in
//! a request header. Only the filters the free-agent listing needs are
//! modelled here.

use crate::{cli::types::Position, Result};
use reqwest::header::HeaderValue;
use serde::Serialize;

/// Header carrying the filter document.
pub const FANTASY_FILTER_HEADER: &str = "x-fantasy-filter";

/// Player statuses that count as available.
pub const FREE_AGENT_STATUSES: [&str; 2] = ["FREEAGENT", "WAIVERS"];

/// Filter values are wrapped in objects with a "value" field.
/// For example: `{"filterStatus": {"value": ["FREEAGENT"]}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Val<T> {
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub sort_asc: bool,
    pub sort_priority: u8,
}

/// Filter fields under the `players` key. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayersFilter {
    #[serde(rename = "filterStatus", skip_serializing_if = "Option::is_none")]
    pub filter_status: Option<Val<Vec<String>>>,

    #[serde(rename = "filterSlotIds", skip_serializing_if = "Option::is_none")]
    pub filter_slot_ids: Option<Val<Vec<u8>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(rename = "sortPercOwned", skip_serializing_if = "Option::is_none")]
    pub sort_perc_owned: Option<SortSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FantasyFilter {
    pub players: PlayersFilter,
}

/// Any Serialize → JSON → HeaderValue
pub trait IntoHeaderValue {
    fn to_header_value(&self) -> Result<HeaderValue>;
}

impl<T> IntoHeaderValue for T
where
    T: Serialize,
{
    fn to_header_value(&self) -> Result<HeaderValue> {
        let s = serde_json::to_string(self)?;
        Ok(HeaderValue::from_str(&s)?)
    }
}

/// Available players at `positions` (all fantasy positions when empty), most
/// owned first.
pub fn free_agent_filter(positions: &[Position], limit: u32) -> FantasyFilter {
    let positions: &[Position] = if positions.is_empty() {
        &Position::FANTASY
    } else {
        positions
    };
    let slots: Vec<u8> = positions.iter().flat_map(|p| p.espn_slot_ids()).collect();

    FantasyFilter {
        players: PlayersFilter {
            filter_status: Some(Val {
                value: FREE_AGENT_STATUSES.iter().map(|s| s.to_string()).collect(),
            }),
            filter_slot_ids: Some(Val { value: slots }),
            limit: Some(limit),
            sort_perc_owned: Some(SortSpec {
                sort_asc: false,
                sort_priority: 1,
            }),
        },
    }
}
