//! Roster-role grouping.

use crate::{
    cli::types::PlayerId,
    sleeper::types::{PlayerCatalog, PlayerRecord, RosterSnapshot},
};
use serde::Serialize;
use std::{collections::HashSet, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterRole {
    Starter,
    Bench,
    Reserve,
}

impl fmt::Display for RosterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RosterRole::Starter => "starter",
            RosterRole::Bench => "bench",
            RosterRole::Reserve => "reserve",
        };
        f.write_str(s)
    }
}

/// A catalog record tagged with its role on one roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterPlayer {
    pub record: PlayerRecord,
    pub role: RosterRole,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleGroups {
    pub starters: Vec<RosterPlayer>,
    pub bench: Vec<RosterPlayer>,
    pub reserve: Vec<RosterPlayer>,
}

impl RoleGroups {
    pub fn len(&self) -> usize {
        self.starters.len() + self.bench.len() + self.reserve.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split a roster into starters, bench and reserve.
///
/// Starters keep starter order and skip empty slots. Bench is every other
/// rostered player not on reserve (taxi included). Ids the catalog does not
/// know become placeholder records.
pub fn split_roster(roster: &RosterSnapshot, catalog: &PlayerCatalog) -> RoleGroups {
    let lookup = |id: &PlayerId, role| RosterPlayer {
        record: catalog
            .get(id)
            .cloned()
            .unwrap_or_else(|| PlayerRecord::placeholder(id.clone())),
        role,
    };

    let starters: Vec<&PlayerId> = roster
        .starters
        .iter()
        .filter(|id| !id.is_empty_slot())
        .collect();
    let starter_set: HashSet<&PlayerId> = starters.iter().copied().collect();
    let reserve_set: HashSet<&PlayerId> = roster.reserve.iter().collect();

    let mut seen = HashSet::new();
    let bench = roster
        .players
        .iter()
        .chain(&roster.taxi)
        .filter(|id| !starter_set.contains(id) && !reserve_set.contains(id))
        .filter(|id| seen.insert(*id))
        .map(|id| lookup(id, RosterRole::Bench))
        .collect();

    RoleGroups {
        starters: starters
            .into_iter()
            .map(|id| lookup(id, RosterRole::Starter))
            .collect(),
        bench,
        reserve: roster
            .reserve
            .iter()
            .map(|id| lookup(id, RosterRole::Reserve))
            .collect(),
    }
}
