//! Key-value reads/writes and the player catalog snapshot

use super::schema::SnapshotStore;
use crate::sleeper::types::{PlayerCatalog, PlayerRecord};
use anyhow::Result;
use rusqlite::{params, OptionalExtension};
use std::{
    collections::HashMap,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Most players kept in a catalog snapshot.
pub const SNAPSHOT_PLAYER_LIMIT: usize = 2500;

/// One row of the key-value table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub value: String,
    /// Unix seconds.
    pub stored_at: u64,
}

impl StoredEntry {
    pub fn age(&self) -> Duration {
        Duration::from_secs(unix_now().saturating_sub(self.stored_at))
    }
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn catalog_key(sport: &str) -> String {
    format!("players:{sport}")
}

impl SnapshotStore {
    /// Write `value` under `key`, stamped with the current time.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.put_at(key, value, unix_now())
    }

    /// Write `value` under `key` with an explicit unix timestamp.
    pub fn put_at(&self, key: &str, value: &str, stored_at: u64) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO kv (key, value, stored_at) VALUES (?1, ?2, ?3)",
            params![key, value, stored_at as i64],
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<StoredEntry>> {
        let row = self
            .conn()
            .query_row(
                "SELECT value, stored_at FROM kv WHERE key = ?1",
                params![key],
                |row| {
                    Ok(StoredEntry {
                        value: row.get(0)?,
                        stored_at: row.get::<_, i64>(1)?.max(0) as u64,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Persist the fantasy-relevant head of `catalog`, best search rank first.
    ///
    /// Returns the number of players written.
    pub fn save_catalog(&self, sport: &str, catalog: &PlayerCatalog) -> Result<usize> {
        let subset = snapshot_subset(catalog);
        let count = subset.len();
        let body = serde_json::to_string(&subset)?;
        self.put(&catalog_key(sport), &body)?;
        Ok(count)
    }

    /// Read the catalog snapshot if one exists and is younger than `max_age`.
    pub fn load_catalog(&self, sport: &str, max_age: Duration) -> Result<Option<PlayerCatalog>> {
        let Some(entry) = self.get(&catalog_key(sport))? else {
            return Ok(None);
        };
        if entry.age() >= max_age {
            return Ok(None);
        }
        let catalog: PlayerCatalog = serde_json::from_str(&entry.value)?;
        Ok(Some(catalog))
    }
}

fn snapshot_subset(catalog: &PlayerCatalog) -> HashMap<&str, &PlayerRecord> {
    let mut relevant: Vec<&PlayerRecord> = catalog
        .values()
        .filter(|p| p.is_fantasy_relevant())
        .collect();
    relevant.sort_by_key(|p| (p.search_rank.unwrap_or(u64::MAX), p.player_id.clone()));
    relevant
        .into_iter()
        .take(SNAPSHOT_PLAYER_LIMIT)
        .map(|p| (p.player_id.as_str(), p))
        .collect()
}
