//! Ranked, capped solve-time leaderboards
//!
//! One list per puzzle and board size, ordered by elapsed time with ties in
//! insertion order. Each entry gets a fresh id when inserted and the rank is
//! read back by that id, so equal times or clock skew cannot confuse it.
//!
//! The read-modify-write against the store is not transactional: two writers
//! racing on the same key can lose an update.

use crate::io::configuration::CUSTOM_PUZZLE_ID;
use crate::io::error::{PuzzleError, Result};
use crate::io::storage::{KeyValueStore, leaderboard_key};
use crate::spatial::grid::GridDimensions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one leaderboard
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LeaderboardKey {
    /// Catalog puzzle id, or `custom` for uploaded archives
    pub puzzle_id: String,
    /// Board size
    pub dimensions: GridDimensions,
}

impl LeaderboardKey {
    /// Key for a puzzle, falling back to the custom namespace
    pub fn new(puzzle_id: Option<&str>, dimensions: GridDimensions) -> Self {
        Self {
            puzzle_id: puzzle_id
                .filter(|id| !id.is_empty())
                .unwrap_or(CUSTOM_PUZZLE_ID)
                .to_string(),
            dimensions,
        }
    }

    /// Storage key for this leaderboard
    pub fn storage_key(&self) -> String {
        leaderboard_key(
            &self.puzzle_id,
            self.dimensions.rows,
            self.dimensions.cols,
        )
    }
}

/// One timed solve
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Unique id assigned at insertion
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Display name of the solver
    pub player_name: String,
    /// Solve time in milliseconds
    pub elapsed_ms: u64,
    /// When the solve was recorded
    pub timestamp: DateTime<Utc>,
}

/// Position of a freshly inserted entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ranking {
    /// 1-based rank, `None` if the entry fell off the capped list
    pub rank: Option<usize>,
    /// Entries in the list after insertion
    pub total: usize,
}

/// A loaded leaderboard list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Load a list; a missing or corrupt payload yields an empty list
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read
    pub fn load(store: &impl KeyValueStore, key: &LeaderboardKey) -> Result<Self> {
        let storage_key = key.storage_key();
        let Some(payload) = store.get(&storage_key)? else {
            return Ok(Self::default());
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&payload) {
            Ok(mut entries) => {
                entries.sort_by_key(|entry| entry.elapsed_ms);
                Ok(Self { entries })
            }
            Err(error) => {
                log::warn!("Discarding corrupt leaderboard '{storage_key}': {error}");
                Ok(Self::default())
            }
        }
    }

    /// Persist the list
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the store cannot be written
    pub fn save(&self, store: &mut impl KeyValueStore, key: &LeaderboardKey) -> Result<()> {
        let payload =
            serde_json::to_string(&self.entries).map_err(|e| PuzzleError::Serialization {
                context: "leaderboard",
                source: e,
            })?;
        store.set(&key.storage_key(), payload)
    }

    /// Insert an entry, keep the list sorted and capped, and rank it
    pub fn insert(&mut self, entry: LeaderboardEntry, capacity: usize) -> Ranking {
        let id = entry.id;
        self.entries.push(entry);
        // Stable sort keeps equal times in insertion order
        self.entries.sort_by_key(|item| item.elapsed_ms);
        self.entries.truncate(capacity);

        Ranking {
            rank: self.rank_of(id),
            total: self.entries.len(),
        }
    }

    /// 1-based rank of an entry id
    pub fn rank_of(&self, id: Uuid) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .map(|index| index + 1)
    }

    /// All entries, fastest first
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// The fastest `limit` entries
    pub fn top(&self, limit: usize) -> &[LeaderboardEntry] {
        self.entries.get(..limit).unwrap_or(self.entries.as_slice())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Test whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Record a solve: load, insert with a fresh id, cap, persist, rank
///
/// # Errors
///
/// Returns an error if the store cannot be read or written
pub fn record_result(
    store: &mut impl KeyValueStore,
    key: &LeaderboardKey,
    player_name: &str,
    elapsed_ms: u64,
    timestamp: DateTime<Utc>,
    capacity: usize,
) -> Result<Ranking> {
    let mut leaderboard = Leaderboard::load(&*store, key)?;
    let ranking = leaderboard.insert(
        LeaderboardEntry {
            id: Uuid::new_v4(),
            player_name: player_name.to_string(),
            elapsed_ms,
            timestamp,
        },
        capacity,
    );
    leaderboard.save(store, key)?;

    log::info!(
        "Recorded {elapsed_ms} ms for '{player_name}' on {}: rank {:?} of {}",
        key.storage_key(),
        ranking.rank,
        ranking.total
    );
    Ok(ranking)
}
