//! Per-player point balance
//!
//! Points are earned by verified solves and spent on auto-solves. Balances
//! live in the injected store under `points:<player>`.

use crate::io::error::{PuzzleError, Result};
use crate::io::storage::{KeyValueStore, points_key};

/// Point balance accessor for one player
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointsLedger {
    player: String,
    initial_points: u64,
}

impl PointsLedger {
    /// Ledger for a player, seeding `initial_points` on first use
    pub fn new(player: &str, initial_points: u64) -> Self {
        Self {
            player: player.to_string(),
            initial_points,
        }
    }

    /// Player whose balance this ledger tracks
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Store the initial balance if the player has none yet
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    pub fn ensure_seeded(&self, store: &mut impl KeyValueStore) -> Result<u64> {
        let key = points_key(&self.player);
        if store.get(&key)?.is_none() {
            store.set(&key, self.initial_points.to_string())?;
            log::info!(
                "Seeded {} points for new player '{}'",
                self.initial_points,
                self.player
            );
            return Ok(self.initial_points);
        }
        self.balance(&*store)
    }

    /// Current balance
    ///
    /// A missing balance reads as the initial amount; a corrupt one as zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub fn balance(&self, store: &impl KeyValueStore) -> Result<u64> {
        let key = points_key(&self.player);
        Ok(match store.get(&key)? {
            None => self.initial_points,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring corrupt point balance '{raw}' for '{}'", self.player);
                0
            }),
        })
    }

    /// Deduct `cost`, failing without change when the balance is short
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The balance is below `cost`
    /// - The store cannot be read or written
    pub fn spend(&self, store: &mut impl KeyValueStore, cost: u64) -> Result<u64> {
        let balance = self.balance(&*store)?;
        if balance < cost {
            return Err(PuzzleError::InsufficientPoints { balance, cost });
        }
        let remaining = balance - cost;
        store.set(&points_key(&self.player), remaining.to_string())?;
        Ok(remaining)
    }

    /// Add `amount` to the balance
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    pub fn award(&self, store: &mut impl KeyValueStore, amount: u64) -> Result<u64> {
        let balance = self.balance(&*store)?.saturating_add(amount);
        store.set(&points_key(&self.player), balance.to_string())?;
        Ok(balance)
    }
}
