//! Palette of tiles waiting to be placed

use crate::spatial::tiles::TileId;
use bitvec::prelude::*;
use rand::Rng;
use rand::seq::SliceRandom;

/// Ordered set of tiles that are not on the board
///
/// Display order lives in a vector, membership in a bitset indexed by tile
/// id, giving O(1) membership tests for placement checks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    order: Vec<TileId>,
    members: BitVec,
}

impl Palette {
    /// Create an empty palette able to hold ids below `capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            order: Vec::new(),
            members: bitvec![0; capacity],
        }
    }

    /// Create a palette holding the given ids in order
    pub fn from_ids(ids: &[TileId], capacity: usize) -> Self {
        let mut palette = Self::new(capacity);
        for &id in ids {
            palette.insert(id);
        }
        palette
    }

    /// Append a tile, ignoring duplicates and ids beyond capacity
    pub fn insert(&mut self, id: TileId) {
        if id.index() >= self.members.len() || self.contains(id) {
            return;
        }
        self.members.set(id.index(), true);
        self.order.push(id);
    }

    /// Remove a tile, returning whether it was present
    pub fn remove(&mut self, id: TileId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.members.set(id.index(), false);
        self.order.retain(|&member| member != id);
        true
    }

    /// Test tile membership
    pub fn contains(&self, id: TileId) -> bool {
        self.members.get(id.index()).as_deref() == Some(&true)
    }

    /// Remove every tile
    pub fn clear(&mut self) {
        self.members.fill(false);
        self.order.clear();
    }

    /// Number of tiles waiting to be placed
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Test whether every tile has been placed
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tiles in display order
    pub fn ids(&self) -> &[TileId] {
        &self.order
    }

    /// Randomize display order
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
    }
}
