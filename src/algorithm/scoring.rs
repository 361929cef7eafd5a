//! Board correctness scoring

use crate::io::error::{PuzzleError, Result};
use crate::spatial::grid::Board;
use crate::spatial::tiles::{Coordinates, TileSet};
use std::fmt;

/// Correct cells out of the board total
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreReport {
    /// Cells whose occupant belongs there
    pub correct: usize,
    /// Cells on the board
    pub total: usize,
}

impl ScoreReport {
    /// Every cell holds its designed tile
    pub const fn is_solved(&self) -> bool {
        self.correct == self.total
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// Count cells whose occupant's coordinates equal the cell
///
/// # Errors
///
/// Returns an error if any active tile lacks coordinates, since the board
/// cannot then be verified
pub fn score_board(tiles: &TileSet, board: &Board) -> Result<ScoreReport> {
    if !tiles.all_indexed() {
        return Err(PuzzleError::MissingIndices {
            missing: tiles.missing_count(),
            total: tiles.len(),
        });
    }

    let correct = board
        .occupied()
        .filter(|&(position, occupant)| {
            tiles
                .get(occupant)
                .is_some_and(|tile| tile.coordinates == Coordinates::Known(position))
        })
        .count();

    Ok(ScoreReport {
        correct,
        total: board.dimensions().cell_count(),
    })
}
