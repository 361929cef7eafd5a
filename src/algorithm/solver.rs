//! Auto-solve layout construction

use crate::math::natural::sort_naturally_by_key;
use crate::spatial::grid::{Board, GridDimensions};
use crate::spatial::tiles::{Coordinates, Tile, TileId, TileSet};

/// A solved layout plus any tiles that did not fit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolvedLayout {
    /// Board with tiles placed
    pub board: Board,
    /// Tiles left over because the board ran out of cells
    pub unplaced: Vec<TileId>,
}

/// Build the auto-solve layout
///
/// Tiles with known coordinates go to their cell. The rest, ordered by
/// natural name order, fill the remaining empty cells in row-major order.
/// Indexed tiles whose cell is outside the board or already taken join the
/// name-ordered remainder.
pub fn solve_layout(tiles: &TileSet, dimensions: GridDimensions) -> SolvedLayout {
    let mut board = Board::new(dimensions);
    let mut remainder: Vec<&Tile> = Vec::new();

    for tile in tiles {
        match tile.coordinates {
            Coordinates::Known(position)
                if dimensions.contains(position) && board.get(position).is_none() =>
            {
                board.set(position, Some(tile.id));
            }
            Coordinates::Known(_) | Coordinates::Unknown => remainder.push(tile),
        }
    }

    sort_naturally_by_key(&mut remainder, |tile| tile.display_name.as_str());

    let mut pending = remainder.into_iter().map(|tile| tile.id);
    for position in dimensions.positions() {
        if board.get(position).is_some() {
            continue;
        }
        match pending.next() {
            Some(id) => {
                board.set(position, Some(id));
            }
            None => break,
        }
    }

    let unplaced: Vec<TileId> = pending.collect();
    if !unplaced.is_empty() {
        log::warn!(
            "Auto-solve could not fit {} tiles on a {dimensions} board",
            unplaced.len()
        );
    }

    SolvedLayout { board, unplaced }
}
