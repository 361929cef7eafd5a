//! Placement validation under assisted and free policies
//!
//! Every successful placement is a single transition of the board, the
//! palette and the selection together: whatever occupied the target cell
//! goes back to the palette, the placed tile leaves the palette (or its old
//! cell) and the selection is cleared. Failed placements change nothing.

use crate::io::error::{PuzzleError, Result};
use crate::spatial::grid::{Board, GridDimensions, GridPosition};
use crate::spatial::palette::Palette;
use crate::spatial::tiles::{Coordinates, TileId, TileSet};

/// Placement policy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementMode {
    /// Reject moves that contradict a tile's known coordinates
    #[default]
    Assisted,
    /// Accept every move
    Free,
}

/// Visual state of a board cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellStatus {
    /// No tile placed
    Empty,
    /// Occupant's coordinates match the cell
    Correct,
    /// Occupant's coordinates name another cell
    Wrong,
    /// Occupant carries no coordinates
    Unverifiable,
}

/// What a successful placement did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Tile that was placed
    pub tile: TileId,
    /// Cell it now occupies
    pub position: GridPosition,
    /// Previous occupant, now back in the palette
    pub evicted: Option<TileId>,
    /// Cell the tile was moved from, if it was already on the board
    pub moved_from: Option<GridPosition>,
}

/// Board, palette and selection for one play-through
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayArea {
    board: Board,
    palette: Palette,
    selection: Option<TileId>,
}

impl PlayArea {
    /// Empty board with every tile in the palette, in the given order
    pub fn new(dimensions: GridDimensions, palette_order: &[TileId], tile_count: usize) -> Self {
        Self {
            board: Board::new(dimensions),
            palette: Palette::from_ids(palette_order, tile_count),
            selection: None,
        }
    }

    /// Replace the board wholesale, e.g. with an auto-solved layout
    ///
    /// Tiles in `remaining` form the new palette; the selection is cleared.
    pub fn install(&mut self, board: Board, remaining: &[TileId], tile_count: usize) {
        self.board = board;
        self.palette = Palette::from_ids(remaining, tile_count);
        self.selection = None;
    }

    /// Current board
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Current palette
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Mutable palette, for reordering only
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Currently selected tile
    pub const fn selection(&self) -> Option<TileId> {
        self.selection
    }

    /// Select a tile for a later click-to-place
    ///
    /// # Errors
    ///
    /// Returns an error if the tile is not in the active set
    pub fn select(&mut self, tiles: &TileSet, tile: TileId) -> Result<()> {
        if !tiles.contains(tile) {
            return Err(PuzzleError::UnknownTile { tile: tile.index() });
        }
        self.selection = Some(tile);
        Ok(())
    }

    /// Drop the current selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Check a placement without applying it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile is not in the active set
    /// - The cell lies outside the board
    /// - Assisted mode and the tile's known coordinates name another cell
    pub fn validate(
        &self,
        tiles: &TileSet,
        mode: PlacementMode,
        tile: TileId,
        position: GridPosition,
    ) -> Result<()> {
        let Some(candidate) = tiles.get(tile) else {
            return Err(PuzzleError::UnknownTile { tile: tile.index() });
        };

        let dimensions = self.board.dimensions();
        if !dimensions.contains(position) {
            return Err(PuzzleError::CellOutOfBounds {
                row: position.row,
                col: position.col,
                dimensions: (dimensions.rows, dimensions.cols),
            });
        }

        match (mode, candidate.coordinates) {
            (PlacementMode::Assisted, Coordinates::Known(target)) if target != position => {
                Err(PuzzleError::IncorrectPlacement {
                    tile: tile.index(),
                    row: position.row,
                    col: position.col,
                })
            }
            _ => Ok(()),
        }
    }

    /// Place a tile on a cell
    ///
    /// # Errors
    ///
    /// Returns an error (and leaves everything unchanged) if:
    /// - The tile is not in the active set
    /// - The cell lies outside the board
    /// - Assisted mode and the tile's known coordinates name another cell
    pub fn place(
        &mut self,
        tiles: &TileSet,
        mode: PlacementMode,
        tile: TileId,
        position: GridPosition,
    ) -> Result<PlacementOutcome> {
        self.validate(tiles, mode, tile, position)?;

        let moved_from = self
            .board
            .position_of(tile)
            .filter(|&previous| previous != position);
        if let Some(previous) = moved_from {
            self.board.set(previous, None);
        }

        let evicted = self
            .board
            .set(position, Some(tile))
            .filter(|&occupant| occupant != tile);
        if let Some(occupant) = evicted {
            self.palette.insert(occupant);
        }
        self.palette.remove(tile);
        self.selection = None;

        Ok(PlacementOutcome {
            tile,
            position,
            evicted,
            moved_from,
        })
    }

    /// Place the selected tile on a cell
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected or the placement is rejected
    pub fn place_selected(
        &mut self,
        tiles: &TileSet,
        mode: PlacementMode,
        position: GridPosition,
    ) -> Result<PlacementOutcome> {
        let tile = self.selection.ok_or_else(|| {
            crate::io::error::invalid_parameter("selection", &"none", &"no tile is selected")
        })?;
        self.place(tiles, mode, tile, position)
    }

    /// Status of one cell for display
    pub fn cell_status(&self, tiles: &TileSet, position: GridPosition) -> CellStatus {
        let Some(occupant) = self.board.get(position) else {
            return CellStatus::Empty;
        };
        match tiles.get(occupant).map(|tile| tile.coordinates) {
            Some(Coordinates::Known(target)) if target == position => CellStatus::Correct,
            Some(Coordinates::Known(_)) => CellStatus::Wrong,
            Some(Coordinates::Unknown) | None => CellStatus::Unverifiable,
        }
    }
}
