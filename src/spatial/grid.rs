//! Board geometry and the matrix of placed tiles

use crate::io::configuration::MAX_BOARD_CELLS;
use crate::spatial::tiles::TileId;
use ndarray::Array2;
use std::fmt;

/// A cell address on the board, zero-based
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl GridPosition {
    /// Create a position from row and column
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Board size in rows and columns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl GridDimensions {
    /// Create dimensions from rows and columns
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells, saturating at `usize::MAX`
    pub const fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Number of cells, `None` on overflow
    pub const fn checked_cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Test whether a board of this size may be allocated
    pub const fn is_playable(&self) -> bool {
        matches!(self.checked_cell_count(), Some(cells) if cells <= MAX_BOARD_CELLS)
    }

    /// Test whether a position lies inside `[0,rows) x [0,cols)`
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Iterate over all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| GridPosition::new(row, col)))
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Matrix of placed tile references
///
/// Created empty on every load, build or reset. Mutation goes through the
/// placement validator and the auto-solver so that the board and the palette
/// never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Array2<Option<TileId>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(GridDimensions::default())
    }
}

impl Board {
    /// Create an empty board
    ///
    /// Ingestion and the session only hand out dimensions that pass
    /// [`GridDimensions::is_playable`].
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            cells: Array2::from_elem((dimensions.rows, dimensions.cols), None),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Board dimensions
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.rows(), self.cols())
    }

    /// Occupant of a cell, `None` for empty or out-of-range cells
    pub fn get(&self, position: GridPosition) -> Option<TileId> {
        self.cells
            .get((position.row, position.col))
            .copied()
            .flatten()
    }

    /// Find the cell currently holding a tile
    pub fn position_of(&self, tile: TileId) -> Option<GridPosition> {
        self.cells
            .indexed_iter()
            .find(|(_, occupant)| **occupant == Some(tile))
            .map(|((row, col), _)| GridPosition::new(row, col))
    }

    /// Iterate over occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (GridPosition, TileId)> + '_ {
        self.cells.indexed_iter().filter_map(|((row, col), occupant)| {
            occupant.map(|tile| (GridPosition::new(row, col), tile))
        })
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|occupant| occupant.is_some()).count()
    }

    /// Test whether every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    // Returns the previous occupant
    pub(crate) fn set(&mut self, position: GridPosition, tile: Option<TileId>) -> Option<TileId> {
        self.cells
            .get_mut((position.row, position.col))
            .and_then(|cell| std::mem::replace(cell, tile))
    }
}
