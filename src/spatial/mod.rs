//! Spatial data structures for puzzle play
//!
//! This module contains:
//! - Grid geometry and the board matrix
//! - The palette of unplaced tiles
//! - Tile data structures and the immutable tile set

/// Grid positions, dimensions and the board matrix
pub mod grid;
/// Ordered set of unplaced tiles
pub mod palette;
/// Tile data structures produced by ingestion
pub mod tiles;

pub use grid::{Board, GridDimensions, GridPosition};
pub use palette::Palette;
pub use tiles::{Coordinates, Tile, TileId, TileImage, TileSet};
