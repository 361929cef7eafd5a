//! Grid dimension inference
//!
//! Tries three sources in order: the coordinates carried by the tiles, an
//! `AxB` hint in the archive's own name, and finally a near-square layout
//! derived from the tile count alone.

use crate::io::archive::base_name;
use crate::io::configuration::{
    FILENAME_HINT_TOLERANCE_PERCENT, INDEXED_FRACTION_THRESHOLD_PERCENT, MAX_CELLS_PER_TILE,
};
use crate::spatial::grid::GridDimensions;
use crate::spatial::tiles::TileSet;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Where inferred dimensions came from; informs messaging only
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridSource {
    /// Maximum row and column over indexed tiles
    Indices,
    /// `AxB` token in the archive name
    Filename,
    /// Near-square layout from the tile count
    Fallback,
    /// Dimensions supplied by the catalog descriptor
    Descriptor,
}

impl fmt::Display for GridSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Indices => "indices",
            Self::Filename => "filename",
            Self::Fallback => "fallback",
            Self::Descriptor => "descriptor",
        };
        f.write_str(label)
    }
}

/// Inferred dimensions and their source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridInference {
    /// Inferred board size
    pub dimensions: GridDimensions,
    /// Which tier produced it
    pub source: GridSource,
}

static DIMENSION_HINT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+)[xX](\d+)").ok());

/// Read an `AxB` hint from an archive name
pub fn dimension_hint(archive_name: &str) -> Option<GridDimensions> {
    let regex = (*DIMENSION_HINT).as_ref()?;
    let captures = regex.captures(base_name(archive_name))?;
    let rows = captures.get(1)?.as_str().parse().ok()?;
    let cols = captures.get(2)?.as_str().parse().ok()?;
    Some(GridDimensions::new(rows, cols))
}

/// Dimensions from indexed tiles, if enough of them carry coordinates
///
/// Index sets so sparse that the grid would hold more than
/// [`MAX_CELLS_PER_TILE`] cells per tile are rejected.
pub fn from_indices(tiles: &TileSet) -> Option<GridDimensions> {
    let total = tiles.len();
    let indexed = tiles.indexed_count();
    if total == 0
        || indexed.saturating_mul(100) < total.saturating_mul(INDEXED_FRACTION_THRESHOLD_PERCENT)
    {
        return None;
    }

    let positions = tiles.iter().filter_map(|tile| tile.coordinates.position());
    let (max_row, max_col) = positions.fold((0, 0), |(rows, cols), position| {
        (rows.max(position.row), cols.max(position.col))
    });
    let dimensions = GridDimensions::new(max_row.checked_add(1)?, max_col.checked_add(1)?);

    let sparse = dimensions
        .checked_cell_count()
        .is_none_or(|cells| cells > total.saturating_mul(MAX_CELLS_PER_TILE));
    if sparse || !dimensions.is_playable() {
        log::warn!("Ignoring indices spanning {dimensions} for only {total} tiles");
        return None;
    }
    Some(dimensions)
}

/// Dimensions from the archive name, if the hint is close to the tile count
pub fn from_archive_name(archive_name: &str, tile_count: usize) -> Option<GridDimensions> {
    let hint = dimension_hint(archive_name)?;
    if hint.rows == 0 || hint.cols == 0 {
        return None;
    }

    let cells = hint.checked_cell_count()?;
    let difference = cells.abs_diff(tile_count);
    let within_tolerance = difference
        .checked_mul(100)
        .zip(tile_count.checked_mul(FILENAME_HINT_TOLERANCE_PERCENT))
        .is_some_and(|(scaled, allowed)| scaled <= allowed);
    within_tolerance.then_some(hint)
}

/// Near-square layout holding `tile_count` tiles
pub const fn near_square(tile_count: usize) -> GridDimensions {
    if tile_count == 0 {
        return GridDimensions::new(0, 0);
    }
    let rows = tile_count.isqrt();
    GridDimensions::new(rows, tile_count.div_ceil(rows))
}

/// Infer board dimensions for a tile set
pub fn infer_grid(tiles: &TileSet, archive_name: &str) -> GridInference {
    if let Some(dimensions) = from_indices(tiles) {
        return GridInference {
            dimensions,
            source: GridSource::Indices,
        };
    }

    if let Some(dimensions) = from_archive_name(archive_name, tiles.len()) {
        return GridInference {
            dimensions,
            source: GridSource::Filename,
        };
    }

    let dimensions = near_square(tiles.len());
    log::warn!(
        "Could not infer grid from indices or name of '{archive_name}', using {dimensions} for {} tiles",
        tiles.len()
    );
    GridInference {
        dimensions,
        source: GridSource::Fallback,
    }
}
