//! Archive-to-tile-set ingestion
//!
//! Runs extraction, coordinate parsing, index normalization, deduplication
//! and grid inference in that order, then drops surplus tiles without
//! coordinates that the board has no room for. Produces a tile set that is never mutated again.

use crate::analysis::coordinates::TileCandidate;
use crate::analysis::inference::{GridInference, GridSource, infer_grid};
use crate::analysis::normalization::{IndexBase, deduplicate, normalize_indices};
use crate::io::archive::{
    ArchiveEntry, ExtractionObserver, SilentObserver, extract_image_entries_with,
};
use crate::io::error::{PuzzleError, Result};
use crate::spatial::grid::GridDimensions;
use crate::spatial::tiles::{Tile, TileId, TileImage, TileSet};

/// Counts describing what ingestion kept and dropped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Qualifying image entries found in the archive
    pub entries: usize,
    /// Entries whose names carried coordinates
    pub indexed: usize,
    /// Later claims on an already claimed cell
    pub duplicates: usize,
    /// Entries with negative or out-of-bounds coordinates
    pub out_of_bounds: usize,
    /// Tiles without coordinates dropped for lack of board cells
    pub overflow: usize,
}

/// A fully ingested puzzle ready to be loaded into a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestedPuzzle {
    /// Immutable tile set
    pub tiles: TileSet,
    /// Board dimensions and their source
    pub grid: GridInference,
    /// Detected index convention
    pub index_base: IndexBase,
    /// Ingestion counts
    pub report: IngestReport,
}

/// Ingest archive bytes
///
/// `bounds` carries dimensions known from the catalog; when present they are
/// used as-is and tiles outside them are dropped.
///
/// # Errors
///
/// Returns an error if:
/// - The archive cannot be read
/// - No qualifying image entry survives extraction and deduplication
pub fn ingest_archive(
    archive_name: &str,
    bytes: &[u8],
    bounds: Option<GridDimensions>,
) -> Result<IngestedPuzzle> {
    ingest_archive_with(archive_name, bytes, bounds, &mut SilentObserver)
}

/// Ingest archive bytes, reporting extraction progress
///
/// # Errors
///
/// Returns an error if:
/// - The archive cannot be read
/// - No qualifying image entry survives extraction and deduplication
pub fn ingest_archive_with(
    archive_name: &str,
    bytes: &[u8],
    bounds: Option<GridDimensions>,
    observer: &mut dyn ExtractionObserver,
) -> Result<IngestedPuzzle> {
    let entries = extract_image_entries_with(archive_name, bytes, observer)?;
    ingest_entries(archive_name, entries, bounds)
}

/// Ingest already extracted entries, given in extraction order
///
/// # Errors
///
/// Returns an error if no entry survives deduplication
pub fn ingest_entries(
    archive_name: &str,
    entries: Vec<ArchiveEntry>,
    bounds: Option<GridDimensions>,
) -> Result<IngestedPuzzle> {
    let bounds = bounds.filter(|dimensions| {
        let playable = dimensions.is_playable();
        if !playable {
            log::warn!("Ignoring known dimensions {dimensions} for '{archive_name}': board too large");
        }
        playable
    });

    let entry_count = entries.len();
    let mut candidates: Vec<TileCandidate> =
        entries.into_iter().map(TileCandidate::from_entry).collect();
    let indexed = candidates.iter().filter(|c| c.coordinates.is_some()).count();

    let index_base = normalize_indices(&mut candidates);
    let deduplicated = deduplicate(candidates, bounds);

    if deduplicated.kept.is_empty() {
        return Err(PuzzleError::EmptyArchive {
            archive: archive_name.to_string(),
        });
    }

    let mut report = IngestReport {
        entries: entry_count,
        indexed,
        duplicates: deduplicated.duplicates,
        out_of_bounds: deduplicated.negative + deduplicated.out_of_bounds,
        overflow: 0,
    };

    let tiles: Vec<Tile> = deduplicated
        .kept
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| Tile {
            id: TileId(index),
            display_name: candidate.entry.name,
            image: TileImage {
                entry_path: candidate.entry.path,
                format: candidate.entry.format,
                data: candidate.entry.data,
            },
            coordinates: candidate.coordinates,
        })
        .collect();
    let mut tiles = TileSet::new(tiles);

    let grid = match bounds {
        Some(dimensions) => GridInference {
            dimensions,
            source: GridSource::Descriptor,
        },
        None => infer_grid(&tiles, archive_name),
    };

    let capacity = grid.dimensions.cell_count();
    if tiles.len() > capacity {
        let trimmed = trim_to_capacity(&tiles, capacity);
        report.overflow = tiles.len() - trimmed.len();
        if report.overflow > 0 {
            log::warn!(
                "Archive '{archive_name}' holds {} tiles for {capacity} cells, dropped {} without coordinates",
                tiles.len(),
                report.overflow
            );
        }
        tiles = trimmed;
    }

    if tiles.is_empty() {
        return Err(PuzzleError::EmptyArchive {
            archive: archive_name.to_string(),
        });
    }

    log::info!(
        "Ingested {} tiles from '{archive_name}' as a {} grid ({} source)",
        tiles.len(),
        grid.dimensions,
        grid.source
    );

    Ok(IngestedPuzzle {
        tiles,
        grid,
        index_base,
        report,
    })
}

// Indexed tiles already passed deduplication and are all kept; tiles
// without coordinates fill the remaining cells in set order
fn trim_to_capacity(tiles: &TileSet, capacity: usize) -> TileSet {
    let mut room = capacity.saturating_sub(tiles.indexed_count());
    let kept = tiles
        .iter()
        .filter(|tile| {
            if tile.coordinates.is_known() {
                return true;
            }
            let fits = room > 0;
            room = room.saturating_sub(1);
            fits
        })
        .cloned()
        .collect();
    TileSet::new(kept)
}
