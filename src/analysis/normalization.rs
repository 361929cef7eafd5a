//! Index base normalization and duplicate coordinate resolution

use crate::analysis::coordinates::{RawCoordinates, TileCandidate};
use crate::io::archive::ArchiveEntry;
use crate::spatial::grid::GridDimensions;
use crate::spatial::tiles::Coordinates;
use std::collections::HashSet;

/// Indexing convention detected in a candidate set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexBase {
    /// No candidate carried coordinates
    NoIndices,
    /// Coordinates already start at zero (or at neither zero nor one)
    ZeroBased,
    /// Coordinates started at one and were shifted down
    OneBasedShifted,
}

/// Shift 1-based coordinates to 0-based in place
///
/// When no indexed candidate has a zero row or column and the smallest row
/// or smallest column is exactly one, every indexed candidate is shifted by
/// one on both axes. Running it again on the result changes nothing.
pub fn normalize_indices(candidates: &mut [TileCandidate]) -> IndexBase {
    let indexed: Vec<RawCoordinates> = candidates.iter().filter_map(|c| c.coordinates).collect();

    let (Some(min_row), Some(min_col)) = (
        indexed.iter().map(|c| c.row).min(),
        indexed.iter().map(|c| c.col).min(),
    ) else {
        return IndexBase::NoIndices;
    };

    let has_zero = indexed.iter().any(|c| c.row == 0 || c.col == 0);
    if has_zero || (min_row != 1 && min_col != 1) {
        return IndexBase::ZeroBased;
    }

    for coordinates in candidates.iter_mut().filter_map(|c| c.coordinates.as_mut()) {
        coordinates.row -= 1;
        coordinates.col -= 1;
    }
    log::debug!("Shifted {} indexed tiles from 1-based to 0-based", indexed.len());

    IndexBase::OneBasedShifted
}

/// A candidate that survived deduplication, with validated coordinates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCandidate {
    /// Source entry
    pub entry: ArchiveEntry,
    /// Non-negative coordinates, or `Unknown`
    pub coordinates: Coordinates,
}

/// Output of deduplication with counts of what was dropped
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deduplicated {
    /// Surviving candidates in extraction order
    pub kept: Vec<ResolvedCandidate>,
    /// Later claims on an already claimed cell
    pub duplicates: usize,
    /// Candidates with a negative row or column
    pub negative: usize,
    /// Candidates outside the supplied bounds
    pub out_of_bounds: usize,
}

impl Deduplicated {
    /// Total number of dropped candidates
    pub const fn dropped(&self) -> usize {
        self.duplicates + self.negative + self.out_of_bounds
    }
}

/// Keep the first candidate claiming each cell
///
/// Candidates are visited in the given (extraction) order. Unindexed
/// candidates are always kept. With `bounds`, indexed candidates outside
/// `[0,rows) x [0,cols)` are dropped silently; callers report the retained
/// count rather than an error.
pub fn deduplicate(candidates: Vec<TileCandidate>, bounds: Option<GridDimensions>) -> Deduplicated {
    let mut seen = HashSet::new();
    let mut result = Deduplicated::default();

    for candidate in candidates {
        let coordinates = match candidate.coordinates {
            None => Coordinates::Unknown,
            Some(raw) => match Coordinates::from_signed(raw.row, raw.col) {
                Some(coordinates) => coordinates,
                None => {
                    log::debug!("Dropping '{}': negative coordinates", candidate.entry.name);
                    result.negative += 1;
                    continue;
                }
            },
        };

        if let Coordinates::Known(position) = coordinates {
            if bounds.is_some_and(|b| !b.contains(position)) {
                log::debug!(
                    "Dropping '{}': {position} outside the grid",
                    candidate.entry.name
                );
                result.out_of_bounds += 1;
                continue;
            }
            if !seen.insert(position) {
                log::debug!(
                    "Dropping '{}': {position} already claimed",
                    candidate.entry.name
                );
                result.duplicates += 1;
                continue;
            }
        }

        result.kept.push(ResolvedCandidate {
            entry: candidate.entry,
            coordinates,
        });
    }

    if result.dropped() > 0 {
        log::warn!(
            "Dropped {} tiles ({} duplicate, {} negative, {} out of bounds)",
            result.dropped(),
            result.duplicates,
            result.negative,
            result.out_of_bounds
        );
    }

    result
}
