//! Tile ingestion and grid puzzle assembly engine
//!
//! An archive of image fragments is read, each fragment's grid coordinate is
//! recovered from its file name, indices are normalized and deduplicated and
//! the board size is inferred. Players then assemble the board under an
//! assisted or free placement policy, earn points for verified solves and
//! compete on per-puzzle, per-size leaderboards.

#![forbid(unsafe_code)]

/// Placement, scoring, rewards, leaderboards and the play session
pub mod algorithm;
/// Coordinate parsing, normalization, deduplication and grid inference
pub mod analysis;
/// Archives, catalog, persistence, configuration and error handling
pub mod io;
/// Natural ordering of names
pub mod math;
/// Grid geometry, board, palette and tile data structures
pub mod spatial;

pub use io::error::{PuzzleError, Result};
