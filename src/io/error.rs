//! Error types for archive ingestion, puzzle play and persistence

use std::fmt;
use std::path::PathBuf;

/// Main error type for all puzzle operations
///
/// Every variant is recoverable. Operations that return one of these leave
/// the board, palette, tile set and stored state exactly as they were.
#[derive(Debug)]
pub enum PuzzleError {
    /// The archive bytes could not be opened or decompressed
    ArchiveRead {
        /// Name of the archive being read
        archive: String,
        /// Underlying archive error
        source: zip::result::ZipError,
    },

    /// The archive was readable but held no qualifying image entries
    EmptyArchive {
        /// Name of the archive being read
        archive: String,
    },

    /// The archive fetch collaborator failed or returned an empty body
    ArchiveFetch {
        /// Catalog path that was requested
        path: String,
        /// Description of the failure
        reason: String,
    },

    /// Scoring was requested while some tiles carry no coordinates
    MissingIndices {
        /// Number of tiles without coordinates
        missing: usize,
        /// Number of tiles in the active set
        total: usize,
    },

    /// Auto-solve was requested with too few points
    InsufficientPoints {
        /// Current balance
        balance: u64,
        /// Cost of the requested action
        cost: u64,
    },

    /// Assisted mode rejected a placement that contradicts known coordinates
    IncorrectPlacement {
        /// Tile that was dropped
        tile: usize,
        /// Target row
        row: usize,
        /// Target column
        col: usize,
    },

    /// Tile id is not part of the active tile set
    UnknownTile {
        /// The rejected tile id
        tile: usize,
    },

    /// Target cell lies outside the board
    CellOutOfBounds {
        /// Target row
        row: usize,
        /// Target column
        col: usize,
        /// Board dimensions (rows, cols)
        dimensions: (usize, usize),
    },

    /// Operation needs a loaded tile set
    NoTilesLoaded,

    /// JSON encoding or decoding failed
    Serialization {
        /// What was being encoded or decoded
        context: &'static str,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArchiveRead { archive, source } => {
                write!(f, "Failed to read archive '{archive}': {source}")
            }
            Self::EmptyArchive { archive } => {
                write!(f, "No tiles found in archive '{archive}'")
            }
            Self::ArchiveFetch { path, reason } => {
                write!(f, "Failed to fetch archive '{path}': {reason}")
            }
            Self::MissingIndices { missing, total } => {
                write!(
                    f,
                    "Cannot verify: {missing} of {total} tiles lack row/col indices"
                )
            }
            Self::InsufficientPoints { balance, cost } => {
                write!(f, "Need {cost} points, only {balance} available")
            }
            Self::IncorrectPlacement { tile, row, col } => {
                write!(f, "Incorrect placement of tile {tile} at ({row},{col})")
            }
            Self::UnknownTile { tile } => {
                write!(f, "Unknown tile {tile}")
            }
            Self::CellOutOfBounds {
                row,
                col,
                dimensions,
            } => {
                write!(
                    f,
                    "Cell ({row},{col}) is outside the {}x{} board",
                    dimensions.0, dimensions.1
                )
            }
            Self::NoTilesLoaded => write!(f, "No puzzle is loaded"),
            Self::Serialization { context, source } => {
                write!(f, "Serialization error in {context}: {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ArchiveRead { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl PuzzleError {
    /// True for the transient assisted-mode rejection signal
    pub const fn is_incorrect_placement(&self) -> bool {
        matches!(self, Self::IncorrectPlacement { .. })
    }
}
