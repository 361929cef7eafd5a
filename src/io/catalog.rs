//! Puzzle catalog and archive fetch collaborators
//!
//! The catalog is read-only to the engine. [`DirectoryCatalog`] serves both
//! roles from a local folder holding a `catalog.json` listing and the
//! archives it references.

use crate::io::error::{PuzzleError, Result};
use crate::spatial::grid::GridDimensions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the listing file inside a catalog directory
pub const CATALOG_FILE_NAME: &str = "catalog.json";

/// Catalog difficulty label
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    /// Beginner puzzles
    Easy,
    /// Intermediate puzzles
    Medium,
    /// Advanced puzzles
    Hard,
    /// User-supplied archives; as a filter, matches every puzzle
    Custom,
    /// Any other label, kept verbatim
    Other(String),
}

impl From<String> for Difficulty {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            "custom" => Self::Custom,
            _ => Self::Other(label),
        }
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => f.write_str("easy"),
            Self::Medium => f.write_str("medium"),
            Self::Hard => f.write_str("hard"),
            Self::Custom => f.write_str("custom"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// One catalog listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDescriptor {
    /// Stable puzzle id, also the leaderboard namespace
    pub id: String,
    /// Display name
    pub name: String,
    /// Difficulty label
    pub difficulty: Difficulty,
    /// Designed row count, if the catalog knows it
    #[serde(default)]
    pub rows: Option<usize>,
    /// Designed column count, if the catalog knows it
    #[serde(default)]
    pub cols: Option<usize>,
    /// Location of the tile archive
    #[serde(alias = "zipPath")]
    pub archive_path: String,
    /// Location of the preview image
    #[serde(default, alias = "preview")]
    pub preview_path: Option<String>,
}

impl PuzzleDescriptor {
    /// Designed dimensions, when both are known and non-zero
    pub fn dimensions(&self) -> Option<GridDimensions> {
        match (self.rows, self.cols) {
            (Some(rows), Some(cols)) if rows > 0 && cols > 0 => {
                Some(GridDimensions::new(rows, cols))
            }
            _ => None,
        }
    }

    /// Preview location, defaulting to `previews/<id>.jpg`
    pub fn preview(&self) -> String {
        self.preview_path
            .clone()
            .unwrap_or_else(|| format!("previews/{}.jpg", self.id))
    }

    /// Name of the archive file, used for dimension hints
    pub fn archive_name(&self) -> &str {
        crate::io::archive::base_name(&self.archive_path)
    }
}

/// Read-only puzzle listing collaborator
pub trait PuzzleCatalog {
    /// List every puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be read or decoded
    fn list_puzzles(&self) -> Result<Vec<PuzzleDescriptor>>;
}

/// Archive download collaborator
pub trait ArchiveFetcher {
    /// Fetch archive bytes for a catalog path
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is missing, unreadable or empty
    fn fetch_archive(&self, path: &str) -> Result<Vec<u8>>;
}

/// Puzzles with a given difficulty; `Custom` selects every puzzle
pub fn filter_by_difficulty<'a>(
    puzzles: &'a [PuzzleDescriptor],
    difficulty: &Difficulty,
) -> Vec<&'a PuzzleDescriptor> {
    puzzles
        .iter()
        .filter(|puzzle| *difficulty == Difficulty::Custom || puzzle.difficulty == *difficulty)
        .collect()
}

/// Find a puzzle by id
pub fn find_puzzle<'a>(puzzles: &'a [PuzzleDescriptor], id: &str) -> Option<&'a PuzzleDescriptor> {
    puzzles.iter().find(|puzzle| puzzle.id == id)
}

/// Catalog served from a local directory
#[derive(Clone, Debug)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    /// Catalog rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Catalog directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    // Catalog paths are often written site-absolute ("/puzzles/a.zip")
    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches(['/', '\\']))
    }
}

impl PuzzleCatalog for DirectoryCatalog {
    fn list_puzzles(&self) -> Result<Vec<PuzzleDescriptor>> {
        let path = self.root.join(CATALOG_FILE_NAME);
        let contents = std::fs::read_to_string(&path).map_err(|e| PuzzleError::FileSystem {
            path: path.clone(),
            operation: "read catalog",
            source: e,
        })?;
        let puzzles: Vec<PuzzleDescriptor> =
            serde_json::from_str(&contents).map_err(|e| PuzzleError::Serialization {
                context: "catalog",
                source: e,
            })?;
        log::debug!("Catalog '{}' lists {} puzzles", path.display(), puzzles.len());
        Ok(puzzles)
    }
}

impl ArchiveFetcher for DirectoryCatalog {
    fn fetch_archive(&self, path: &str) -> Result<Vec<u8>> {
        let resolved = self.resolve(path);
        let bytes = std::fs::read(&resolved).map_err(|e| PuzzleError::ArchiveFetch {
            path: path.to_string(),
            reason: format!("{} ({e})", resolved.display()),
        })?;

        if bytes.is_empty() {
            return Err(PuzzleError::ArchiveFetch {
                path: path.to_string(),
                reason: "archive is empty".to_string(),
            });
        }

        Ok(bytes)
    }
}
