//! Key/value persistence port
//!
//! The engine never reaches for ambient global storage. Everything it keeps
//! between sessions (points, leaderboards, theme, player identity) goes
//! through a [`KeyValueStore`] handed to it, under the namespaced keys built
//! here.

use crate::io::error::{PuzzleError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key holding the player's display name
pub const PLAYER_NAME_KEY: &str = "playerName";

/// Key holding the UI theme
pub const THEME_KEY: &str = "theme";

/// Key holding a player's point balance
pub fn points_key(player: &str) -> String {
    format!("points:{player}")
}

/// Key holding the leaderboard of one puzzle at one size
pub fn leaderboard_key(puzzle_id: &str, rows: usize, cols: usize) -> String {
    format!("leaderboard:{puzzle_id}:{rows}x{cols}")
}

/// String-keyed persistence collaborator
pub trait KeyValueStore {
    /// Read a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// In-memory store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Test whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store persisted as one JSON object in a file
///
/// The whole file is rewritten on every `set`. Writers in separate processes
/// are not coordinated; the last one to write wins.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store, starting empty if the file does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file is not a JSON object of strings
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let contents =
                std::fs::read_to_string(&path).map_err(|e| PuzzleError::FileSystem {
                    path: path.clone(),
                    operation: "read store",
                    source: e,
                })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| PuzzleError::Serialization {
                    context: "store file",
                    source: e,
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let contents =
            serde_json::to_string_pretty(&self.values).map_err(|e| PuzzleError::Serialization {
                context: "store file",
                source: e,
            })?;

        std::fs::write(&self.path, contents).map_err(|e| PuzzleError::FileSystem {
            path: self.path.clone(),
            operation: "write store",
            source: e,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let previous = self.values.insert(key.to_string(), value);
        if let Err(error) = self.flush() {
            // Keep memory and disk in step when the write fails
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(error);
        }
        Ok(())
    }
}
