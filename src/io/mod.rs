//! Input/output: archives, catalog, persistence, configuration and the CLI

/// Image entry extraction from ZIP archives
pub mod archive;
/// Puzzle catalog and archive fetch collaborators
pub mod catalog;
/// Command-line interface
pub mod cli;
/// Constants and runtime rules
pub mod configuration;
/// Crate error type
pub mod error;
/// Player name and theme preferences
pub mod preferences;
/// Terminal progress display
pub mod progress;
/// Key-value persistence port and its implementations
pub mod storage;
