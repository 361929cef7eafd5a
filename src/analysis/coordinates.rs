//! Grid coordinate recovery from tile filenames
//!
//! Archives in the wild encode a tile's designed cell in its name in several
//! ways. Patterns are tried in a fixed order and the first match wins:
//!
//! 1. `r3c5`, `r3_c5`, `tile-r3-c5`
//! 2. `row3col5`, `row_3_col_5`
//! 3. `(3,5)`, `( 3 , 5 )`
//! 4. `3x5`, `3_5`, `3-5` anywhere a digit pair is not part of a longer run
//!
//! Only the path-stripped base name is examined.

use crate::io::archive::{ArchiveEntry, base_name};
use regex::Regex;
use std::sync::LazyLock;

/// Which filename convention produced a coordinate pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordinatePattern {
    /// `r<digits>c<digits>`
    ShortRowCol,
    /// `row<digits>col<digits>`
    LongRowCol,
    /// `(<digits>,<digits>)`
    Parenthesized,
    /// `<digits>[x_-]<digits>`
    DigitPair,
}

/// Coordinates as written in a filename, before normalization
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawCoordinates {
    /// Row as written
    pub row: i64,
    /// Column as written
    pub col: i64,
}

/// Result of a successful filename match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedCoordinates {
    /// Extracted pair
    pub coordinates: RawCoordinates,
    /// Convention that matched
    pub pattern: CoordinatePattern,
}

/// An extracted image entry paired with its parsed coordinates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileCandidate {
    /// Source entry
    pub entry: ArchiveEntry,
    /// Coordinates recovered from the entry name
    pub coordinates: Option<RawCoordinates>,
}

impl TileCandidate {
    /// Parse coordinates from the entry's base name
    pub fn from_entry(entry: ArchiveEntry) -> Self {
        let coordinates = parse_coordinates(&entry.name).map(|parsed| parsed.coordinates);
        Self { entry, coordinates }
    }
}

static SHORT_ROW_COL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])r(\d+)[_-]?c(\d+)(?:[^0-9]|$)").ok()
});

static LONG_ROW_COL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])row[_-]?(\d+)[_-]?col[_-]?(\d+)(?:[^0-9]|$)").ok()
});

static PARENTHESIZED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\(\s*(\d+)\s*,\s*(\d+)\s*\)").ok());

static DIGIT_PAIR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[^0-9])(\d+)[x_-](\d+)(?:[^0-9]|$)").ok());

fn grammar() -> [(&'static LazyLock<Option<Regex>>, CoordinatePattern); 4] {
    [
        (&SHORT_ROW_COL, CoordinatePattern::ShortRowCol),
        (&LONG_ROW_COL, CoordinatePattern::LongRowCol),
        (&PARENTHESIZED, CoordinatePattern::Parenthesized),
        (&DIGIT_PAIR, CoordinatePattern::DigitPair),
    ]
}

fn capture_pair(regex: &Regex, name: &str) -> Option<RawCoordinates> {
    let captures = regex.captures(name)?;
    let row = captures.get(1)?.as_str().parse().ok()?;
    let col = captures.get(2)?.as_str().parse().ok()?;
    Some(RawCoordinates { row, col })
}

/// Extract a (row, col) pair from a filename
///
/// Folders are stripped first. A pattern whose digits overflow counts as no
/// match, and `None` means no pattern matched.
pub fn parse_coordinates(file_name: &str) -> Option<ParsedCoordinates> {
    let name = base_name(file_name);

    grammar().into_iter().find_map(|(regex, pattern)| {
        let regex = (**regex).as_ref()?;
        capture_pair(regex, name).map(|coordinates| ParsedCoordinates {
            coordinates,
            pattern,
        })
    })
}
