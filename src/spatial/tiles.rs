//! Tiles produced by the ingestion pipeline
//!
//! A tile is one image fragment plus, when its filename says so, the grid
//! cell it was designed for. Coordinates are a two-state variant so every
//! coordinate-dependent operation has to decide what to do with tiles that
//! carry none.

use crate::spatial::grid::GridPosition;
use image::ImageFormat;
use std::fmt;

/// Identifier of a tile within the active tile set
///
/// Ids are dense indices assigned in extraction order and stay valid until
/// the next archive load replaces the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl TileId {
    /// Position of the tile in its set
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Designed grid coordinate of a tile, if its filename carried one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coordinates {
    /// Filename encoded a zero-based (row, col)
    Known(GridPosition),
    /// Filename matched no coordinate pattern
    Unknown,
}

impl Coordinates {
    /// Build known coordinates from signed values, rejecting negatives
    pub fn from_signed(row: i64, col: i64) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        Some(Self::Known(GridPosition::new(row, col)))
    }

    /// The known position, if any
    pub const fn position(&self) -> Option<GridPosition> {
        match self {
            Self::Known(position) => Some(*position),
            Self::Unknown => None,
        }
    }

    /// Test whether coordinates are known
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// Image payload of a tile, handed to the rendering collaborator untouched
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileImage {
    /// Full path of the entry inside the archive
    pub entry_path: String,
    /// Image format derived from the extension
    pub format: ImageFormat,
    /// Raw encoded bytes
    pub data: Vec<u8>,
}

/// One puzzle fragment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Identifier within the active set
    pub id: TileId,
    /// Path-stripped file name
    pub display_name: String,
    /// Encoded image
    pub image: TileImage,
    /// Designed grid coordinate
    pub coordinates: Coordinates,
}

/// The immutable set of tiles for one loaded archive
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Build a set, reassigning ids to match positions
    pub fn new(tiles: Vec<Tile>) -> Self {
        let tiles = tiles
            .into_iter()
            .enumerate()
            .map(|(index, tile)| Tile {
                id: TileId(index),
                ..tile
            })
            .collect();
        Self { tiles }
    }

    /// Look up a tile by id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Test whether an id belongs to this set
    pub fn contains(&self, id: TileId) -> bool {
        id.index() < self.tiles.len()
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Test whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over tiles in extraction order
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// All ids in extraction order
    pub fn ids(&self) -> Vec<TileId> {
        self.tiles.iter().map(|tile| tile.id).collect()
    }

    /// Number of tiles carrying known coordinates
    pub fn indexed_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.coordinates.is_known())
            .count()
    }

    /// Number of tiles without coordinates
    pub fn missing_count(&self) -> usize {
        self.len() - self.indexed_count()
    }

    /// Test whether every tile carries coordinates
    pub fn all_indexed(&self) -> bool {
        self.tiles.iter().all(|tile| tile.coordinates.is_known())
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
