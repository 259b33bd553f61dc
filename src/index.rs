//! Coordinate → tile lookup with stable insertion order.

use indexmap::IndexMap;

use crate::coord::AxialCoord;
use crate::error::{HexError, Result};

/// At most one tile per coordinate; a missing key means an empty cell.
///
/// Iteration follows insertion order (removals keep the relative order of the
/// rest), so a full regeneration visits tiles the same way on every run of
/// the same edit history.
#[derive(Debug, Clone)]
pub struct TileIndex<T> {
    tiles: IndexMap<AxialCoord, T>,
}

impl<T> Default for TileIndex<T> {
    fn default() -> Self {
        Self {
            tiles: IndexMap::new(),
        }
    }
}

impl<T> TileIndex<T> {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tile occupies `coord`.
    pub fn contains(&self, coord: AxialCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// The tile at `coord`, or [`HexError::NotFound`].
    pub fn get(&self, coord: AxialCoord) -> Result<&T> {
        self.tiles.get(&coord).ok_or(HexError::NotFound(coord))
    }

    /// Mutable access to the tile at `coord`, or [`HexError::NotFound`].
    pub fn get_mut(&mut self, coord: AxialCoord) -> Result<&mut T> {
        self.tiles.get_mut(&coord).ok_or(HexError::NotFound(coord))
    }

    /// The tile at `coord`, if any.
    pub fn try_get(&self, coord: AxialCoord) -> Option<&T> {
        self.tiles.get(&coord)
    }

    /// Registers `tile` at `coord`. Never overwrites.
    pub fn add(&mut self, coord: AxialCoord, tile: T) -> Result<()> {
        if self.tiles.contains_key(&coord) {
            return Err(HexError::AlreadyExists(coord));
        }
        self.tiles.insert(coord, tile);
        Ok(())
    }

    /// Drops the mapping at `coord`, returning the tile that was there.
    pub fn remove(&mut self, coord: AxialCoord) -> Option<T> {
        self.tiles.shift_remove(&coord)
    }

    /// Snapshot of occupied coordinates in insertion order.
    pub fn keys(&self) -> Vec<AxialCoord> {
        self.tiles.keys().copied().collect()
    }

    /// Tiles in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.tiles.values()
    }

    /// `(coord, tile)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (AxialCoord, &T)> {
        self.tiles.iter().map(|(c, t)| (*c, t))
    }

    /// Number of indexed tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the index holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Forgets every tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}
