//! The capability set a [`crate::tile_map::TileMap`] needs from the host scene.

use std::fmt::Debug;
use std::hash::Hash;

use bevy::prelude::Vec3;

use crate::coord::AxialCoord;
use crate::error::RendererError;
use crate::geometry::Direction;

/// Owns the visual side of tiles: entities, meshes, materials, side pieces.
///
/// The map only ever talks to the scene through this trait. Implementations
/// must not call back into the map; the map holds `&mut self` for the whole
/// operation, so reentry is rejected by the borrow checker.
pub trait TileRenderer {
    /// Opaque reference to one tile's visual entity.
    type Handle: Copy + Eq + Hash + Debug;
    /// Whatever the host uses to shade a tile.
    type Material: Clone + PartialEq + Debug;

    /// Creates the visual entity for `coord` at `position`.
    fn spawn(&mut self, coord: AxialCoord, position: Vec3) -> Result<Self::Handle, RendererError>;

    /// Removes a visual entity and everything attached to it.
    fn destroy(&mut self, handle: Self::Handle) -> Result<(), RendererError>;

    /// Moves an existing entity.
    fn set_position(&mut self, handle: Self::Handle, position: Vec3);

    /// Sets the corner-to-corner width used for mesh generation.
    fn set_diameter(&mut self, handle: Self::Handle, width: f32);

    /// Assigns the tile's material.
    fn set_material(&mut self, handle: Self::Handle, material: &Self::Material);

    /// Rebuilds the tile's geometry for its current diameter.
    fn generate_mesh(&mut self, handle: Self::Handle, coord: AxialCoord);

    /// Attaches, or resizes, the wall on `direction`. `height` is always positive.
    fn add_side_piece(&mut self, handle: Self::Handle, direction: Direction, height: f32);

    /// Detaches the wall on `direction`.
    fn remove_side_piece(&mut self, handle: Self::Handle, direction: Direction);
}
