#![warn(missing_docs)]
//! Hexagonal tile grid over a 3D scene.
//!
//! Converts between world positions and axial hex cells, keeps the set of
//! placed tiles, and keeps every tile's side pieces (walls down to lower
//! neighbors) consistent as tiles come and go. Rendering is delegated to a
//! [`renderer::TileRenderer`]; [`scene`] provides the Bevy one.

pub mod coord;
pub mod error;
pub mod geometry;
pub mod index;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod tile_map;
pub mod transform;

pub use coord::{AxialCoord, CubeCoord};
pub use error::{HexError, RendererError};
pub use geometry::Direction;
pub use index::TileIndex;
pub use renderer::TileRenderer;
pub use tile_map::{RemovalPolicy, Tile, TileMap, TileMapSettings};
pub use transform::GridTransform;

use bevy::prelude::*;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal editing.
    #[default]
    Running,
    /// Inspector and tile outlines visible (Tab to toggle).
    Debugging,
}
