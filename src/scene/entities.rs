use bevy::ecs::system::SystemParam;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::SceneConfig;
use crate::coord::AxialCoord;
use crate::geometry::Direction;
use crate::tile_map::TileMap;

/// Parent of every spawned tile entity.
#[derive(Component, Reflect)]
pub struct TileMapRoot;

/// Marker on tile entities.
#[derive(Component, Reflect)]
pub struct HexTile {
    /// The cell this tile occupies.
    pub coord: AxialCoord,
}

/// Wall hanging from one edge of a tile. Child of the owning [`HexTile`].
#[derive(Component, Reflect)]
pub struct SidePiece {
    /// Edge of the owner the wall hangs from.
    pub direction: Direction,
    /// Drop down to the lower neighbor.
    pub height: f32,
}

/// The scene's tile map, keyed by tile entity.
#[derive(Resource, Deref, DerefMut)]
pub struct SceneTiles(pub TileMap<Entity, Handle<StandardMaterial>>);

/// Shared materials: one per elevation tier plus one for side pieces.
#[derive(Resource)]
pub struct TilePalette {
    /// Tile top materials, lowest tier first. Never empty.
    pub tiers: Vec<Handle<StandardMaterial>>,
    /// Material for every side piece.
    pub side: Handle<StandardMaterial>,
}

impl TilePalette {
    /// Tier index for `elevation` on a `[0, max_elevation]` scale.
    pub fn tier_for(&self, elevation: f32, max_elevation: f32) -> usize {
        let last = self.tiers.len().saturating_sub(1);
        if max_elevation <= 0.0 {
            return 0;
        }
        let t = (elevation / max_elevation).clamp(0.0, 1.0);
        ((t * last as f32).round() as usize).min(last)
    }

    /// Material of `tier`, clamped to the highest tier.
    pub fn tier(&self, tier: usize) -> Handle<StandardMaterial> {
        let last = self.tiers.len().saturating_sub(1);
        self.tiers.get(tier.min(last)).cloned().unwrap_or_default()
    }
}

/// Renderer-side bookkeeping for each tile entity.
#[derive(Resource, Default)]
pub struct TileVisuals {
    pub(super) tiles: HashMap<Entity, TileVisual>,
}

impl TileVisuals {
    /// Number of tile entities currently tracked.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile entity is tracked.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Diameter and side-piece entities of one tile.
#[derive(Default)]
pub(super) struct TileVisual {
    pub(super) diameter: f32,
    pub(super) sides: [Option<(Entity, f32)>; 6],
}

/// Edits requested by the host, applied in order by
/// [`super::systems::apply_tile_commands`].
#[derive(Message, Clone, Debug)]
pub enum TileCommand {
    /// Place a tile using palette tier `tier`.
    Add {
        /// Target cell.
        coord: AxialCoord,
        /// Tile elevation.
        elevation: f32,
        /// Palette tier.
        tier: usize,
    },
    /// Remove the tile at a cell.
    Remove(AxialCoord),
    /// Re-run consistency maintenance around a cell after an elevation edit.
    Refresh(AxialCoord),
    /// Change the tile width and regenerate.
    SetHexWidth(f32),
    /// Regenerate every tile mesh.
    RegenerateAll,
    /// Destroy every tile.
    ClearAll,
    /// Populate the demo map with the configured seed.
    Seed,
    /// Clear and repopulate with the next seed.
    Reseed,
}

/// Bundled system parameters for applying tile edits.
#[derive(SystemParam)]
pub struct TileEditRes<'w, 's> {
    /// The authoritative tile map.
    pub tiles: ResMut<'w, SceneTiles>,
    /// Mesh storage for tile and side-piece meshes.
    pub meshes: ResMut<'w, Assets<Mesh>>,
    /// Renderer bookkeeping.
    pub visuals: ResMut<'w, TileVisuals>,
    /// Shared materials.
    pub palette: Res<'w, TilePalette>,
    /// Scene configuration (the demo seed advances on reseed).
    pub cfg: ResMut<'w, SceneConfig>,
    /// The root entity.
    pub root_q: Query<'w, 's, Entity, With<TileMapRoot>>,
}
