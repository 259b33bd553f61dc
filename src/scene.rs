//! Bevy host for the tile map: tile entities, side-piece walls, a noise-seeded
//! demo map and keyboard-driven edits.

mod entities;
mod renderer;
mod startup_systems;
mod systems;

pub use entities::{
    HexTile, SceneTiles, SidePiece, TileCommand, TileEditRes, TileMapRoot, TilePalette,
    TileVisuals,
};
pub use renderer::SceneRenderer;
pub use systems::seed_demo_map;

use bevy::prelude::*;

use crate::GameState;
use crate::tile_map::{TileMap, TileMapSettings};

/// Configuration for the tile scene.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct SceneConfig {
    /// Tile width and removal behavior.
    pub tile_map: TileMapSettings,
    /// Origin and orientation of the lattice in the scene.
    pub placement: Transform,
    /// Demo map generation.
    pub demo: DemoMapSettings,
    /// Background clear color.
    pub clear_color: Color,
}

/// Noise parameters for the demo map.
#[derive(Clone, Debug, Reflect)]
pub struct DemoMapSettings {
    /// Number of hex rings around the origin.
    pub radius: u32,
    /// Seed for the elevation noise; advances on every reseed.
    pub noise_seed: u32,
    /// Number of octaves for elevation noise.
    pub noise_octaves: usize,
    /// Spatial scale divisor for noise sampling.
    pub noise_scale: f64,
    /// Highest elevation the noise can produce.
    pub max_elevation: f32,
    /// Elevations snap down to multiples of this, so neighbors form cliffs.
    pub terrace_step: f32,
    /// Elevation change per raise/lower key press.
    pub edit_step: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tile_map: TileMapSettings::default(),
            placement: Transform::IDENTITY,
            demo: DemoMapSettings {
                radius: 8,
                noise_seed: 42,
                noise_octaves: 4,
                noise_scale: 12.0,
                max_elevation: 4.0,
                terrace_step: 0.5,
                edit_step: 0.5,
            },
            clear_color: Color::srgb(0.01, 0.01, 0.02),
        }
    }
}

/// Tile scene plugin: root entity and palette at startup, command-driven edits.
pub struct TileScenePlugin(pub SceneConfig);

impl Plugin for TileScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SceneConfig>()
            .register_type::<TileMapRoot>()
            .register_type::<HexTile>()
            .register_type::<SidePiece>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .init_resource::<TileVisuals>()
            .add_message::<TileCommand>()
            .add_systems(
                Startup,
                (
                    startup_systems::setup_scene,
                    startup_systems::request_initial_map,
                )
                    .chain(),
            );

        match TileMap::new(&self.0.tile_map, self.0.placement) {
            Ok(map) => {
                app.insert_resource(SceneTiles(map));
            }
            Err(err) => {
                error!("Tile map disabled: {err}");
                return;
            }
        }

        app.add_systems(
            Update,
            (systems::send_key_commands, systems::apply_tile_commands)
                .chain()
                .run_if(resource_exists::<SceneTiles>),
        )
        .add_systems(
            Update,
            systems::draw_tile_outlines.run_if(in_state(GameState::Debugging)),
        );
    }
}
