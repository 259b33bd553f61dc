#![warn(missing_docs)]
//! Hex tile map viewer.
//!
//! Seeds a terraced hex map from noise and lets the keyboard drive the tile
//! map: `R` regenerate, `Backspace` clear, `[`/`]` hex width, `N` reseed,
//! arrows raise/lower the center tile, `Delete` removes it, `Tab` inspector.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use hex_tile_map::GameState;
use hex_tile_map::scene::{SceneConfig, TileScenePlugin};

/// Command-line overrides for [`SceneConfig`].
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(version, about = "Hex tile map viewer")]
struct Args {
    /// Number of hex rings in the demo map.
    #[arg(long)]
    radius: Option<u32>,
    /// Corner-to-corner tile width.
    #[arg(long)]
    hex_width: Option<f32>,
    /// Elevation noise seed.
    #[arg(long)]
    seed: Option<u32>,
    /// Keep walls facing removed tiles until their owner is refreshed.
    #[arg(long)]
    keep_stale_sides: bool,
}

#[cfg(feature = "native")]
fn scene_config() -> SceneConfig {
    use clap::Parser;
    use hex_tile_map::RemovalPolicy;

    let args = Args::parse();
    let mut cfg = SceneConfig::default();
    if let Some(radius) = args.radius {
        cfg.demo.radius = radius;
    }
    if let Some(hex_width) = args.hex_width {
        cfg.tile_map.hex_width = hex_width;
    }
    if let Some(seed) = args.seed {
        cfg.demo.noise_seed = seed;
    }
    if args.keep_stale_sides {
        cfg.tile_map.removal = RemovalPolicy::KeepStaleSides;
    }
    cfg
}

#[cfg(not(feature = "native"))]
fn scene_config() -> SceneConfig {
    SceneConfig::default()
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Tile Map".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(TileScenePlugin(scene_config()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
