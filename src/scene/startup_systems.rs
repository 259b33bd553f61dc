use bevy::prelude::*;

use super::SceneConfig;
use super::entities::{TileCommand, TileMapRoot, TilePalette};

/// Tile top colors, lowest elevation first.
const TIER_COLORS: [Color; 5] = [
    Color::srgb(0.16, 0.32, 0.55),
    Color::srgb(0.76, 0.70, 0.50),
    Color::srgb(0.30, 0.55, 0.25),
    Color::srgb(0.45, 0.42, 0.38),
    Color::srgb(0.92, 0.93, 0.95),
];

const SIDE_COLOR: Color = Color::srgb(0.35, 0.27, 0.20);

/// Spawns the map root, camera and light, and builds the [`TilePalette`].
pub fn setup_scene(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<SceneConfig>,
) {
    commands.spawn((
        TileMapRoot,
        Name::new("TileMapRoot"),
        Transform::default(),
        Visibility::default(),
    ));

    let focus = cfg.placement.translation;
    let reach = cfg.tile_map.hex_width * cfg.demo.radius as f32 * 1.2 + cfg.demo.max_elevation;
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Transform::from_translation(focus + Vec3::new(0.0, reach, reach))
            .looking_at(focus, Vec3::Y),
    ));
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let tiers = TIER_COLORS
        .iter()
        .map(|&base_color| {
            materials.add(StandardMaterial {
                base_color,
                perceptual_roughness: 0.9,
                ..default()
            })
        })
        .collect();
    let side = materials.add(StandardMaterial {
        base_color: SIDE_COLOR,
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.insert_resource(TilePalette { tiers, side });
}

/// Asks for the demo map once the scene exists.
pub fn request_initial_map(mut writer: MessageWriter<TileCommand>) {
    writer.write(TileCommand::Seed);
}
