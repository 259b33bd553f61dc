use bevy::prelude::*;
use hexx::{Hex, shapes};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::entities::{SceneTiles, TileCommand, TileEditRes, TilePalette};
use super::renderer::SceneRenderer;
use super::{DemoMapSettings, SceneConfig};
use crate::coord::AxialCoord;
use crate::error::{HexError, Result};
use crate::geometry;
use crate::math;
use crate::renderer::TileRenderer;
use crate::tile_map::TileMap;

/// Width multiplier per `[` / `]` press.
const WIDTH_STEP: f32 = 1.1;

const OUTLINE_COLOR: Color = Color::srgb(0.0, 1.0, 0.8);

// ── Input ──────────────────────────────────────────────────────────

/// Maps key presses to [`TileCommand`]s.
///
/// Arrows raise/lower and `Delete` removes the tile under the lattice origin.
pub fn send_key_commands(
    keys: Res<ButtonInput<KeyCode>>,
    tiles: Res<SceneTiles>,
    cfg: Res<SceneConfig>,
    palette: Res<TilePalette>,
    mut writer: MessageWriter<TileCommand>,
) {
    let width = tiles.hex_width();
    if keys.just_pressed(KeyCode::KeyR) {
        writer.write(TileCommand::RegenerateAll);
    }
    if keys.just_pressed(KeyCode::Backspace) {
        writer.write(TileCommand::ClearAll);
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        writer.write(TileCommand::SetHexWidth(width / WIDTH_STEP));
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        writer.write(TileCommand::SetHexWidth(width * WIDTH_STEP));
    }
    if keys.just_pressed(KeyCode::KeyN) {
        writer.write(TileCommand::Reseed);
    }

    let focus = tiles.quantize(cfg.placement.translation);
    if keys.just_pressed(KeyCode::Delete) {
        writer.write(TileCommand::Remove(focus));
    }
    let step = if keys.just_pressed(KeyCode::ArrowUp) {
        cfg.demo.edit_step
    } else if keys.just_pressed(KeyCode::ArrowDown) {
        -cfg.demo.edit_step
    } else {
        return;
    };
    let elevation = tiles.tile(focus).map_or(0.0, |t| t.elevation()) + step;
    writer.write(TileCommand::Add {
        coord: focus,
        elevation,
        tier: palette.tier_for(elevation, cfg.demo.max_elevation),
    });
}

// ── Edits ──────────────────────────────────────────────────────────

/// Applies queued [`TileCommand`]s to the tile map, in order.
///
/// A failing command is logged and skipped; later commands still run.
pub fn apply_tile_commands(
    mut commands: Commands,
    mut reader: MessageReader<TileCommand>,
    mut res: TileEditRes,
) {
    let Ok(root) = res.root_q.single() else {
        return;
    };
    let placement = res.cfg.placement;
    let side_material = res.palette.side.clone();
    let mut renderer = SceneRenderer::new(
        &mut commands,
        &mut res.meshes,
        &mut res.visuals,
        side_material,
        placement,
        root,
    );

    for cmd in reader.read() {
        let outcome = match cmd {
            TileCommand::Add {
                coord,
                elevation,
                tier,
            } => res
                .tiles
                .create_and_add_tile(&mut renderer, *coord, *elevation, res.palette.tier(*tier))
                .map(|_| ()),
            TileCommand::Remove(coord) => {
                res.tiles
                    .try_removing_tile(&mut renderer, *coord)
                    .map(|removed| {
                        if !removed {
                            debug!("No tile to remove at {coord}");
                        }
                    })
            }
            TileCommand::Refresh(coord) => res.tiles.refresh_tile(&mut renderer, *coord),
            TileCommand::SetHexWidth(width) => res.tiles.set_hex_width(&mut renderer, *width),
            TileCommand::RegenerateAll => {
                res.tiles.regenerate_all_tiles(&mut renderer);
                Ok(())
            }
            TileCommand::ClearAll => res.tiles.clear_all_tiles(&mut renderer),
            TileCommand::Seed => {
                let max = res.cfg.demo.max_elevation;
                let palette = &res.palette;
                seed_demo_map(&mut res.tiles.0, &mut renderer, &res.cfg.demo, |e| {
                    palette.tier(palette.tier_for(e, max))
                })
                .map(|_| ())
            }
            TileCommand::Reseed => {
                res.cfg.demo.noise_seed = res.cfg.demo.noise_seed.wrapping_add(1);
                let max = res.cfg.demo.max_elevation;
                let palette = &res.palette;
                res.tiles.clear_all_tiles(&mut renderer).and_then(|()| {
                    seed_demo_map(&mut res.tiles.0, &mut renderer, &res.cfg.demo, |e| {
                        palette.tier(palette.tier_for(e, max))
                    })
                    .map(|_| ())
                })
            }
        };

        match outcome {
            Ok(()) => {}
            Err(err @ HexError::InternalInvariantViolation(_)) => {
                error!("Tile command {cmd:?} aborted: {err}");
            }
            Err(err) => warn!("Tile command {cmd:?} failed: {err}"),
        }
    }
}

/// Fills `radius` rings around the origin with noise-derived, terraced tiles.
///
/// Returns the number of tiles placed.
pub fn seed_demo_map<H, M, R>(
    map: &mut TileMap<H, M>,
    renderer: &mut R,
    demo: &DemoMapSettings,
    material_for: impl Fn(f32) -> M,
) -> Result<usize>
where
    H: Copy,
    M: Clone + PartialEq,
    R: TileRenderer<Handle = H, Material = M>,
{
    let fbm: Fbm<Perlin> = Fbm::new(demo.noise_seed).set_octaves(demo.noise_octaves);
    let mut placed = 0;
    for hex in shapes::hexagon(Hex::ZERO, demo.radius) {
        let coord = AxialCoord::from(hex);
        let pos = map.place(coord, 0.0);
        let noise_val = fbm.get([
            pos.x as f64 / demo.noise_scale,
            pos.z as f64 / demo.noise_scale,
        ]);
        let elevation = math::snap_to_step(
            math::map_noise_to_range(noise_val, 0.0, demo.max_elevation),
            demo.terrace_step,
        );
        map.create_and_add_tile(renderer, coord, elevation, material_for(elevation))?;
        placed += 1;
    }
    info!(
        "Seeded {placed} tiles (seed {}, radius {})",
        demo.noise_seed, demo.radius
    );
    Ok(placed)
}

// ── Debug overlay ──────────────────────────────────────────────────

/// Outlines every tile top with gizmos.
pub fn draw_tile_outlines(mut gizmos: Gizmos, tiles: Res<SceneTiles>, cfg: Res<SceneConfig>) {
    let Ok(outline) = geometry::vertices(tiles.hex_width()) else {
        return;
    };
    let rotation = cfg.placement.rotation;
    let scale = cfg.placement.scale;
    for (coord, tile) in tiles.tiles().iter() {
        let center = tiles.place(coord, tile.elevation());
        let corners = outline.map(|v| center + rotation * (v * scale));
        gizmos.linestrip(corners.into_iter().chain([corners[0]]), OUTLINE_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::RecordingRenderer;
    use crate::tile_map::TileMapSettings;

    fn demo(radius: u32) -> DemoMapSettings {
        DemoMapSettings {
            radius,
            ..SceneConfig::default().demo
        }
    }

    #[test]
    fn seeding_fills_every_ring() {
        let mut map = TileMap::new(&TileMapSettings::default(), Transform::IDENTITY).unwrap();
        let mut r = RecordingRenderer::default();
        let placed = seed_demo_map(&mut map, &mut r, &demo(3), |_| "tile").unwrap();
        assert_eq!(placed, 37);
        assert_eq!(map.len(), 37);
    }

    #[test]
    fn seeded_elevations_are_terraced_and_walled() {
        let settings = demo(4);
        let mut map = TileMap::new(&TileMapSettings::default(), Transform::IDENTITY).unwrap();
        let mut r = RecordingRenderer::default();
        seed_demo_map(&mut map, &mut r, &settings, |_| "tile").unwrap();

        for (coord, tile) in map.tiles().iter() {
            let steps = tile.elevation() / settings.terrace_step;
            assert!((steps - steps.round()).abs() < 1e-4);
            for (dir, height) in tile.side_pieces() {
                let lower = map.tile(coord.neighbor(dir)).unwrap();
                assert!((tile.elevation() - lower.elevation() - height).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn seeding_is_deterministic_per_seed() {
        let settings = demo(2);
        let elevations = || {
            let mut map = TileMap::new(&TileMapSettings::default(), Transform::IDENTITY).unwrap();
            let mut r = RecordingRenderer::default();
            seed_demo_map(&mut map, &mut r, &settings, |_| "tile").unwrap();
            map.tiles()
                .iter()
                .map(|(c, t)| (c, t.elevation()))
                .collect::<Vec<_>>()
        };
        assert_eq!(elevations(), elevations());
    }
}
