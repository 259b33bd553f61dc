//! The tile map: index + layout, and the protocol that keeps every tile's
//! side pieces in step with its neighbors.

mod tile;

pub use tile::Tile;

use bevy::log::{debug, error, info, warn};
use bevy::prelude::*;

use crate::coord::AxialCoord;
use crate::error::{HexError, Result};
use crate::geometry::Direction;
use crate::index::TileIndex;
use crate::renderer::TileRenderer;
use crate::transform::GridTransform;

/// What happens to the neighbors of a removed tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum RemovalPolicy {
    /// Recompute the former neighbors' side pieces, mirroring the add path.
    #[default]
    RefreshNeighbors,
    /// Leave the neighbors alone. Walls that faced the removed tile stay until
    /// the neighbor is refreshed some other way.
    KeepStaleSides,
}

/// Tunables for a [`TileMap`].
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct TileMapSettings {
    /// Corner-to-corner tile width in scene units.
    pub hex_width: f32,
    /// Neighbor handling on removal.
    pub removal: RemovalPolicy,
}

impl Default for TileMapSettings {
    fn default() -> Self {
        Self {
            hex_width: 2.0,
            removal: RemovalPolicy::default(),
        }
    }
}

/// Authoritative set of placed tiles.
///
/// Every structural edit goes through here and finishes before returning;
/// the renderer is handed in per call and never owns the index.
#[derive(Debug, Clone)]
pub struct TileMap<H, M> {
    tiles: TileIndex<Tile<H, M>>,
    grid: GridTransform,
    removal: RemovalPolicy,
}

impl<H: Copy, M: Clone + PartialEq> TileMap<H, M> {
    /// An empty map.
    pub fn new(settings: &TileMapSettings, placement: Transform) -> Result<Self> {
        Ok(Self {
            tiles: TileIndex::new(),
            grid: GridTransform::new(settings.hex_width, placement)?,
            removal: settings.removal,
        })
    }

    /// A map adopting tiles whose visuals already exist.
    ///
    /// Side pieces are not computed; call [`Self::refresh_tile`] where needed.
    pub fn with_tiles(
        settings: &TileMapSettings,
        placement: Transform,
        tiles: impl IntoIterator<Item = Tile<H, M>>,
    ) -> Result<Self> {
        let mut map = Self::new(settings, placement)?;
        for tile in tiles {
            map.tiles.add(tile.coord, tile)?;
        }
        Ok(map)
    }

    // ── Queries ────────────────────────────────────────────────────

    /// The tile at `coord`, if any.
    pub fn tile(&self, coord: AxialCoord) -> Option<&Tile<H, M>> {
        self.tiles.try_get(coord)
    }

    /// Read access to the underlying index.
    pub fn tiles(&self) -> &TileIndex<Tile<H, M>> {
        &self.tiles
    }

    /// Number of placed tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile is placed.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Current corner-to-corner tile width.
    pub fn hex_width(&self) -> f32 {
        self.grid.hex_width()
    }

    /// Removal behavior this map was built with.
    pub fn removal_policy(&self) -> RemovalPolicy {
        self.removal
    }

    /// Cell under a host-scene position.
    pub fn quantize(&self, world_pos: Vec3) -> AxialCoord {
        self.grid.quantize(world_pos)
    }

    /// Host-scene center of `coord` at `elevation`.
    pub fn place(&self, coord: AxialCoord, elevation: f32) -> Vec3 {
        self.grid.place(coord, elevation)
    }

    // ── Structural edits ───────────────────────────────────────────

    /// Places a tile, replacing whatever differs at `coord`.
    ///
    /// Identical `(coord, elevation, material)` is a no-op returning the
    /// existing handle. Occupied neighbors get their side pieces recomputed
    /// and their meshes rebuilt.
    pub fn create_and_add_tile<R>(
        &mut self,
        renderer: &mut R,
        coord: AxialCoord,
        elevation: f32,
        material: M,
    ) -> Result<H>
    where
        R: TileRenderer<Handle = H, Material = M>,
    {
        check_elevation(elevation)?;
        if let Some(existing) = self.tiles.try_get(coord) {
            if existing.elevation == elevation && existing.material == material {
                return Ok(existing.handle);
            }
            debug!("Replacing tile at {coord}");
            self.detach(renderer, coord)?;
        }

        let handle = renderer.spawn(coord, self.grid.place(coord, elevation))?;
        renderer.set_diameter(handle, self.grid.hex_width());
        self.tiles
            .add(coord, Tile::new(handle, coord, elevation, material.clone()))?;

        self.refresh_neighbors(renderer, coord)?;
        self.set_up_side_pieces(renderer, coord)?;
        renderer.generate_mesh(handle, coord);
        renderer.set_material(handle, &material);

        debug!("Added tile at {coord}, elevation {elevation}");
        Ok(handle)
    }

    /// Destroys and unindexes the tile at `coord`. `false` if there was none.
    pub fn try_removing_tile<R>(&mut self, renderer: &mut R, coord: AxialCoord) -> Result<bool>
    where
        R: TileRenderer<Handle = H, Material = M>,
    {
        if !self.detach(renderer, coord)? {
            return Ok(false);
        }
        if self.removal == RemovalPolicy::RefreshNeighbors {
            self.refresh_neighbors(renderer, coord)?;
        }
        debug!("Removed tile at {coord}");
        Ok(true)
    }

    /// Recomputes the walls of the tile at `coord` from its neighbors' elevations.
    ///
    /// A wall exists on an edge exactly when the neighbor there is strictly
    /// lower; its height is the difference. Calling on an empty cell is a bug
    /// in the caller and yields [`HexError::InternalInvariantViolation`].
    pub fn set_up_side_pieces<R>(&mut self, renderer: &mut R, coord: AxialCoord) -> Result<()>
    where
        R: TileRenderer<Handle = H, Material = M>,
    {
        let Some(tile) = self.tiles.try_get(coord) else {
            error!("Side pieces requested for empty cell {coord}");
            return Err(HexError::InternalInvariantViolation(format!(
                "side pieces requested for unindexed cell {coord}"
            )));
        };
        let (handle, elevation, current) = (tile.handle, tile.elevation, tile.sides);

        let wanted = Direction::ALL.map(|dir| {
            self.tiles
                .try_get(coord.neighbor(dir))
                .map(|neighbor| elevation - neighbor.elevation)
                .filter(|drop| *drop > 0.0)
        });

        for dir in Direction::ALL {
            match (wanted[dir.index()], current[dir.index()]) {
                (Some(height), _) => renderer.add_side_piece(handle, dir, height),
                (None, Some(_)) => renderer.remove_side_piece(handle, dir),
                (None, None) => {}
            }
        }

        self.tiles.get_mut(coord)?.sides = wanted;
        Ok(())
    }

    /// Re-places every tile for the current width and rebuilds its mesh.
    ///
    /// Side pieces are left as they are.
    pub fn regenerate_all_tiles<R>(&self, renderer: &mut R)
    where
        R: TileRenderer<Handle = H, Material = M>,
    {
        for (coord, tile) in self.tiles.iter() {
            renderer.set_position(tile.handle, self.grid.place(coord, tile.elevation));
            renderer.set_diameter(tile.handle, self.grid.hex_width());
            renderer.generate_mesh(tile.handle, coord);
        }
        info!("Regenerated {} tiles", self.tiles.len());
    }

    /// Empties the map and destroys every tile it tracked.
    ///
    /// Works from a snapshot of the index. A tile whose destroy fails stays
    /// indexed; the rest are still destroyed and the first failure returned.
    pub fn clear_all_tiles<R>(&mut self, renderer: &mut R) -> Result<()>
    where
        R: TileRenderer<Handle = H, Material = M>,
    {
        let snapshot: Vec<(AxialCoord, H)> =
            self.tiles.iter().map(|(c, t)| (c, t.handle)).collect();
        let mut first_err = None;
        let mut cleared = 0;
        for (coord, handle) in snapshot {
            match renderer.destroy(handle) {
                Ok(()) => {
                    self.tiles.remove(coord);
                    cleared += 1;
                }
                Err(err) => {
                    warn!("Keeping tile at {coord}: {err}");
                    first_err.get_or_insert(err);
                }
            }
        }
        info!("Cleared {cleared} tiles");
        match first_err {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    // ── Settings and elevation ─────────────────────────────────────

    /// Changes the tile width and regenerates every tile.
    pub fn set_hex_width<R>(&mut self, renderer: &mut R, hex_width: f32) -> Result<()>
    where
        R: TileRenderer<Handle = H, Material = M>,
    {
        self.grid.set_hex_width(hex_width)?;
        info!("Hex width set to {hex_width}");
        self.regenerate_all_tiles(renderer);
        Ok(())
    }

    /// Overwrites the elevation snapshot of the tile at `coord`.
    ///
    /// Nothing else is updated: follow up with [`Self::refresh_tile`].
    pub fn set_elevation(&mut self, coord: AxialCoord, elevation: f32) -> Result<()> {
        check_elevation(elevation)?;
        self.tiles.get_mut(coord)?.elevation = elevation;
        Ok(())
    }

    /// Brings the tile at `coord` and its neighbors back in line with the
    /// current elevations: re-place, recompute side pieces, rebuild meshes.
    pub fn refresh_tile<R>(&mut self, renderer: &mut R, coord: AxialCoord) -> Result<()>
    where
        R: TileRenderer<Handle = H, Material = M>,
    {
        let tile = self.tiles.get(coord)?;
        let handle = tile.handle;
        renderer.set_position(handle, self.grid.place(coord, tile.elevation));
        self.set_up_side_pieces(renderer, coord)?;
        renderer.generate_mesh(handle, coord);
        self.refresh_neighbors(renderer, coord)
    }

    // ── Internals ──────────────────────────────────────────────────

    /// Destroys the visual entity, then drops the index entry.
    fn detach<R>(&mut self, renderer: &mut R, coord: AxialCoord) -> Result<bool>
    where
        R: TileRenderer<Handle = H, Material = M>,
    {
        let Some(tile) = self.tiles.try_get(coord) else {
            return Ok(false);
        };
        renderer.destroy(tile.handle)?;
        self.tiles.remove(coord);
        Ok(true)
    }

    fn refresh_neighbors<R>(&mut self, renderer: &mut R, coord: AxialCoord) -> Result<()>
    where
        R: TileRenderer<Handle = H, Material = M>,
    {
        for neighbor in coord.neighbors() {
            let Some(handle) = self.tiles.try_get(neighbor).map(|t| t.handle) else {
                continue;
            };
            self.set_up_side_pieces(renderer, neighbor)?;
            renderer.generate_mesh(handle, neighbor);
        }
        Ok(())
    }
}

fn check_elevation(elevation: f32) -> Result<()> {
    if elevation.is_finite() {
        Ok(())
    } else {
        Err(HexError::InvalidArgument(format!(
            "elevation must be finite, got {elevation}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::RecordingRenderer;

    type TestMap = TileMap<u32, &'static str>;

    fn empty_map() -> TestMap {
        TileMap::new(&TileMapSettings::default(), Transform::IDENTITY).unwrap()
    }

    fn dir_towards(from: AxialCoord, to: AxialCoord) -> Direction {
        Direction::ALL
            .into_iter()
            .find(|d| from.neighbor(*d) == to)
            .unwrap()
    }

    // ── create_and_add_tile ─────────────────────────────────────────

    #[test]
    fn new_tile_is_spawned_placed_and_shaded() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let c = AxialCoord::new(1, 0);
        let h = map.create_and_add_tile(&mut r, c, 2.0, "grass").unwrap();

        assert_eq!(r.spawned, vec![(h, c)]);
        assert!((r.positions[&h] - map.place(c, 2.0)).length() < 1e-6);
        assert_eq!(r.diameters[&h], 2.0);
        assert_eq!(r.materials[&h], "grass");
        assert_eq!(r.builds(h), 1);
        assert_eq!(map.tile(c).map(Tile::handle), Some(h));
    }

    #[test]
    fn identical_add_is_idempotent() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let c = AxialCoord::new(-2, 3);
        let first = map.create_and_add_tile(&mut r, c, 1.0, "sand").unwrap();
        let second = map.create_and_add_tile(&mut r, c, 1.0, "sand").unwrap();

        assert_eq!(first, second);
        assert_eq!(map.len(), 1);
        assert_eq!(r.spawned.len(), 1);
        assert!(r.destroyed.is_empty());
    }

    #[test]
    fn differing_add_replaces_the_tile() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let c = AxialCoord::ZERO;
        let old = map.create_and_add_tile(&mut r, c, 1.0, "sand").unwrap();
        let new = map.create_and_add_tile(&mut r, c, 1.0, "rock").unwrap();

        assert_ne!(old, new);
        assert_eq!(r.destroyed, vec![old]);
        assert_eq!(map.len(), 1);
        assert_eq!(*map.tile(c).unwrap().material(), "rock");
    }

    #[test]
    fn raising_a_neighbor_gives_it_a_wall_facing_down() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let low = AxialCoord::ZERO;
        let high = AxialCoord::new(1, 0);
        let low_h = map.create_and_add_tile(&mut r, low, 0.0, "a").unwrap();
        let high_h = map.create_and_add_tile(&mut r, high, 3.0, "a").unwrap();

        let facing_low = dir_towards(high, low);
        assert_eq!(r.side(high_h, facing_low), Some(3.0));
        assert_eq!(r.side_count(high_h), 1);
        assert_eq!(r.side(low_h, facing_low.opposite()), None);
        assert_eq!(r.side_count(low_h), 0);

        let tile = map.tile(high).unwrap();
        assert_eq!(tile.side_pieces().collect::<Vec<_>>(), vec![(facing_low, 3.0)]);
    }

    #[test]
    fn adding_a_lower_tile_updates_existing_neighbor() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let a = AxialCoord::new(2, -1);
        let a_h = map.create_and_add_tile(&mut r, a, 5.0, "a").unwrap();
        assert_eq!(r.builds(a_h), 1);

        for dir in Direction::ALL {
            let b = a.neighbor(dir);
            let b_h = map.create_and_add_tile(&mut r, b, 2.0, "b").unwrap();
            assert_eq!(r.side(a_h, dir), Some(3.0));
            assert_eq!(r.side(b_h, dir.opposite()), None);
        }
        assert_eq!(r.side_count(a_h), 6);
        assert_eq!(r.builds(a_h), 7);
    }

    #[test]
    fn equal_elevations_make_no_walls() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        for c in AxialCoord::ZERO.spiral_range(1) {
            map.create_and_add_tile(&mut r, c, 4.0, "flat").unwrap();
        }
        assert!(r.sides.is_empty());
    }

    #[test]
    fn spawn_failure_propagates_and_leaves_index_untouched() {
        let mut map = empty_map();
        let mut r = RecordingRenderer {
            fail_spawn: true,
            ..Default::default()
        };
        let err = map
            .create_and_add_tile(&mut r, AxialCoord::ZERO, 0.0, "a")
            .unwrap_err();
        assert!(matches!(err, HexError::Renderer(_)));
        assert!(map.is_empty());
    }

    #[test]
    fn non_finite_elevation_is_rejected() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        assert!(matches!(
            map.create_and_add_tile(&mut r, AxialCoord::ZERO, f32::NAN, "a"),
            Err(HexError::InvalidArgument(_))
        ));
        assert!(r.spawned.is_empty());
    }

    // ── set_up_side_pieces ──────────────────────────────────────────

    #[test]
    fn side_pieces_on_empty_cell_is_an_invariant_violation() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        assert!(matches!(
            map.set_up_side_pieces(&mut r, AxialCoord::new(4, 4)),
            Err(HexError::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn side_piece_setup_is_idempotent() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let a = AxialCoord::ZERO;
        let a_h = map.create_and_add_tile(&mut r, a, 5.0, "a").unwrap();
        map.create_and_add_tile(&mut r, a.neighbor(Direction::ALL[1]), 2.0, "b")
            .unwrap();

        let before = map.tile(a).unwrap().clone();
        map.set_up_side_pieces(&mut r, a).unwrap();
        map.set_up_side_pieces(&mut r, a).unwrap();
        assert_eq!(map.tile(a).unwrap(), &before);
        assert_eq!(r.side(a_h, Direction::ALL[1]), Some(3.0));
        assert_eq!(r.side_count(a_h), 1);
    }

    // ── removal ─────────────────────────────────────────────────────

    #[test]
    fn removing_absent_tile_returns_false() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        assert!(!map.try_removing_tile(&mut r, AxialCoord::ZERO).unwrap());
        assert!(r.destroyed.is_empty());
    }

    #[test]
    fn removal_refreshes_neighbors_by_default() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let high = AxialCoord::ZERO;
        let low = AxialCoord::new(0, 1);
        let high_h = map.create_and_add_tile(&mut r, high, 4.0, "a").unwrap();
        let low_h = map.create_and_add_tile(&mut r, low, 1.0, "a").unwrap();
        assert_eq!(r.side_count(high_h), 1);

        assert!(map.try_removing_tile(&mut r, low).unwrap());
        assert_eq!(r.destroyed, vec![low_h]);
        assert!(map.tile(low).is_none());
        assert_eq!(r.side_count(high_h), 0);
        assert_eq!(map.tile(high).unwrap().side_pieces().count(), 0);
    }

    #[test]
    fn keep_stale_sides_leaves_neighbor_walls() {
        let settings = TileMapSettings {
            removal: RemovalPolicy::KeepStaleSides,
            ..Default::default()
        };
        let mut map: TestMap = TileMap::new(&settings, Transform::IDENTITY).unwrap();
        let mut r = RecordingRenderer::default();
        let high = AxialCoord::ZERO;
        let low = AxialCoord::new(-1, 0);
        let high_h = map.create_and_add_tile(&mut r, high, 4.0, "a").unwrap();
        map.create_and_add_tile(&mut r, low, 1.0, "a").unwrap();

        assert!(map.try_removing_tile(&mut r, low).unwrap());
        assert_eq!(map.removal_policy(), RemovalPolicy::KeepStaleSides);
        assert_eq!(r.side(high_h, dir_towards(high, low)), Some(3.0));

        // An explicit refresh catches up.
        map.refresh_tile(&mut r, high).unwrap();
        assert_eq!(r.side_count(high_h), 0);
    }

    // ── bulk operations ─────────────────────────────────────────────

    #[test]
    fn clear_destroys_every_handle_once() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let mut handles: Vec<u32> = AxialCoord::ZERO
            .spiral_range(2)
            .into_iter()
            .map(|c| map.create_and_add_tile(&mut r, c, c.q() as f32, "a").unwrap())
            .collect();

        map.clear_all_tiles(&mut r).unwrap();
        assert!(map.tiles().keys().is_empty());

        let mut destroyed = r.destroyed.clone();
        destroyed.sort_unstable();
        handles.sort_unstable();
        assert_eq!(destroyed, handles);
    }

    #[test]
    fn failed_destroy_keeps_only_that_tile_indexed() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let cells = AxialCoord::ZERO.spiral_range(1);
        for c in &cells {
            map.create_and_add_tile(&mut r, *c, 0.0, "a").unwrap();
        }
        r.fail_destroy = Some(2);

        let err = map.clear_all_tiles(&mut r).unwrap_err();
        assert!(matches!(err, HexError::Renderer(_)));
        assert_eq!(r.destroyed, vec![1, 3, 4, 5, 6, 7]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.tile(cells[1]).map(Tile::handle), Some(2));

        // Once the renderer recovers, a second clear finishes the job.
        r.fail_destroy = None;
        map.clear_all_tiles(&mut r).unwrap();
        assert!(map.is_empty());
        assert_eq!(r.destroyed.len(), 7);
    }

    #[test]
    fn regenerate_visits_in_insertion_order_without_touching_sides() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let coords = [
            AxialCoord::new(0, 1),
            AxialCoord::ZERO,
            AxialCoord::new(1, -1),
            AxialCoord::new(-1, 0),
        ];
        let handles: Vec<u32> = coords
            .iter()
            .zip([3.0, 1.0, 2.0, 0.0])
            .map(|(c, e)| map.create_and_add_tile(&mut r, *c, e, "a").unwrap())
            .collect();

        // Stale snapshot: walls still reflect the old elevation.
        map.set_elevation(coords[1], 8.0).unwrap();
        let sides_before = r.sides.clone();
        let side_calls_before = r.side_calls;
        let tile_sides_before: Vec<Vec<(Direction, f32)>> = coords
            .iter()
            .map(|c| map.tile(*c).unwrap().side_pieces().collect())
            .collect();
        r.mesh_order.clear();

        map.regenerate_all_tiles(&mut r);

        assert_eq!(r.mesh_order, handles);
        assert_eq!(r.side_calls, side_calls_before);
        assert_eq!(r.sides, sides_before);
        for (c, before) in coords.iter().zip(&tile_sides_before) {
            assert_eq!(&map.tile(*c).unwrap().side_pieces().collect::<Vec<_>>(), before);
        }
        assert_eq!(r.positions[&handles[1]].y, 8.0);
    }

    #[test]
    fn width_change_re_places_every_tile() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let c = AxialCoord::new(2, 1);
        let h = map.create_and_add_tile(&mut r, c, 1.0, "a").unwrap();

        map.set_hex_width(&mut r, 4.0).unwrap();
        assert_eq!(map.hex_width(), 4.0);
        assert_eq!(r.diameters[&h], 4.0);
        assert!((r.positions[&h] - map.place(c, 1.0)).length() < 1e-6);
        assert_eq!(r.builds(h), 2);
        assert_eq!(map.quantize(r.positions[&h]), c);

        assert!(map.set_hex_width(&mut r, 0.0).is_err());
        assert_eq!(map.hex_width(), 4.0);
    }

    // ── elevation edits ─────────────────────────────────────────────

    #[test]
    fn elevation_edit_needs_explicit_refresh() {
        let mut map = empty_map();
        let mut r = RecordingRenderer::default();
        let a = AxialCoord::ZERO;
        let b = AxialCoord::new(1, -1);
        let a_h = map.create_and_add_tile(&mut r, a, 1.0, "a").unwrap();
        let b_h = map.create_and_add_tile(&mut r, b, 1.0, "a").unwrap();

        map.set_elevation(a, 6.0).unwrap();
        assert_eq!(r.side_count(a_h), 0);

        map.refresh_tile(&mut r, a).unwrap();
        assert_eq!(r.side(a_h, dir_towards(a, b)), Some(5.0));
        assert_eq!(r.positions[&a_h].y, 6.0);

        map.set_elevation(b, 9.0).unwrap();
        map.refresh_tile(&mut r, b).unwrap();
        assert_eq!(r.side_count(a_h), 0);
        assert_eq!(r.side(b_h, dir_towards(b, a)), Some(3.0));

        assert!(matches!(
            map.set_elevation(AxialCoord::new(7, 7), 1.0),
            Err(HexError::NotFound(_))
        ));
    }

    // ── initialization ──────────────────────────────────────────────

    #[test]
    fn with_tiles_adopts_and_rejects_duplicates() {
        let settings = TileMapSettings::default();
        let tiles = [
            Tile::new(10, AxialCoord::ZERO, 0.0, "a"),
            Tile::new(11, AxialCoord::new(1, 0), 2.0, "b"),
        ];
        let map: TestMap = TileMap::with_tiles(&settings, Transform::IDENTITY, tiles).unwrap();
        assert_eq!(map.tiles().keys(), vec![AxialCoord::ZERO, AxialCoord::new(1, 0)]);
        assert_eq!(map.tile(AxialCoord::new(1, 0)).unwrap().elevation(), 2.0);
        assert_eq!(map.tile(AxialCoord::ZERO).unwrap().coord(), AxialCoord::ZERO);

        let dupes = [
            Tile::new(1, AxialCoord::ZERO, 0.0, "a"),
            Tile::new(2, AxialCoord::ZERO, 1.0, "a"),
        ];
        assert!(matches!(
            TestMap::with_tiles(&settings, Transform::IDENTITY, dupes),
            Err(HexError::AlreadyExists(_))
        ));
    }
}
