use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use super::entities::{HexTile, SidePiece, TileVisual, TileVisuals};
use crate::coord::AxialCoord;
use crate::error::RendererError;
use crate::geometry::{self, Direction, MeshData};
use crate::renderer::TileRenderer;

/// [`TileRenderer`] over Bevy commands: tiles are children of the map root,
/// side pieces are children of their tile.
///
/// Lives for the duration of one system run.
pub struct SceneRenderer<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    meshes: &'a mut Assets<Mesh>,
    visuals: &'a mut TileVisuals,
    side_material: Handle<StandardMaterial>,
    placement: Transform,
    root: Entity,
}

impl<'a, 'w, 's> SceneRenderer<'a, 'w, 's> {
    /// Borrows the scene for a batch of tile edits.
    ///
    /// `placement` supplies the rotation and scale applied to every tile.
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        meshes: &'a mut Assets<Mesh>,
        visuals: &'a mut TileVisuals,
        side_material: Handle<StandardMaterial>,
        placement: Transform,
        root: Entity,
    ) -> Self {
        Self {
            commands,
            meshes,
            visuals,
            side_material,
            placement,
            root,
        }
    }

    fn tile_transform(&self, position: Vec3) -> Transform {
        Transform {
            translation: position,
            ..self.placement
        }
    }

    fn visual(&mut self, handle: Entity) -> Option<&mut TileVisual> {
        let visual = self.visuals.tiles.get_mut(&handle);
        if visual.is_none() {
            warn!("Ignoring renderer call for unknown tile {handle:?}");
        }
        visual
    }
}

impl TileRenderer for SceneRenderer<'_, '_, '_> {
    type Handle = Entity;
    type Material = Handle<StandardMaterial>;

    fn spawn(&mut self, coord: AxialCoord, position: Vec3) -> Result<Entity, RendererError> {
        let transform = self.tile_transform(position);
        let entity = self
            .commands
            .spawn((
                HexTile { coord },
                Name::new(format!("HexTile({},{})", coord.q(), coord.r())),
                transform,
                Visibility::default(),
            ))
            .id();
        self.commands.entity(self.root).add_child(entity);
        self.visuals.tiles.insert(entity, TileVisual::default());
        Ok(entity)
    }

    fn destroy(&mut self, handle: Entity) -> Result<(), RendererError> {
        if self.visuals.tiles.remove(&handle).is_none() {
            return Err(RendererError::new(format!(
                "tile entity {handle:?} is not tracked"
            )));
        }
        self.commands.entity(handle).despawn();
        Ok(())
    }

    fn set_position(&mut self, handle: Entity, position: Vec3) {
        if self.visual(handle).is_none() {
            return;
        }
        let transform = self.tile_transform(position);
        self.commands.entity(handle).insert(transform);
    }

    fn set_diameter(&mut self, handle: Entity, width: f32) {
        if let Some(visual) = self.visual(handle) {
            visual.diameter = width;
        }
    }

    fn set_material(&mut self, handle: Entity, material: &Handle<StandardMaterial>) {
        if self.visual(handle).is_none() {
            return;
        }
        self.commands
            .entity(handle)
            .insert(MeshMaterial3d(material.clone()));
    }

    fn generate_mesh(&mut self, handle: Entity, coord: AxialCoord) {
        let Some(visual) = self.visual(handle) else {
            return;
        };
        let diameter = visual.diameter;
        let sides = visual.sides;

        match geometry::tile_mesh(diameter) {
            Ok(data) => {
                let mesh = self.meshes.add(build_mesh(data));
                self.commands.entity(handle).insert(Mesh3d(mesh));
            }
            Err(err) => warn!("No mesh for tile {coord}: {err}"),
        }

        // Walls follow the top face when the width changes.
        for dir in Direction::ALL {
            if let Some((entity, height)) = sides[dir.index()] {
                self.rebuild_side_mesh(entity, diameter, dir, height);
            }
        }
    }

    fn add_side_piece(&mut self, handle: Entity, direction: Direction, height: f32) {
        let side_material = self.side_material.clone();
        let Some(visual) = self.visual(handle) else {
            return;
        };
        let diameter = visual.diameter;
        let existing = visual.sides[direction.index()].map(|(entity, _)| entity);

        let entity = match existing {
            Some(entity) => entity,
            None => {
                let entity = self
                    .commands
                    .spawn((
                        Name::new(format!("SidePiece{}", direction.index())),
                        MeshMaterial3d(side_material),
                        Transform::default(),
                        Visibility::default(),
                    ))
                    .id();
                self.commands.entity(handle).add_child(entity);
                entity
            }
        };
        self.commands
            .entity(entity)
            .insert(SidePiece { direction, height });
        if let Some(visual) = self.visuals.tiles.get_mut(&handle) {
            visual.sides[direction.index()] = Some((entity, height));
        }
        self.rebuild_side_mesh(entity, diameter, direction, height);
    }

    fn remove_side_piece(&mut self, handle: Entity, direction: Direction) {
        let Some(visual) = self.visual(handle) else {
            return;
        };
        if let Some((entity, _)) = visual.sides[direction.index()].take() {
            self.commands.entity(entity).despawn();
        }
    }
}

impl SceneRenderer<'_, '_, '_> {
    fn rebuild_side_mesh(&mut self, entity: Entity, diameter: f32, direction: Direction, height: f32) {
        match geometry::side_piece_mesh(diameter, direction, height) {
            Ok(data) => {
                let mesh = self.meshes.add(build_mesh(data));
                self.commands.entity(entity).insert(Mesh3d(mesh));
            }
            Err(err) => warn!("No mesh for side piece {}: {err}", direction.index()),
        }
    }
}

fn build_mesh(data: MeshData) -> Mesh {
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, data.positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, data.normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, data.uvs)
    .with_inserted_indices(Indices::U16(data.indices))
}

#[cfg(test)]
mod tests {
    use bevy::ecs::world::CommandQueue;

    use super::*;
    use crate::tile_map::{TileMap, TileMapSettings};

    type SceneMap = TileMap<Entity, Handle<StandardMaterial>>;

    #[test]
    fn tiles_and_side_pieces_become_entities() {
        let mut world = World::new();
        let mut queue = CommandQueue::default();
        let mut meshes = Assets::<Mesh>::default();
        let mut visuals = TileVisuals::default();
        let mut map =
            SceneMap::new(&TileMapSettings::default(), Transform::IDENTITY).unwrap();

        {
            let mut commands = Commands::new(&mut queue, &world);
            let root = commands.spawn((Transform::default(), Visibility::default())).id();
            let mut renderer = SceneRenderer::new(
                &mut commands,
                &mut meshes,
                &mut visuals,
                Handle::default(),
                Transform::IDENTITY,
                root,
            );
            map.create_and_add_tile(&mut renderer, AxialCoord::ZERO, 0.0, Handle::default())
                .unwrap();
            map.create_and_add_tile(&mut renderer, AxialCoord::new(1, 0), 3.0, Handle::default())
                .unwrap();
        }
        queue.apply(&mut world);

        assert_eq!(world.query::<&HexTile>().iter(&world).count(), 2);
        let sides: Vec<(Direction, f32)> = world
            .query::<&SidePiece>()
            .iter(&world)
            .map(|s| (s.direction, s.height))
            .collect();
        assert_eq!(sides, vec![(Direction::ALL[2], 3.0)]);
        assert_eq!(visuals.len(), 2);
    }

    #[test]
    fn destroying_unknown_entity_fails() {
        let world = World::new();
        let mut queue = CommandQueue::default();
        let mut meshes = Assets::<Mesh>::default();
        let mut visuals = TileVisuals::default();
        let mut commands = Commands::new(&mut queue, &world);
        let root = commands.spawn_empty().id();
        let mut renderer = SceneRenderer::new(
            &mut commands,
            &mut meshes,
            &mut visuals,
            Handle::default(),
            Transform::IDENTITY,
            root,
        );
        let tile = renderer.spawn(AxialCoord::ZERO, Vec3::ZERO).unwrap();
        assert!(renderer.destroy(tile).is_ok());
        assert!(renderer.destroy(tile).is_err());
        assert!(visuals.is_empty());
    }

    #[test]
    fn untracked_entities_are_left_alone() {
        let mut world = World::new();
        let stranger = world.spawn_empty().id();
        let mut queue = CommandQueue::default();
        let mut meshes = Assets::<Mesh>::default();
        let mut visuals = TileVisuals::default();
        {
            let mut commands = Commands::new(&mut queue, &world);
            let root = commands.spawn_empty().id();
            let mut renderer = SceneRenderer::new(
                &mut commands,
                &mut meshes,
                &mut visuals,
                Handle::default(),
                Transform::IDENTITY,
                root,
            );
            renderer.set_position(stranger, Vec3::ONE);
            renderer.set_material(stranger, &Handle::default());
        }
        queue.apply(&mut world);

        let entity = world.entity(stranger);
        assert!(!entity.contains::<Transform>());
        assert!(!entity.contains::<MeshMaterial3d<StandardMaterial>>());
    }
}
