use crate::coord::AxialCoord;
use crate::geometry::Direction;

/// The map's record of one placed tile.
///
/// `elevation` is a snapshot: changing it through
/// [`super::TileMap::set_elevation`] does not touch neighbors until
/// [`super::TileMap::refresh_tile`] runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<H, M> {
    pub(super) handle: H,
    pub(super) coord: AxialCoord,
    pub(super) elevation: f32,
    pub(super) material: M,
    /// Side piece height per [`Direction`], `None` where there is no wall.
    pub(super) sides: [Option<f32>; 6],
}

impl<H: Copy, M> Tile<H, M> {
    /// A tile with no side pieces yet.
    pub fn new(handle: H, coord: AxialCoord, elevation: f32, material: M) -> Self {
        Self {
            handle,
            coord,
            elevation,
            material,
            sides: [None; 6],
        }
    }

    /// Renderer handle of the visual entity.
    pub fn handle(&self) -> H {
        self.handle
    }

    /// Cell this tile occupies.
    pub fn coord(&self) -> AxialCoord {
        self.coord
    }

    /// Current elevation snapshot.
    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// Material the tile was created with.
    pub fn material(&self) -> &M {
        &self.material
    }

    /// Height of the side piece on `direction`, if one is attached.
    pub fn side_piece(&self, direction: Direction) -> Option<f32> {
        self.sides[direction.index()]
    }

    /// Attached side pieces as `(direction, height)`.
    pub fn side_pieces(&self) -> impl Iterator<Item = (Direction, f32)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.side_piece(dir).map(|h| (dir, h)))
    }
}
