//! Flat-topped hexagon geometry: neighbor directions, outline vertices,
//! the fixed triangulation and mesh payloads for tiles and side pieces.
//!
//! Everything here is stateless. Vertices lie in the XZ plane around the tile
//! origin, `y = 0` being the tile's top face.

use std::f32::consts::FRAC_PI_3;

use bevy::prelude::*;

use crate::coord::AxialCoord;
use crate::error::{HexError, Result};
use crate::math;

/// `√3` to `f32` precision.
pub const SQRT_3: f32 = 1.732_050_8;

/// Height (flat edge to flat edge) over width (corner to corner).
pub const HEIGHT_TO_WIDTH_RATIO: f32 = SQRT_3 / 2.0;

/// Number of corners on a hex tile.
pub const VERTEX_COUNT: usize = 6;

/// Axial offsets of the six neighbors, indexed by [`Direction`].
///
/// Clockwise seen from above, starting with the edge between vertex 0 and
/// vertex 1. Side pieces and neighbor scans iterate in this order.
pub const UNIT_OFFSETS: [AxialCoord; 6] = [
    AxialCoord::new(1, -1),
    AxialCoord::new(0, -1),
    AxialCoord::new(-1, 0),
    AxialCoord::new(-1, 1),
    AxialCoord::new(0, 1),
    AxialCoord::new(1, 0),
];

/// Fan decomposition of the outline into 4 triangles, all rooted at vertex 0.
///
/// Wound so the face normal points up (+Y).
pub const TRIANGLE_FAN: [[u16; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]];

/// One of the six edges of a hex tile, and the neighbor across it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Reflect)]
pub struct Direction(u8);

impl Direction {
    /// All directions in [`UNIT_OFFSETS`] order.
    pub const ALL: [Self; 6] = [Self(0), Self(1), Self(2), Self(3), Self(4), Self(5)];

    /// Direction with the given index, `None` past 5.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in [`Direction::ALL`].
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Axial step towards the neighbor in this direction.
    pub fn offset(self) -> AxialCoord {
        UNIT_OFFSETS[self.index()]
    }

    /// The direction pointing back from the neighbor.
    pub fn opposite(self) -> Self {
        Self((self.0 + 3) % 6)
    }
}

/// The six neighbor offsets.
pub fn unit_offsets() -> &'static [AxialCoord; 6] {
    &UNIT_OFFSETS
}

/// Outline of a flat-topped hexagon of the given corner-to-corner `diameter`.
///
/// Vertex 0 sits on +X, the rest follow clockwise seen from above.
pub fn vertices(diameter: f32) -> Result<[Vec3; 6]> {
    check_positive("diameter", diameter)?;
    let radius = diameter / 2.0;
    Ok(std::array::from_fn(|i| {
        let angle = i as f32 * FRAC_PI_3;
        Vec3::new(radius * angle.cos(), 0.0, -radius * angle.sin())
    }))
}

/// The triangulation table for a polygon with `vertex_count` corners.
///
/// Only hexagons are supported.
pub fn triangle_fan(vertex_count: usize) -> Result<&'static [[u16; 3]; 4]> {
    if vertex_count != VERTEX_COUNT {
        return Err(HexError::InvalidArgument(format!(
            "triangulation exists for {VERTEX_COUNT} vertices only, got {vertex_count}"
        )));
    }
    Ok(&TRIANGLE_FAN)
}

/// Vertex indices bounding the edge shared with the neighbor in `direction`.
pub fn edge_vertices(direction: Direction) -> (usize, usize) {
    let i = direction.index();
    (i, (i + 1) % VERTEX_COUNT)
}

/// Corners of the wall hanging `height` below the edge in `direction`.
///
/// Order is top-far, top-near, bottom-near, bottom-far so the quad
/// `[0, 1, 2], [0, 2, 3]` faces away from the tile center.
pub fn side_piece_quad(diameter: f32, direction: Direction, height: f32) -> Result<[Vec3; 4]> {
    check_positive("side piece height", height)?;
    let outline = vertices(diameter)?;
    let (near, far) = edge_vertices(direction);
    let drop = Vec3::new(0.0, -height, 0.0);
    Ok([
        outline[far],
        outline[near],
        outline[near] + drop,
        outline[far] + drop,
    ])
}

/// Renderable payload: flat attribute arrays plus a `u16` triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals, recomputed from the triangles.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex texture coordinates.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list indices.
    pub indices: Vec<u16>,
}

/// Top face of a tile using [`TRIANGLE_FAN`].
pub fn tile_mesh(diameter: f32) -> Result<MeshData> {
    let outline = vertices(diameter)?;
    let height = diameter * HEIGHT_TO_WIDTH_RATIO;
    let uvs = outline
        .iter()
        .map(|v| [v.x / diameter + 0.5, v.z / height + 0.5])
        .collect();
    let indices: Vec<u16> = triangle_fan(outline.len())?.iter().flatten().copied().collect();
    Ok(MeshData {
        normals: smooth_normals(&outline, &indices),
        positions: outline.iter().map(|v| v.to_array()).collect(),
        uvs,
        indices,
    })
}

/// Outward-facing wall quad for a side piece.
pub fn side_piece_mesh(diameter: f32, direction: Direction, height: f32) -> Result<MeshData> {
    let quad = side_piece_quad(diameter, direction, height)?;
    let indices = vec![0u16, 1, 2, 0, 2, 3];
    Ok(MeshData {
        normals: smooth_normals(&quad, &indices),
        positions: quad.iter().map(|v| v.to_array()).collect(),
        uvs: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        indices,
    })
}

/// Averages the face normals of every triangle touching each vertex.
fn smooth_normals(positions: &[Vec3], indices: &[u16]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(usize::from);
        let n = math::compute_normal(positions[a], positions[b], positions[c]);
        for i in [a, b, c] {
            sums[i] += n;
        }
    }
    sums.into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HexError::InvalidArgument(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
