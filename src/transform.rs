//! World ↔ lattice conversion for a flat-topped axial layout.

use bevy::prelude::*;

use crate::coord::AxialCoord;
use crate::error::{HexError, Result};
use crate::geometry::SQRT_3;

/// Quantizes host-scene positions to cells and places cells back in the scene.
///
/// Lattice space is the XZ plane of `placement`, Y carrying elevation.
/// Components are rounded half away from zero (`f32::round`), so a point exactly
/// on a cell boundary belongs to the cell further from the origin on that axis.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct GridTransform {
    hex_width: f32,
    placement: Transform,
}

impl GridTransform {
    /// A layout with tiles `hex_width` wide (corner to corner) under `placement`.
    pub fn new(hex_width: f32, placement: Transform) -> Result<Self> {
        check_width(hex_width)?;
        Ok(Self {
            hex_width,
            placement,
        })
    }

    /// Corner-to-corner tile width.
    pub fn hex_width(&self) -> f32 {
        self.hex_width
    }

    /// Changes the tile width; positions must be re-derived afterwards.
    pub fn set_hex_width(&mut self, hex_width: f32) -> Result<()> {
        check_width(hex_width)?;
        self.hex_width = hex_width;
        Ok(())
    }

    /// Host origin and orientation of the lattice.
    pub fn placement(&self) -> &Transform {
        &self.placement
    }

    /// Nearest cell to a host-scene position. Elevation is ignored.
    pub fn quantize(&self, world_pos: Vec3) -> AxialCoord {
        let local = self
            .placement
            .compute_affine()
            .inverse()
            .transform_point3(world_pos);
        let size = self.hex_width / 2.0;
        let q = (local.x * 2.0 / 3.0) / size;
        let r = (-local.x / 3.0 + SQRT_3 / 3.0 * local.z) / size;
        AxialCoord::new(q.round() as i32, r.round() as i32)
    }

    /// Center of `coord` at `elevation`, before the host placement is applied.
    pub fn local_position(&self, coord: AxialCoord, elevation: f32) -> Vec3 {
        let size = self.hex_width / 2.0;
        let (q, r) = (coord.q() as f32, coord.r() as f32);
        Vec3::new(size * 1.5 * q, elevation, size * SQRT_3 * (r + q / 2.0))
    }

    /// Center of `coord` at `elevation` in host-scene space.
    pub fn place(&self, coord: AxialCoord, elevation: f32) -> Vec3 {
        self.placement
            .transform_point(self.local_position(coord, elevation))
    }
}

fn check_width(hex_width: f32) -> Result<()> {
    if hex_width.is_finite() && hex_width > 0.0 {
        Ok(())
    } else {
        Err(HexError::InvalidArgument(format!(
            "hex width must be positive, got {hex_width}"
        )))
    }
}
