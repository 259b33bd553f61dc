//! Axial hex coordinates and their cube-coordinate view.

use std::fmt::{Display, Formatter};
use std::ops::{Add, Neg, Sub};

use bevy::prelude::*;
use hexx::{Hex, shapes};

use crate::error::{HexError, Result};
use crate::geometry::{Direction, UNIT_OFFSETS};

/// A cell on the axial hex lattice, `(q, r)`.
///
/// Wraps [`hexx::Hex`] (`x = q`, `y = r`) so the rest of the crate can lean on
/// `hexx` shapes while keeping its own neighbor ordering.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Reflect)]
pub struct AxialCoord(Hex);

/// Redundant three-axis form of an [`AxialCoord`]; `x + y + z == 0` always.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    /// Equal to `q`.
    pub x: i32,
    /// Equal to `-q - r`.
    pub y: i32,
    /// Equal to `r`.
    pub z: i32,
}

impl AxialCoord {
    /// The origin cell.
    pub const ZERO: Self = Self(Hex::ZERO);

    /// Creates the coordinate `(q, r)`.
    pub const fn new(q: i32, r: i32) -> Self {
        Self(Hex::new(q, r))
    }

    /// The `q` component.
    pub const fn q(self) -> i32 {
        self.0.x
    }

    /// The `r` component.
    pub const fn r(self) -> i32 {
        self.0.y
    }

    /// Hex distance, `(|dq| + |dq + dr| + |dr|) / 2`.
    pub fn distance(self, other: Self) -> i32 {
        let dq = self.q() - other.q();
        let dr = self.r() - other.r();
        (dq.abs() + (dq + dr).abs() + dr.abs()) / 2
    }

    /// The adjacent cell in `direction`.
    pub fn neighbor(self, direction: Direction) -> Self {
        self + direction.offset()
    }

    /// The six adjacent cells, in [`UNIT_OFFSETS`] order.
    pub fn neighbors(self) -> [Self; 6] {
        UNIT_OFFSETS.map(|offset| self + offset)
    }

    /// Cube view of this coordinate.
    pub const fn to_cube(self) -> CubeCoord {
        CubeCoord {
            x: self.q(),
            y: -self.q() - self.r(),
            z: self.r(),
        }
    }

    /// The cell itself followed by its six neighbors.
    ///
    /// `n` only gates the call: anything below 1 is rejected, but the result is
    /// always the radius-1 neighborhood. Maps authored against this behavior
    /// rely on it; use [`Self::spiral_range`] for a true radius-`n` range.
    pub fn range_within(self, n: i32) -> Result<Vec<Self>> {
        if n < 1 {
            return Err(HexError::InvalidArgument(format!(
                "range must be at least 1, got {n}"
            )));
        }
        Ok(std::iter::once(self).chain(self.neighbors()).collect())
    }

    /// Every cell within `radius` steps of this one, center first.
    pub fn spiral_range(self, radius: u32) -> Vec<Self> {
        let mut cells: Vec<Self> = shapes::hexagon(self.0, radius).map(Self).collect();
        cells.sort_by_key(|c| c.distance(self));
        cells
    }
}

impl CubeCoord {
    /// Drops the redundant `y` axis.
    pub const fn to_axial(self) -> AxialCoord {
        AxialCoord::new(self.x, self.z)
    }
}

impl Add for AxialCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for AxialCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for AxialCoord {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<Hex> for AxialCoord {
    fn from(value: Hex) -> Self {
        Self(value)
    }
}

impl From<AxialCoord> for Hex {
    fn from(value: AxialCoord) -> Self {
        value.0
    }
}

impl Display for AxialCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q(), self.r())
    }
}
