//! Integer Lattice Positions
//!
//! Tile coordinates on the unit-spaced, axis-aligned puzzle grid.
//! All comparisons are exact integer comparisons. Floating-point world
//! coordinates from the render layer are snapped to the lattice once,
//! at the boundary, and never compared for equality.

use std::fmt;
use std::ops::Add;
use serde::{Serialize, Deserialize};

/// A cell on the puzzle lattice.
///
/// `x` grows to the right (column), `y` grows downward (row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridPos {
    /// Origin cell
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// One cell up (-Y)
    pub const UP: Self = Self { x: 0, y: -1 };

    /// One cell down (+Y)
    pub const DOWN: Self = Self { x: 0, y: 1 };

    /// One cell left (-X)
    pub const LEFT: Self = Self { x: -1, y: 0 };

    /// One cell right (+X)
    pub const RIGHT: Self = Self { x: 1, y: 0 };

    /// The four unit steps, in a fixed order.
    pub const DIRECTIONS: [Self; 4] = [Self::UP, Self::DOWN, Self::LEFT, Self::RIGHT];

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Snap a world-space coordinate to the nearest lattice cell.
    ///
    /// Returns `None` for NaN, infinities, or values outside the `i32` range.
    /// This is the only place a float ever enters the puzzle core.
    pub fn snap(x: f32, y: f32) -> Option<Self> {
        Some(Self {
            x: snap_axis(x)?,
            y: snap_axis(y)?,
        })
    }

    /// Manhattan distance to another cell.
    #[inline]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Check whether two cells share an edge.
    ///
    /// On a unit lattice the Euclidean and Manhattan distances agree at
    /// exactly one, so this is an exact integer test.
    #[inline]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The four edge-sharing neighbours.
    #[inline]
    pub fn neighbors(self) -> [Self; 4] {
        Self::DIRECTIONS.map(|d| self + d)
    }

    /// Convert to float tuple for rendering.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

#[inline]
fn snap_axis(value: f32) -> Option<i32> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round();
    if rounded < i32::MIN as f32 || rounded >= i32::MAX as f32 {
        return None;
    }
    Some(rounded as i32)
}

impl Add for GridPos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x.wrapping_add(rhs.x),
            y: self.y.wrapping_add(rhs.y),
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================
