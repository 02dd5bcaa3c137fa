use crate::{hex::CubeCoordinate, HexagonalOrientation};
use derive_more::Display;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::{fmt, ops};

/// The addressing scheme for an [OffsetCoordinate]. The orientation determines
/// whether rows (pointy-top) or columns (flat-top) get shifted, and the parity
/// determines whether it's the odd or even ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffsetCoordinateType {
    pub orientation: HexagonalOrientation,
    pub is_odd: bool,
}

impl OffsetCoordinateType {
    pub const fn new(orientation: HexagonalOrientation, is_odd: bool) -> Self {
        Self {
            orientation,
            is_odd,
        }
    }

    /// Shift odd rows/columns
    pub const fn odd(orientation: HexagonalOrientation) -> Self {
        Self::new(orientation, true)
    }

    /// Shift even rows/columns
    pub const fn even(orientation: HexagonalOrientation) -> Self {
        Self::new(orientation, false)
    }
}

impl fmt::Display for OffsetCoordinateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parity = if self.is_odd { "odd" } else { "even" };
        write!(f, "{} ({})", self.orientation, parity)
    }
}

impl Default for OffsetCoordinateType {
    fn default() -> Self {
        Self::odd(HexagonalOrientation::default())
    }
}

/// A row/column address for a tile. Only meaningful in the context of its
/// [OffsetCoordinateType]: the same tile has different offset coordinates
/// under different orientations and parities.
///
/// Arithmetic between two offset coordinates is component-wise, and the
/// result always keeps the **left** operand's offset type.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[display(fmt = "[{}, {}]", x, y)]
pub struct OffsetCoordinate {
    pub x: i32,
    pub y: i32,
    pub offset_type: OffsetCoordinateType,
}

impl OffsetCoordinate {
    pub const fn new(x: i32, y: i32, offset_type: OffsetCoordinateType) -> Self {
        Self { x, y, offset_type }
    }

    /// Convert back to cube coordinates. This is the exact inverse of
    /// [CubeCoordinate::to_offset_coordinate] for the same offset type.
    pub fn to_cube_coordinate(self) -> CubeCoordinate {
        let is_odd = self.offset_type.is_odd;
        match self.offset_type.orientation {
            HexagonalOrientation::PointyTop => CubeCoordinate::new_xy(
                self.x - offset_adjustment(self.y, is_odd),
                self.y,
            ),
            HexagonalOrientation::FlatTop => CubeCoordinate::new_xy(
                self.x,
                self.y - offset_adjustment(self.x, is_odd),
            ),
        }
    }

    pub fn to_vector2(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }
}

impl ops::Add for OffsetCoordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.offset_type)
    }
}

impl ops::Sub for OffsetCoordinate {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.offset_type)
    }
}

impl From<OffsetCoordinate> for CubeCoordinate {
    fn from(offset: OffsetCoordinate) -> Self {
        offset.to_cube_coordinate()
    }
}

/// How far the shifted axis moves for a given row/column index. `value` is
/// the index of the row (pointy-top) or column (flat-top).
///
/// The numerator is always even (odd values get nudged by one first), so the
/// division is exact and there's no rounding direction to worry about for
/// negative indexes.
pub(crate) fn offset_adjustment(value: i32, is_odd: bool) -> i32 {
    let nudge = if is_odd { -1 } else { 1 };
    (value + (value & 1) * nudge) / 2
}
