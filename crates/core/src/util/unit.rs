use derive_more::{
    Add, AddAssign, Display, Div, DivAssign, Mul, MulAssign, Neg, Sub,
    SubAssign,
};
use serde::{Deserialize, Serialize};
use std::ops;

/// A point in 2D pixel space. This isn't used at all by the hex coordinate
/// math, but it's what you get when you project a hex coordinate into pixels
/// via a [HexagonalLayout](crate::HexagonalLayout). These positions aren't
/// really useful outside of rendering, so stick to
/// [CubeCoordinate](crate::CubeCoordinate) for stuff like distances,
/// reachability, etc.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round this point onto the pixel grid. Halves round up.
    pub fn round(self) -> PixelPoint {
        PixelPoint::new(
            super::round_half_up(self.x),
            super::round_half_up(self.y),
        )
    }
}

impl ops::Add<Vector2> for Point2 {
    type Output = Point2;

    fn add(self, rhs: Vector2) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub<Point2> for Point2 {
    type Output = Vector2;

    fn sub(self, rhs: Point2) -> Self::Output {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A vector in 2D pixel space. Like [Point2], this is only useful for
/// rendering-related calculations. This can represent offsets and scales in
/// 2D.
///
/// See [Point2] for a description of the 2D coordinate space.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a vector with the same value for both components
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Multiply each component by the matching component of the other vector
    pub fn component_mul(self, other: Vector2) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Divide each component by the matching component of the other vector
    pub fn component_div(self, other: Vector2) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }
}

impl From<nalgebra::Vector2<f64>> for Vector2 {
    fn from(other: nalgebra::Vector2<f64>) -> Self {
        Self::new(other.x, other.y)
    }
}

impl From<Vector2> for nalgebra::Vector2<f64> {
    fn from(other: Vector2) -> Self {
        nalgebra::Vector2::new(other.x, other.y)
    }
}

/// A point on the integer pixel grid. Pixel centers of tiles are always
/// rounded onto this grid.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    Add,
    Sub,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_point2(self) -> Point2 {
        Point2::new(self.x as f64, self.y as f64)
    }
}
