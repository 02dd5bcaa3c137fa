use crate::{
    util::unit::{Point2, Vector2},
    HexagonalOrientation,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines how a map is projected into pixel space. This
/// is everything needed to build a
/// [HexagonalLayout](crate::HexagonalLayout), in a form that's easy to load
/// from a file. Use
/// [HexagonalLayout::from_config](crate::HexagonalLayout::from_config) to
/// validate and convert it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LayoutConfig {
    /// Tile orientation, by ID (`"pointy-top"` or `"flat-top"`). An unknown
    /// ID fails deserialization.
    pub orientation: HexagonalOrientation,

    /// Pixel position of the center of the origin tile
    pub origin: Point2,

    /// Distance from the center of a tile to each of its corners, in pixels.
    /// The two axes can differ, to squash or stretch the tiles.
    #[validate]
    pub tile_radius: TileRadius,
}

/// Tile radius along each pixel axis. Both components must be positive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct TileRadius {
    #[validate(range(min = 0.001))]
    pub x: f64,
    #[validate(range(min = 0.001))]
    pub y: f64,
}

impl TileRadius {
    /// Same radius on both axes
    pub fn uniform(radius: f64) -> Self {
        Self {
            x: radius,
            y: radius,
        }
    }
}

impl From<TileRadius> for Vector2 {
    fn from(radius: TileRadius) -> Self {
        Vector2::new(radius.x, radius.y)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: HexagonalOrientation::PointyTop,
            origin: Point2::ORIGIN,
            tile_radius: TileRadius::uniform(50.0),
        }
    }
}
