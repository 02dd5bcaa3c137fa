//! Projection between hex coordinates and pixel space

mod orientation;

pub use self::orientation::*;

use crate::{
    util::unit::{PixelPoint, Point2, Vector2},
    CubeCoordinate, LayoutConfig,
};
use nalgebra::Vector3;
use std::f64::consts::PI;
use validator::Validate;

/// Everything needed to convert between tiles and pixels: which way the tiles
/// point, where the origin tile sits, and how big tiles are. Layouts are
/// small immutable values; "changing" one means building a new one.
#[cfg_attr(feature = "bevy", derive(bevy_ecs::system::Resource))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HexagonalLayout {
    orientation: HexagonalOrientation,
    position: Point2,
    tile_radius: Vector2,
}

impl HexagonalLayout {
    pub fn new(
        orientation: HexagonalOrientation,
        position: Point2,
        tile_radius: Vector2,
    ) -> Self {
        Self {
            orientation,
            position,
            tile_radius,
        }
    }

    /// Build a layout from config. Fails if the config is invalid.
    pub fn from_config(config: LayoutConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.orientation,
            config.origin,
            config.tile_radius.into(),
        ))
    }

    pub fn orientation(&self) -> HexagonalOrientation {
        self.orientation
    }

    /// Pixel position of the center of the origin tile
    pub fn position(&self) -> Point2 {
        self.position
    }

    pub fn tile_radius(&self) -> Vector2 {
        self.tile_radius
    }

    /// The full size of a single tile, in pixels
    pub fn tile_size(&self) -> Vector2 {
        self.tile_radius
            .component_mul(self.orientation.size_multiplier())
    }

    /// The distance between two tile centers when tiles are packed in a grid
    pub fn packed_tile_size(&self) -> Vector2 {
        self.tile_size()
            .component_mul(self.orientation.packed_multiplier())
    }

    /// Get a copy of this layout with a different tile radius
    pub fn resize(&self, tile_radius: Vector2) -> Self {
        Self::new(self.orientation, self.position, tile_radius)
    }

    /// Get the exact (unrounded) pixel center of a tile
    pub fn to_point(&self, coordinate: CubeCoordinate) -> Point2 {
        let projected: Vector2 =
            (self.orientation.forward() * coordinate.to_vector2()).into();
        self.position + projected.component_mul(self.tile_radius)
    }

    /// Get the pixel center of a tile, rounded onto the pixel grid
    pub fn to_pixel(&self, coordinate: CubeCoordinate) -> PixelPoint {
        self.to_point(coordinate).round()
    }

    /// Get the tile that contains a pixel
    pub fn to_hex(&self, pixel: PixelPoint) -> CubeCoordinate {
        self.point_to_hex(pixel.to_point2())
    }

    /// Get the tile that contains a point. Points exactly on a tile border are
    /// resolved by the cube rounding rules, see [CubeCoordinate::round].
    pub fn point_to_hex(&self, point: Point2) -> CubeCoordinate {
        let normalized = (point - self.position).component_div(self.tile_radius);
        let location = self.orientation.backward()
            * nalgebra::Vector2::from(normalized);
        CubeCoordinate::round(Vector3::new(
            location.x,
            location.y,
            -location.x - location.y,
        ))
    }

    /// Offset from a tile's center to one of its corners. Corners are
    /// numbered 0-5, counterclockwise in standard math orientation (which is
    /// clockwise on screens where y points down).
    pub fn corner_offset(&self, corner: usize) -> Vector2 {
        let angle = 2.0 * PI * (corner as f64 + self.orientation.start_angle())
            / 6.0;
        Vector2::new(angle.cos(), angle.sin()).component_mul(self.tile_radius)
    }

    /// Get the six corners of a tile, in pixel space
    pub fn polygon_corners(&self, coordinate: CubeCoordinate) -> [Point2; 6] {
        let center = self.to_point(coordinate);
        let mut corners = [center; 6];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = center + self.corner_offset(i);
        }
        corners
    }

    /// Get the six corners of a tile, flattened into `[x0, y0, x1, y1, ...]`
    pub fn polygon_vertices(&self, coordinate: CubeCoordinate) -> [f64; 12] {
        let mut vertices = [0.0; 12];
        for (i, corner) in self.polygon_corners(coordinate).iter().enumerate()
        {
            vertices[i * 2] = corner.x;
            vertices[i * 2 + 1] = corner.y;
        }
        vertices
    }
}

impl Default for HexagonalLayout {
    fn default() -> Self {
        let config = LayoutConfig::default();
        Self::new(
            config.orientation,
            config.origin,
            config.tile_radius.into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileRadius;
    use assert_approx_eq::assert_approx_eq;
    use strum::IntoEnumIterator;

    fn pointy() -> HexagonalLayout {
        HexagonalLayout::new(
            HexagonalOrientation::PointyTop,
            Point2::ORIGIN,
            Vector2::splat(10.0),
        )
    }

    fn flat() -> HexagonalLayout {
        HexagonalLayout::new(
            HexagonalOrientation::FlatTop,
            Point2::new(100.0, 50.0),
            Vector2::new(12.0, 8.0),
        )
    }

    #[test]
    fn test_from_config() {
        let layout = HexagonalLayout::from_config(LayoutConfig {
            orientation: HexagonalOrientation::FlatTop,
            origin: Point2::new(1.0, 2.0),
            tile_radius: TileRadius { x: 3.0, y: 4.0 },
        })
        .unwrap();
        assert_eq!(layout.orientation(), HexagonalOrientation::FlatTop);
        assert_eq!(layout.position(), Point2::new(1.0, 2.0));
        assert_eq!(layout.tile_radius(), Vector2::new(3.0, 4.0));
        assert_eq!(
            HexagonalLayout::default(),
            HexagonalLayout::from_config(LayoutConfig::default()).unwrap()
        );
    }

    #[test]
    fn test_sizes() {
        let layout = pointy();
        assert_approx_eq!(layout.tile_size().x, 17.320_508);
        assert_approx_eq!(layout.tile_size().y, 20.0);
        assert_approx_eq!(layout.packed_tile_size().x, 17.320_508);
        assert_approx_eq!(layout.packed_tile_size().y, 15.0);

        let layout = flat();
        assert_approx_eq!(layout.tile_size().x, 24.0);
        assert_approx_eq!(layout.tile_size().y, 13.856_406);
        assert_approx_eq!(layout.packed_tile_size().x, 18.0);
        assert_approx_eq!(layout.packed_tile_size().y, 13.856_406);
    }

    #[test]
    fn test_resize() {
        let layout = flat();
        let resized = layout.resize(Vector2::splat(5.0));
        assert_eq!(resized.orientation(), layout.orientation());
        assert_eq!(resized.position(), layout.position());
        assert_eq!(resized.tile_radius(), Vector2::splat(5.0));
        assert_eq!(layout.tile_radius(), Vector2::new(12.0, 8.0));
    }

    #[test]
    fn test_to_pixel() {
        let layout = pointy();
        assert_eq!(
            layout.to_pixel(CubeCoordinate::ORIGIN),
            PixelPoint::new(0, 0)
        );
        // (√3, 0) * 10
        assert_eq!(
            layout.to_pixel(CubeCoordinate::new_xy(1, 0)),
            PixelPoint::new(17, 0)
        );
        // (√3/2, 3/2) * 10
        assert_eq!(
            layout.to_pixel(CubeCoordinate::new_xy(0, 1)),
            PixelPoint::new(9, 15)
        );

        let layout = flat();
        // (100, 50) + (3/2, √3/2) * (12, 8)
        assert_eq!(
            layout.to_pixel(CubeCoordinate::new_xy(1, 0)),
            PixelPoint::new(118, 57)
        );
        let point = layout.to_point(CubeCoordinate::new_xy(1, 0));
        assert_approx_eq!(point.x, 118.0);
        assert_approx_eq!(point.y, 56.928_203);
    }

    #[test]
    fn test_to_hex() {
        for orientation in HexagonalOrientation::iter() {
            let layout = HexagonalLayout::new(
                orientation,
                Point2::new(-30.0, 12.0),
                Vector2::new(20.0, 16.0),
            );
            for coord in CubeCoordinate::ORIGIN.within_range(6) {
                let pixel = layout.to_pixel(coord);
                assert_eq!(
                    layout.to_hex(pixel),
                    coord,
                    "{} via {} ({})",
                    coord,
                    pixel,
                    orientation
                );
                // Anywhere well inside the tile should map back to it
                let near_corner = layout.to_point(coord)
                    + layout.corner_offset(2) * 0.8;
                assert_eq!(layout.point_to_hex(near_corner), coord);
            }
        }
    }

    #[test]
    fn test_polygon_corners() {
        let layout = pointy();
        let corners = layout.polygon_corners(CubeCoordinate::ORIGIN);
        // First pointy-top corner is at 30°
        assert_approx_eq!(corners[0].x, 8.660_254);
        assert_approx_eq!(corners[0].y, 5.0);
        assert_approx_eq!(corners[1].x, 0.0);
        assert_approx_eq!(corners[1].y, 10.0);
        for corner in &corners {
            let radius = (corner.x.powi(2) + corner.y.powi(2)).sqrt();
            assert_approx_eq!(radius, 10.0);
        }

        let layout = flat();
        let center = layout.to_point(CubeCoordinate::ORIGIN);
        let corners = layout.polygon_corners(CubeCoordinate::ORIGIN);
        // First flat-top corner is at 0°
        assert_approx_eq!(corners[0].x, center.x + 12.0);
        assert_approx_eq!(corners[0].y, center.y);
        assert_approx_eq!(corners[3].x, center.x - 12.0);
    }

    #[test]
    fn test_polygon_vertices() {
        let layout = flat();
        let coord = CubeCoordinate::new_xy(2, -1);
        let corners = layout.polygon_corners(coord);
        let vertices = layout.polygon_vertices(coord);
        assert_eq!(vertices.len(), 12);
        for (i, corner) in corners.iter().enumerate() {
            assert_eq!(vertices[i * 2], corner.x);
            assert_eq!(vertices[i * 2 + 1], corner.y);
        }
    }
}
