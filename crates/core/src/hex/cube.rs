//! This sub-module contains the cube coordinate type, which is the fundamental
//! unit of the hex coordinate system. See the parent module documentation for
//! more info on the coordinate system.

use crate::{
    hex::{offset_adjustment, OffsetCoordinate, OffsetCoordinateType},
    util::round_half_up,
    HexagonalOrientation,
};
use anyhow::anyhow;
use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::{cmp, convert::TryFrom, ops::RangeInclusive};

/// A point in a hexagon-tiled map, referring to a whole tile. Each point has
/// an x, y, and z component. See this page for info on how the cube coordinate
/// system works:
/// https://www.redblobgames.com/grids/hexagons/#coordinates-cube
///
/// This struct actually only needs to store x and y, since x+y+z=0 for all
/// points, so z can be derived as necessary. That also means the invariant
/// can never be broken after construction: the only way to supply all three
/// components is [CubeCoordinate::new], which validates them.
///
/// Arithmetic (`+`, `-`, unary `-`, `* i32`) always produces new values, and
/// the result of any of those operations on valid coordinates is also valid.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Add,
    Sub,
    Neg,
    Mul,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.x()", "self.y()", "self.z()")]
pub struct CubeCoordinate {
    x: i32,
    y: i32,
}

impl CubeCoordinate {
    pub const ORIGIN: Self = Self::new_xy(0, 0);

    /// The six unit vectors to each adjacent tile. Successive entries are 60°
    /// rotations of each other, so walking through this list in order goes
    /// around a tile. For pointy-top tiles the order is NE, E, SE, SW, W, NW.
    /// For flat-top it's NE, SE, S, SW, NW, N.
    pub const DIRECTIONS: [Self; 6] = [
        Self::new_xy(1, 0),
        Self::new_xy(1, -1),
        Self::new_xy(0, -1),
        Self::new_xy(-1, 0),
        Self::new_xy(-1, 1),
        Self::new_xy(0, 1),
    ];

    /// The six vectors to each diagonal tile, i.e. the tiles that are two
    /// steps away and directly "between" two neighbors. Same rotational
    /// ordering as [Self::DIRECTIONS].
    pub const DIAGONALS: [Self; 6] = [
        Self::new_xy(2, -1),
        Self::new_xy(1, -2),
        Self::new_xy(-1, -1),
        Self::new_xy(-2, 1),
        Self::new_xy(-1, 2),
        Self::new_xy(1, 1),
    ];

    /// The direction that [Self::ring] starts in by default. For pointy-top
    /// tiles that's west.
    pub const DEFAULT_RING_START: usize = 4;

    /// Construct a new coordinate from all three components. Returns an error
    /// if the components don't fall on the plane x+y+z=0.
    pub fn new(x: i32, y: i32, z: i32) -> anyhow::Result<Self> {
        // Summed in i64 so extreme components can't overflow back onto 0
        if x as i64 + y as i64 + z as i64 != 0 {
            Err(anyhow!(
                "Invalid cube coordinate ({}, {}, {}); \
                x, y, and z must add up to 0",
                x,
                y,
                z
            ))
        } else {
            Ok(Self::new_xy(x, y))
        }
    }

    /// Construct a new coordinate with the given x and y. Since x+y+z=0 for
    /// all coordinates, we can derive z from x & y.
    pub const fn new_xy(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Exact for every coordinate built through [Self::new], even when x
    /// or y is at the edge of the `i32` range.
    pub fn z(&self) -> i32 {
        self.x.wrapping_neg().wrapping_sub(self.y)
    }

    /// Get the tile adjacent to this one in the given direction. The
    /// direction is an index into [Self::DIRECTIONS], taken modulo 6.
    pub fn neighbor(self, direction: usize) -> Self {
        self + Self::DIRECTIONS[direction % 6]
    }

    /// Get all six adjacent tiles, in the same order as [Self::DIRECTIONS].
    pub fn neighbors(self) -> [Self; 6] {
        Self::DIRECTIONS.map(|dir| self + dir)
    }

    /// Get the diagonal tile in the given direction. The direction is an index
    /// into [Self::DIAGONALS], taken modulo 6.
    pub fn diagonal_neighbor(self, direction: usize) -> Self {
        self + Self::DIAGONALS[direction % 6]
    }

    /// Get all six diagonal tiles, in the same order as [Self::DIAGONALS].
    pub fn diagonal_neighbors(self) -> [Self; 6] {
        Self::DIAGONALS.map(|dir| self + dir)
    }

    /// Distance from the origin to this coordinate, in tile steps
    pub fn length(self) -> u32 {
        // Two adjacent tile centers are always separated by two cube edges,
        // and the sum is always even so this division is exact
        ((self.x.abs() + self.y.abs() + self.z().abs()) / 2) as u32
    }

    /// Calculate the path distance between two tiles, meaning the number of
    /// hops it takes to get from one to the other. 0 if the points are equal,
    /// 1 if the tiles are adjacent, 2 if there is 1 tile between them, etc.
    pub fn distance(self, other: Self) -> u32 {
        (self - other).length()
    }

    /// Get every coordinate that is at most `radius` steps away from this one,
    /// including this one. The output has exactly `3r²+3r+1` coordinates,
    /// with no duplicates.
    pub fn within_range(self, radius: u32) -> Vec<Self> {
        let r = radius as i32;
        let mut coords = Vec::with_capacity(crate::util::hexagon_len(radius));
        for dx in -r..=r {
            // If we just do [-r,r] for y as well, then we end up with a
            // diamond pattern instead of a hexagon
            // https://www.redblobgames.com/grids/hexagons/#range
            let dy_min = cmp::max(-r, -dx - r);
            let dy_max = cmp::min(r, -dx + r);
            for dy in dy_min..=dy_max {
                coords.push(Self::new_xy(self.x + dx, self.y + dy));
            }
        }
        coords
    }

    /// Get every coordinate whose distance from this one falls in the given
    /// (inclusive) range. This is the `end` hexagon with the `start - 1`
    /// hexagon cut out of the middle, i.e. an annulus.
    pub fn within_range_between(self, range: RangeInclusive<u32>) -> Vec<Self> {
        let (min, max) = range.into_inner();
        self.within_range(max)
            .into_iter()
            .filter(|coord| self.distance(*coord) >= min)
            .collect()
    }

    /// Get all coordinates exactly `radius` steps away, starting in the
    /// default direction. See [Self::ring_from].
    pub fn ring(self, radius: u32) -> Vec<Self> {
        self.ring_from(radius, Self::DEFAULT_RING_START)
    }

    /// Get all coordinates exactly `radius` steps away, in angular order. The
    /// first coordinate is `radius` steps away in `start_direction` (an index
    /// into [Self::DIRECTIONS]), and from there we walk around the ring. A
    /// radius of 0 gives just this coordinate, otherwise the output has exactly
    /// `6r` coordinates.
    pub fn ring_from(self, radius: u32, start_direction: usize) -> Vec<Self> {
        if radius == 0 {
            return vec![self];
        }

        // The directions are ordered such that in order to walk around a ring
        // from any starting direction, the first leg goes in the direction
        // four places before it (or two after, mod 6). E.g. for pointy-top,
        // starting out west means the first leg is northeast.
        let start_direction = start_direction % 6;
        let first_leg = (start_direction + 2) % 6;

        let mut current =
            self + Self::DIRECTIONS[start_direction] * radius as i32;
        let mut coords = Vec::with_capacity(6 * radius as usize);
        for leg in 0..6 {
            let direction = (first_leg + leg) % 6;
            for _ in 0..radius {
                coords.push(current);
                current = current.neighbor(direction);
            }
        }
        coords
    }

    /// Walk outwards in rings. See [Self::spiral_ring_from].
    pub fn spiral_ring(self, radius: u32) -> Vec<Self> {
        self.spiral_ring_from(radius, Self::DEFAULT_RING_START)
    }

    /// This coordinate, followed by every ring from 1 up to **and including**
    /// `radius`. This covers the same coordinates as [Self::within_range],
    /// just in spiral order.
    pub fn spiral_ring_from(
        self,
        radius: u32,
        start_direction: usize,
    ) -> Vec<Self> {
        let mut coords = Vec::with_capacity(crate::util::hexagon_len(radius));
        coords.push(self);
        for r in 1..=radius {
            coords.extend(self.ring_from(r, start_direction));
        }
        coords
    }

    /// Linearly interpolate between this coordinate and another. `t = 0` is
    /// this coordinate, `t = 1` is the other. The output is generally not
    /// a whole tile, use [Self::round] to snap it back to one.
    pub fn lerp(self, other: Self, t: f64) -> Vector3<f64> {
        self.to_vector3() + (other - self).to_vector3() * t
    }

    /// Snap a fractional cube coordinate to the nearest whole tile. Each
    /// component is rounded independently (halves round up), then whichever
    /// component was changed the most by rounding is recalculated from the
    /// other two so that x+y+z=0 again. On ties, x gets fixed before y, and y
    /// before z.
    pub fn round(fractional: Vector3<f64>) -> Self {
        let x = round_half_up(fractional.x);
        let y = round_half_up(fractional.y);
        let z = round_half_up(fractional.z);
        let x_diff = (x as f64 - fractional.x).abs();
        let y_diff = (y as f64 - fractional.y).abs();
        let z_diff = (z as f64 - fractional.z).abs();

        if x_diff >= y_diff && x_diff >= z_diff {
            Self::new_xy(-y - z, y)
        } else if y_diff >= z_diff {
            Self::new_xy(x, -x - z)
        } else {
            Self::new_xy(x, y)
        }
    }

    /// Draw a straight line from this coordinate to another. The output
    /// includes both endpoints and has exactly `distance + 1` coordinates.
    pub fn line_to(self, other: Self) -> Vec<Self> {
        let distance = self.distance(other);
        if distance == 0 {
            return vec![self];
        }
        (0..=distance)
            .map(|i| Self::round(self.lerp(other, i as f64 / distance as f64)))
            .collect()
    }

    /// Get the interior of the line from this coordinate to another, meaning
    /// the line **without** either endpoint. For lines of length 0 or 1 there
    /// is no interior, so this is empty.
    pub fn line_to_midpoints(self, other: Self) -> Vec<Self> {
        let mut line = self.line_to(other);
        if line.len() <= 2 {
            return Vec::new();
        }
        line.pop();
        line.remove(0);
        line
    }

    /// Convert to row/column addressing for the given orientation and parity.
    /// Pointy-top tiles shift every other row, flat-top tiles shift every
    /// other column. See [OffsetCoordinate::to_cube_coordinate] for the
    /// reverse.
    pub fn to_offset_coordinate(
        self,
        offset_type: OffsetCoordinateType,
    ) -> OffsetCoordinate {
        let (x, y) = match offset_type.orientation {
            HexagonalOrientation::PointyTop => (
                self.x + offset_adjustment(self.y, offset_type.is_odd),
                self.y,
            ),
            HexagonalOrientation::FlatTop => (
                self.x,
                self.y + offset_adjustment(self.x, offset_type.is_odd),
            ),
        };
        OffsetCoordinate::new(x, y, offset_type)
    }

    /// Embed this coordinate in 2D by dropping z
    pub fn to_vector2(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }

    pub fn to_vector3(self) -> Vector3<f64> {
        Vector3::new(self.x as f64, self.y as f64, self.z() as f64)
    }
}

impl Default for CubeCoordinate {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl TryFrom<(i32, i32, i32)> for CubeCoordinate {
    type Error = anyhow::Error;

    fn try_from((x, y, z): (i32, i32, i32)) -> Result<Self, Self::Error> {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::CubeCoordinateSet;

    fn subject() -> CubeCoordinate {
        CubeCoordinate::new(2, 5, -7).unwrap()
    }

    fn cube(x: i32, y: i32, z: i32) -> CubeCoordinate {
        CubeCoordinate::new(x, y, z).unwrap()
    }

    #[test]
    fn test_new() {
        assert_eq!(CubeCoordinate::default(), cube(0, 0, 0));
        assert_eq!(CubeCoordinate::new_xy(1, 3), cube(1, 3, -4));
        assert_eq!(CubeCoordinate::new_xy(1, 3).z(), -4);

        let err = CubeCoordinate::new(1, 2, 3).unwrap_err();
        assert!(err.to_string().contains("(1, 2, 3)"), "{}", err);
        assert!(CubeCoordinate::try_from((2, 3, 4)).is_err());
        assert_eq!(CubeCoordinate::try_from((2, 3, -5)).unwrap(), cube(2, 3, -5));

        // Sums that would overflow i32 are still rejected
        assert!(CubeCoordinate::new(i32::MAX, i32::MAX, 2).is_err());
        assert!(CubeCoordinate::new(i32::MIN, i32::MIN, 0).is_err());
        assert!(CubeCoordinate::new(i32::MAX, 2, i32::MIN).is_err());
        let extreme = CubeCoordinate::new(i32::MIN, 1, i32::MAX).unwrap();
        assert_eq!(extreme.z(), i32::MAX);
        let extreme = CubeCoordinate::new(i32::MAX, 0, -i32::MAX).unwrap();
        assert_eq!(extreme.z(), -i32::MAX);
    }

    #[test]
    fn test_arithmetic() {
        let modifier = cube(3, 4, -7);
        assert_eq!(subject() + modifier, cube(5, 9, -14));
        assert_eq!(subject() + subject(), cube(4, 10, -14));
        assert_eq!(subject() + -subject(), CubeCoordinate::ORIGIN);
        assert_eq!(subject() - modifier, cube(-1, 1, 0));
        assert_eq!(subject() - subject(), CubeCoordinate::ORIGIN);
        assert_eq!(-subject(), cube(-2, -5, 7));
        assert_eq!(-(-subject()), subject());
        assert_eq!(subject() * 3, cube(6, 15, -21));
        assert_eq!(subject().to_string(), "(2, 5, -7)");
    }

    #[test]
    fn test_neighbors() {
        let subject = subject();
        let neighbors = subject.neighbors();
        for (i, neighbor) in neighbors.iter().enumerate() {
            assert_eq!(*neighbor, subject + CubeCoordinate::DIRECTIONS[i]);
            assert_eq!(subject.neighbor(i), *neighbor);
            assert_eq!(subject.distance(*neighbor), 1);
        }
        assert_eq!(subject.neighbor(7), neighbors[1]);

        for (i, diagonal) in subject.diagonal_neighbors().iter().enumerate() {
            assert_eq!(*diagonal, subject + CubeCoordinate::DIAGONALS[i]);
            assert_eq!(subject.diagonal_neighbor(i), *diagonal);
            assert_eq!(subject.distance(*diagonal), 2);
        }
    }

    #[test]
    fn test_distance() {
        let p0 = CubeCoordinate::ORIGIN;
        let p1 = CubeCoordinate::new_xy(-1, 1);
        let p2 = CubeCoordinate::new_xy(2, -1);
        let p3 = CubeCoordinate::new_xy(2, -3);

        assert_eq!(p0.distance(p0), 0);
        assert_eq!(p3.distance(p3), 0);
        assert_eq!(p0.distance(p1), 1);
        assert_eq!(p0.distance(p2), 2);
        assert_eq!(p0.distance(p3), 3);
        assert_eq!(p1.distance(p2), 3);
        assert_eq!(p1.distance(p3), 4);
        assert_eq!(p2.distance(p3), 2);
        assert_eq!(p3.distance(p1), 4);
        assert_eq!(subject().distance(cube(1, 2, -3)), 4);
        assert_eq!(subject().length(), 7);
    }

    #[test]
    fn test_within_range() {
        let subject = subject();
        assert_eq!(subject.within_range(0), vec![subject]);

        let range1: CubeCoordinateSet =
            subject.within_range(1).into_iter().collect();
        let mut expected: CubeCoordinateSet =
            subject.neighbors().iter().copied().collect();
        expected.insert(subject);
        assert_eq!(range1, expected);

        for radius in 0..6 {
            let coords = subject.within_range(radius);
            let unique: CubeCoordinateSet = coords.iter().copied().collect();
            assert_eq!(coords.len(), crate::util::hexagon_len(radius));
            assert_eq!(unique.len(), coords.len(), "duplicates in {:?}", coords);
            assert!(coords.iter().all(|c| subject.distance(*c) <= radius));
        }
    }

    #[test]
    fn test_within_range_between() {
        let subject = subject();
        let annulus = subject.within_range_between(2..=3);
        assert_eq!(annulus.len(), 12 + 18);
        assert!(annulus.iter().all(|c| {
            let distance = subject.distance(*c);
            (2..=3).contains(&distance)
        }));
        assert_eq!(subject.within_range_between(0..=0), vec![subject]);
        assert_eq!(
            subject.within_range_between(0..=2),
            subject.within_range(2)
        );
    }

    #[test]
    fn test_ring() {
        let subject = subject();
        let n = subject.neighbors();
        assert_eq!(subject.ring(0), vec![subject]);
        assert_eq!(subject.ring(1), vec![n[4], n[5], n[0], n[1], n[2], n[3]]);
        assert_eq!(
            subject.ring_from(1, 2),
            vec![n[2], n[3], n[4], n[5], n[0], n[1]]
        );
        assert_eq!(
            subject.ring(2),
            vec![
                cube(0, 7, -7),
                cube(1, 7, -8),
                cube(2, 7, -9),
                cube(3, 6, -9),
                cube(4, 5, -9),
                cube(4, 4, -8),
                cube(4, 3, -7),
                cube(3, 3, -6),
                cube(2, 3, -5),
                cube(1, 4, -5),
                cube(0, 5, -5),
                cube(0, 6, -6),
            ]
        );

        for radius in 1..6 {
            let ring = subject.ring_from(radius, radius as usize);
            assert_eq!(ring.len(), 6 * radius as usize);
            assert!(ring.iter().all(|c| subject.distance(*c) == radius));
            // Angular order means every step is to an adjacent tile
            for pair in ring.windows(2) {
                assert_eq!(pair[0].distance(pair[1]), 1);
            }
        }
    }

    #[test]
    fn test_spiral_ring() {
        let subject = subject();
        assert_eq!(subject.spiral_ring(0), vec![subject]);
        let mut expected = vec![subject];
        expected.extend(subject.ring(1));
        assert_eq!(subject.spiral_ring(1), expected);

        for radius in 0..5 {
            let spiral: CubeCoordinateSet =
                subject.spiral_ring(radius).into_iter().collect();
            let disk: CubeCoordinateSet =
                subject.within_range(radius).into_iter().collect();
            assert_eq!(spiral, disk);
            assert_eq!(
                subject.spiral_ring(radius).len(),
                crate::util::hexagon_len(radius)
            );
        }
    }

    #[test]
    fn test_round() {
        assert_eq!(
            CubeCoordinate::round(Vector3::new(0.9, -0.1, -0.8)),
            cube(1, 0, -1)
        );
        // Ties: x gets fixed first
        assert_eq!(
            CubeCoordinate::round(Vector3::new(0.5, -0.5, 0.0)),
            cube(0, 0, 0)
        );
        // y is the furthest off
        assert_eq!(
            CubeCoordinate::round(Vector3::new(0.3, 0.45, -0.75)),
            cube(0, 1, -1)
        );
        assert_eq!(
            CubeCoordinate::round(Vector3::new(-2.0, 3.0, -1.0)),
            cube(-2, 3, -1)
        );
    }

    #[test]
    fn test_line_to() {
        let origin = CubeCoordinate::ORIGIN;
        assert_eq!(origin.line_to(origin), vec![origin]);
        assert_eq!(
            origin.line_to(cube(3, -3, 0)),
            vec![cube(0, 0, 0), cube(1, -1, 0), cube(2, -2, 0), cube(3, -3, 0)]
        );
        assert_eq!(
            origin.line_to(cube(2, 1, -3)),
            vec![cube(0, 0, 0), cube(1, 0, -1), cube(1, 1, -2), cube(2, 1, -3)]
        );

        let target = cube(-4, 7, -3);
        let line = subject().line_to(target);
        assert_eq!(line.len(), subject().distance(target) as usize + 1);
        assert_eq!(line.first(), Some(&subject()));
        assert_eq!(line.last(), Some(&target));
    }

    #[test]
    fn test_line_to_midpoints() {
        let origin = CubeCoordinate::ORIGIN;
        assert!(origin.line_to_midpoints(origin).is_empty());
        assert!(origin.line_to_midpoints(origin.neighbor(0)).is_empty());
        assert_eq!(
            origin.line_to_midpoints(cube(3, -3, 0)),
            vec![cube(1, -1, 0), cube(2, -2, 0)]
        );
        assert_eq!(
            origin.line_to_midpoints(cube(0, 2, -2)),
            vec![cube(0, 1, -1)]
        );
    }

    #[test]
    fn test_to_offset_coordinate() {
        let subject = subject();
        let pointy = HexagonalOrientation::PointyTop;
        let flat = HexagonalOrientation::FlatTop;

        let offset_type = OffsetCoordinateType::odd(pointy);
        assert_eq!(
            subject.to_offset_coordinate(offset_type),
            OffsetCoordinate::new(4, 5, offset_type)
        );
        let offset_type = OffsetCoordinateType::even(pointy);
        assert_eq!(
            subject.to_offset_coordinate(offset_type),
            OffsetCoordinate::new(5, 5, offset_type)
        );
        let offset_type = OffsetCoordinateType::odd(flat);
        assert_eq!(
            subject.to_offset_coordinate(offset_type),
            OffsetCoordinate::new(2, 6, offset_type)
        );
        let offset_type = OffsetCoordinateType::even(flat);
        assert_eq!(
            subject.to_offset_coordinate(offset_type),
            OffsetCoordinate::new(2, 6, offset_type)
        );
    }

    #[test]
    fn test_vectors() {
        let subject = subject();
        assert_eq!(subject.to_vector2(), Vector2::new(2.0, 5.0));
        assert_eq!(subject.to_vector3(), Vector3::new(2.0, 5.0, -7.0));
        assert_eq!(
            CubeCoordinate::ORIGIN.lerp(cube(2, -4, 2), 0.5),
            Vector3::new(1.0, -2.0, 1.0)
        );
    }
}
