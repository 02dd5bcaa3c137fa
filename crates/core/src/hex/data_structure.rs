use crate::hex::CubeCoordinate;
use fnv::FnvBuildHasher;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

/// A set of cube coordinates
pub type CubeCoordinateSet = HashSet<CubeCoordinate, FnvBuildHasher>;
/// A map of cube coordinates to some `T`
pub type CubeCoordinateMap<T> = HashMap<CubeCoordinate, T, FnvBuildHasher>;
/// An ORDERED set of cube coordinates. This has some extra memory overhead,
/// so we should only use it when we actually need the ordering.
pub type CubeCoordinateIndexSet = IndexSet<CubeCoordinate, FnvBuildHasher>;
/// An ORDERED map of cube coordinates to some `T`. Iteration order is
/// insertion order (until something gets removed).
pub type CubeCoordinateIndexMap<T> =
    IndexMap<CubeCoordinate, T, FnvBuildHasher>;

/// Something that occupies a single tile
pub trait Locatable {
    fn location(&self) -> CubeCoordinate;
}

/// Something that can move around the map. Used with
/// [HexagonalMap::get_reachable_locations_for](crate::HexagonalMap::get_reachable_locations_for).
pub trait Movable: Locatable {
    /// Total movement cost this thing can spend in one go
    fn movement_range(&self) -> u32;

    /// If false, this thing is stuck where it is (regardless of its range)
    fn can_move(&self) -> bool {
        true
    }
}

/// Something that can see. Used with
/// [HexagonalMap::get_visible_locations_for](crate::HexagonalMap::get_visible_locations_for).
pub trait VisibilityLocation: Locatable {
    /// How many tiles away this thing can see
    fn visible_range(&self) -> u32;
}

impl Locatable for CubeCoordinate {
    fn location(&self) -> CubeCoordinate {
        *self
    }
}
