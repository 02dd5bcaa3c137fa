use crate::{
    hex::CubeCoordinateIndexSet,
    map::{MapEdges, OffsetBounds},
};
use std::cell::OnceCell;

/// A lazily computed value. The first read computes it, later reads reuse it
/// until it gets invalidated.
#[derive(Clone, Debug)]
pub(crate) struct Cached<V> {
    cell: OnceCell<V>,
}

impl<V> Cached<V> {
    pub fn get_or_compute(&self, compute: impl FnOnce() -> V) -> &V {
        self.cell.get_or_init(compute)
    }

    pub fn invalidate(&mut self) {
        self.cell.take();
    }

    pub fn is_cached(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<V> Default for Cached<V> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }
}

/// Every aggregate that a map derives from its tiles. All of these go stale
/// together whenever the tile set changes.
#[derive(Clone, Debug, Default)]
pub(crate) struct DerivedCache {
    pub movable_locations: Cached<CubeCoordinateIndexSet>,
    pub offset_bounds: Cached<Option<OffsetBounds>>,
    pub edges: Cached<MapEdges>,
    pub movable_edges: Cached<MapEdges>,
}

impl DerivedCache {
    pub fn invalidate(&mut self) {
        self.movable_locations.invalidate();
        self.offset_bounds.invalidate();
        self.edges.invalidate();
        self.movable_edges.invalidate();
    }

    /// Is anything currently cached?
    pub fn is_populated(&self) -> bool {
        self.movable_locations.is_cached()
            || self.offset_bounds.is_cached()
            || self.edges.is_cached()
            || self.movable_edges.is_cached()
    }
}
