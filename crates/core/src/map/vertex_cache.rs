use crate::{hex::CubeCoordinateMap, CubeCoordinate, HexagonalLayout, HexagonalMap};

/// Memoized polygon vertices, for renderers that draw the same tiles over and
/// over. Every tile on the map is computed up front, and any other coordinate
/// is computed the first time it's requested.
///
/// The cache holds its own copy of the layout, so it doesn't track later
/// changes to the map. Build a new one after resizing.
#[derive(Clone, Debug)]
pub struct HexagonalVertexCache {
    layout: HexagonalLayout,
    entries: CubeCoordinateMap<VertexEntry>,
}

impl HexagonalVertexCache {
    pub fn new<T>(map: &HexagonalMap<T>) -> Self {
        let layout = *map.layout();
        let entries = map
            .locations()
            .map(|location| {
                (location, VertexEntry::new(layout.polygon_vertices(location)))
            })
            .collect();
        Self { layout, entries }
    }

    /// Get the vertices for a coordinate, computing them if necessary
    pub fn get(&mut self, coordinate: CubeCoordinate) -> &VertexEntry {
        let layout = &self.layout;
        self.entries.entry(coordinate).or_insert_with(|| {
            VertexEntry::new(layout.polygon_vertices(coordinate))
        })
    }

    /// Number of coordinates currently cached
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The six corners of a tile's polygon, flattened as `[x0, y0, x1, y1, ...]`,
/// along with its bounding box
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexEntry {
    pub vertices: [f64; 12],
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl VertexEntry {
    fn new(vertices: [f64; 12]) -> Self {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for corner in vertices.chunks_exact(2) {
            min_x = min_x.min(corner[0]);
            max_x = max_x.max(corner[0]);
            min_y = min_y.min(corner[1]);
            max_y = max_y.max(corner[1]);
        }
        Self {
            vertices,
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn mid_x(&self) -> f64 {
        self.min_x + self.width() / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.min_y + self.height() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{util::unit::Vector2, HexagonalOrientation, HexagonalTile};
    use assert_approx_eq::assert_approx_eq;

    fn map() -> HexagonalMap<()> {
        let layout = HexagonalLayout::new(
            HexagonalOrientation::FlatTop,
            Default::default(),
            Vector2::new(10.0, 5.0),
        );
        HexagonalMap::new(
            layout,
            CubeCoordinate::ORIGIN
                .within_range(1)
                .into_iter()
                .map(|c| HexagonalTile::new(c, ())),
        )
    }

    #[test]
    fn test_seeded_from_map() {
        let map = map();
        let mut cache = HexagonalVertexCache::new(&map);
        assert_eq!(cache.len(), 7);

        let coord = CubeCoordinate::new_xy(1, -1);
        let entry = *cache.get(coord);
        assert_eq!(entry.vertices, map.polygon_vertices(coord));
        assert_eq!(cache.len(), 7);

        // Not on the map, so it gets filled in
        let outside = CubeCoordinate::new_xy(5, -5);
        assert_eq!(cache.get(outside).vertices, map.polygon_vertices(outside));
        assert_eq!(cache.len(), 8);
    }

    #[test]
    fn test_bounding_box() {
        let map = map();
        let mut cache = HexagonalVertexCache::new(&map);
        let entry = cache.get(CubeCoordinate::ORIGIN);
        // Flat-top corners sit at 0° and 180°, so the box is 2·r wide but
        // only 2·sin(60°)·r tall
        assert_approx_eq!(entry.min_x, -10.0);
        assert_approx_eq!(entry.max_x, 10.0);
        assert_approx_eq!(entry.width(), 20.0);
        assert_approx_eq!(entry.height(), 8.660_254);
        assert_approx_eq!(entry.mid_x(), 0.0);
        assert_approx_eq!(entry.mid_y(), 0.0);
    }
}
