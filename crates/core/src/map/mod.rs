//! The tile map, and all the spatial queries that run over it

mod cache;
mod listener;
mod tile;
mod vertex_cache;

pub use self::{listener::*, tile::*, vertex_cache::*};

use crate::{
    hex::{
        CubeCoordinateIndexMap, CubeCoordinateIndexSet, Movable,
        VisibilityLocation,
    },
    map::cache::DerivedCache,
    observer::ObservableSubject,
    timed,
    util::unit::{PixelPoint, Point2, Vector2},
    CubeCoordinate, HexagonalLayout, HexagonalOrientation, OffsetCoordinate,
    OffsetCoordinateType,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, rc::Rc};
use strum::{Display, EnumIter};

/// One of the four outer boundaries of a map, in offset space. Left and right
/// are the ends of each row. Bottom and top are the ends of each column, with
/// offset y growing towards the top.
#[derive(Copy, Clone, Debug, Display, EnumIter, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum MapEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// The tiles along each edge of a map. `left` and `right` have one entry per
/// row, `top` and `bottom` one per column, each in ascending row/column
/// order.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct MapEdges {
    pub left: Vec<CubeCoordinate>,
    pub right: Vec<CubeCoordinate>,
    pub top: Vec<CubeCoordinate>,
    pub bottom: Vec<CubeCoordinate>,
}

impl MapEdges {
    pub fn get(&self, edge: MapEdge) -> &[CubeCoordinate] {
        match edge {
            MapEdge::Left => &self.left,
            MapEdge::Right => &self.right,
            MapEdge::Top => &self.top,
            MapEdge::Bottom => &self.bottom,
        }
    }

    fn filter(&self, keep: impl Fn(&CubeCoordinate) -> bool) -> Self {
        let filter_edge = |edge: &[CubeCoordinate]| {
            edge.iter().copied().filter(|c| keep(c)).collect()
        };
        Self {
            left: filter_edge(&self.left),
            right: filter_edge(&self.right),
            top: filter_edge(&self.top),
            bottom: filter_edge(&self.bottom),
        }
    }
}

/// The smallest offset-space rectangle that holds every tile on a map
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl OffsetBounds {
    /// Number of columns
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x + 1) as u32
    }

    /// Number of rows
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y + 1) as u32
    }
}

/// A sparse collection of tiles, keyed by location. The map also knows its
/// [HexagonalLayout], so it can project tiles into pixel space, and its
/// offset parity, so it can describe itself in rows and columns.
///
/// Aggregates that are derived from the whole tile set (movable tiles, edges,
/// offset bounds) are computed on first use and cached. Every mutation drops
/// all of them, then notifies listeners (see [HexagonalMapListener]).
///
/// Maps use interior caching and shared listener handles, so they're meant to
/// live on one thread. Wrap them in a lock of your own if you need more.
#[derive(Debug)]
pub struct HexagonalMap<T> {
    layout: HexagonalLayout,
    odd_offset: bool,
    tiles: CubeCoordinateIndexMap<HexagonalTile<T>>,
    cache: DerivedCache,
    listeners: ObservableSubject<dyn HexagonalMapListener<T>>,
}

impl<T> HexagonalMap<T> {
    /// Create a map from a set of tiles. If two tiles have the same location,
    /// the latter wins. Offset coordinates default to odd parity, see
    /// [Self::with_odd_offset].
    pub fn new(
        layout: HexagonalLayout,
        tiles: impl IntoIterator<Item = HexagonalTile<T>>,
    ) -> Self {
        let tiles: CubeCoordinateIndexMap<_> = tiles
            .into_iter()
            .map(|tile| (tile.location(), tile))
            .collect();
        debug!(
            "Created {} map with {} tiles",
            layout.orientation(),
            tiles.len()
        );
        Self {
            layout,
            odd_offset: true,
            tiles,
            cache: DerivedCache::default(),
            listeners: ObservableSubject::new(),
        }
    }

    /// Create a map from a grid of terrains. The outer iterator is rows
    /// (offset y) and each inner iterator is one row's columns (offset x),
    /// both starting at 0. Rows don't need to be the same length.
    pub fn from_offset_rows<R>(
        layout: HexagonalLayout,
        odd_offset: bool,
        rows: impl IntoIterator<Item = R>,
    ) -> Self
    where
        R: IntoIterator<Item = T>,
    {
        let offset_type =
            OffsetCoordinateType::new(layout.orientation(), odd_offset);
        let tiles = rows.into_iter().enumerate().flat_map(|(y, row)| {
            row.into_iter().enumerate().map(move |(x, terrain)| {
                let location =
                    OffsetCoordinate::new(x as i32, y as i32, offset_type)
                        .to_cube_coordinate();
                HexagonalTile::new(location, terrain)
            })
        });
        Self::new(layout, tiles).with_odd_offset(odd_offset)
    }

    /// Choose whether odd or even rows/columns are shifted when describing
    /// this map in offset coordinates. This only changes how the map is
    /// **described** (rows, columns, edges, bounds), never which tiles it
    /// holds.
    pub fn with_odd_offset(mut self, odd_offset: bool) -> Self {
        self.odd_offset = odd_offset;
        self.cache.invalidate();
        self
    }

    pub fn layout(&self) -> &HexagonalLayout {
        &self.layout
    }

    pub fn orientation(&self) -> HexagonalOrientation {
        self.layout.orientation()
    }

    pub fn position(&self) -> Point2 {
        self.layout.position()
    }

    pub fn tile_size(&self) -> Vector2 {
        self.layout.tile_size()
    }

    pub fn packed_tile_size(&self) -> Vector2 {
        self.layout.packed_tile_size()
    }

    /// The offset addressing used to describe this map
    pub fn offset_type(&self) -> OffsetCoordinateType {
        OffsetCoordinateType::new(self.orientation(), self.odd_offset)
    }

    /// Convert a location to this map's offset addressing
    pub fn to_offset(&self, location: CubeCoordinate) -> OffsetCoordinate {
        location.to_offset_coordinate(self.offset_type())
    }

    /// Convert an offset position in this map's addressing to a location
    pub fn offset_location(&self, x: i32, y: i32) -> CubeCoordinate {
        OffsetCoordinate::new(x, y, self.offset_type()).to_cube_coordinate()
    }

    pub fn tiles(&self) -> &CubeCoordinateIndexMap<HexagonalTile<T>> {
        &self.tiles
    }

    /// Every location that has a tile
    pub fn locations(&self) -> impl Iterator<Item = CubeCoordinate> + '_ {
        self.tiles.keys().copied()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn get_tile(&self, location: CubeCoordinate) -> Option<&HexagonalTile<T>> {
        self.tiles.get(&location)
    }

    pub fn get_terrain(&self, location: CubeCoordinate) -> Option<&T> {
        self.tiles.get(&location).map(HexagonalTile::terrain)
    }

    /// Is there a tile at this location?
    pub fn is_valid_location(&self, location: CubeCoordinate) -> bool {
        self.tiles.contains_key(&location)
    }

    pub fn to_pixel(&self, location: CubeCoordinate) -> PixelPoint {
        self.layout.to_pixel(location)
    }

    pub fn to_hex(&self, pixel: PixelPoint) -> CubeCoordinate {
        self.layout.to_hex(pixel)
    }

    pub fn polygon_corners(&self, location: CubeCoordinate) -> [Point2; 6] {
        self.layout.polygon_corners(location)
    }

    pub fn polygon_vertices(&self, location: CubeCoordinate) -> [f64; 12] {
        self.layout.polygon_vertices(location)
    }

    /// The offset-space extent of the map. `None` if the map is empty.
    pub fn offset_bounds(&self) -> Option<OffsetBounds> {
        *self.cache.offset_bounds.get_or_compute(|| {
            trace!("Computing offset bounds");
            let mut offsets = self.offset_coordinates();
            let first = offsets.next()?;
            let init = OffsetBounds {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            };
            Some(offsets.fold(init, |bounds, offset| OffsetBounds {
                min_x: bounds.min_x.min(offset.x),
                min_y: bounds.min_y.min(offset.y),
                max_x: bounds.max_x.max(offset.x),
                max_y: bounds.max_y.max(offset.y),
            }))
        })
    }

    /// Number of columns spanned by the map. 0 for an empty map.
    pub fn width(&self) -> u32 {
        self.offset_bounds().map_or(0, |bounds| bounds.width())
    }

    /// Number of rows spanned by the map. 0 for an empty map.
    pub fn height(&self) -> u32 {
        self.offset_bounds().map_or(0, |bounds| bounds.height())
    }

    /// Width over height, in tiles. 0 for an empty map.
    pub fn aspect_ratio(&self) -> f64 {
        match self.height() {
            0 => 0.0,
            height => self.width() as f64 / height as f64,
        }
    }

    /// Approximate pixel size of the whole map, based on packed tile spacing
    pub fn world_size(&self) -> Vector2 {
        let packed = self.packed_tile_size();
        Vector2::new(
            self.width() as f64 * packed.x,
            self.height() as f64 * packed.y,
        )
    }

    /// All tiles grouped into offset rows. Rows are in ascending offset y,
    /// and tiles within a row in ascending offset x.
    pub fn rows(&self) -> Vec<Vec<CubeCoordinate>> {
        self.group_offsets(|offset| offset.y, |offset| offset.x)
    }

    /// All tiles grouped into offset columns. Columns are in ascending offset
    /// x, and tiles within a column in ascending offset y.
    pub fn columns(&self) -> Vec<Vec<CubeCoordinate>> {
        self.group_offsets(|offset| offset.x, |offset| offset.y)
    }

    /// The outermost tiles of each row and column. See [MapEdges].
    pub fn edges(&self) -> &MapEdges {
        self.cache.edges.get_or_compute(|| {
            trace!("Computing map edges");
            let rows = self.rows();
            let columns = self.columns();
            let firsts = |groups: &[Vec<CubeCoordinate>]| {
                groups.iter().filter_map(|g| g.first().copied()).collect()
            };
            let lasts = |groups: &[Vec<CubeCoordinate>]| {
                groups.iter().filter_map(|g| g.last().copied()).collect()
            };
            MapEdges {
                left: firsts(&rows),
                right: lasts(&rows),
                top: lasts(&columns),
                bottom: firsts(&columns),
            }
        })
    }

    /// Set the terrain at a location, creating a tile if there wasn't one
    pub fn set(&mut self, location: CubeCoordinate, terrain: T) {
        self.tiles
            .insert(location, HexagonalTile::new(location, terrain));
        self.tiles_changed(&[location]);
    }

    /// Add a tile, replacing whatever was at its location
    pub fn add_tile(&mut self, tile: HexagonalTile<T>) {
        let location = tile.location();
        self.tiles.insert(location, tile);
        self.tiles_changed(&[location]);
    }

    /// Add a batch of tiles. Listeners get a single notification for the
    /// whole batch.
    pub fn add_tiles(&mut self, tiles: impl IntoIterator<Item = HexagonalTile<T>>) {
        let mut locations = Vec::new();
        for tile in tiles {
            locations.push(tile.location());
            self.tiles.insert(tile.location(), tile);
        }
        self.tiles_changed(&locations);
    }

    /// Remove the tile at a location, returning it if there was one
    pub fn remove_tile(&mut self, location: CubeCoordinate) -> Option<HexagonalTile<T>> {
        let removed = self.tiles.swap_remove(&location);
        self.tiles_changed(&[location]);
        removed
    }

    /// Remove a batch of tiles. Listeners get a single notification for the
    /// whole batch.
    pub fn remove_tiles(
        &mut self,
        locations: impl IntoIterator<Item = CubeCoordinate>,
    ) {
        let locations: Vec<CubeCoordinate> = locations.into_iter().collect();
        for location in &locations {
            self.tiles.swap_remove(location);
        }
        self.tiles_changed(&locations);
    }

    /// Register a listener to be told about tile changes. Returns `false` if
    /// that listener was already registered.
    pub fn add_listener(
        &mut self,
        listener: Rc<dyn HexagonalMapListener<T>>,
    ) -> bool {
        self.listeners.add_listener(listener)
    }

    /// Unregister a listener. Returns `false` if it wasn't registered.
    pub fn remove_listener(
        &mut self,
        listener: &Rc<dyn HexagonalMapListener<T>>,
    ) -> bool {
        self.listeners.remove_listener(listener)
    }

    /// Build a new map with the same tiles and a resized layout. Listeners
    /// are not carried over.
    pub fn resize_layout(&self, tile_radius: Vector2) -> Self
    where
        T: Clone,
    {
        Self::new(self.layout.resize(tile_radius), self.tiles.values().cloned())
            .with_odd_offset(self.odd_offset)
    }

    fn offset_coordinates(&self) -> impl Iterator<Item = OffsetCoordinate> + '_ {
        let offset_type = self.offset_type();
        self.tiles
            .keys()
            .map(move |location| location.to_offset_coordinate(offset_type))
    }

    fn group_offsets(
        &self,
        group_key: impl Fn(&OffsetCoordinate) -> i32,
        sort_key: impl Fn(&OffsetCoordinate) -> i32,
    ) -> Vec<Vec<CubeCoordinate>> {
        let mut groups: BTreeMap<i32, Vec<OffsetCoordinate>> = BTreeMap::new();
        for offset in self.offset_coordinates() {
            groups.entry(group_key(&offset)).or_default().push(offset);
        }
        groups
            .into_values()
            .map(|mut group| {
                group.sort_by_key(|offset| sort_key(offset));
                group
                    .into_iter()
                    .map(OffsetCoordinate::to_cube_coordinate)
                    .collect()
            })
            .collect()
    }

    fn tiles_changed(&mut self, locations: &[CubeCoordinate]) {
        debug!(
            "{} location(s) changed, map now has {} tiles",
            locations.len(),
            self.tiles.len()
        );
        self.cache.invalidate();
        let map: &Self = self;
        map.listeners
            .notify(|listener| listener.tiles_changed(map, locations));
    }
}

impl<T: Terrain> HexagonalMap<T> {
    /// Is there a tile at this location that can be moved onto? Missing tiles
    /// are never movable.
    pub fn is_movable_location(&self, location: CubeCoordinate) -> bool {
        self.tiles
            .get(&location)
            .map_or(false, |tile| !tile.is_move_obstacle())
    }

    /// Cost to enter the tile at a location, or `u32::MAX` if there is no
    /// tile there
    pub fn get_movement_cost(&self, location: CubeCoordinate) -> u32 {
        self.tiles
            .get(&location)
            .map_or(u32::MAX, HexagonalTile::movement_cost)
    }

    /// Every location whose tile is not a movement obstacle
    pub fn movable_locations(&self) -> &CubeCoordinateIndexSet {
        self.cache.movable_locations.get_or_compute(|| {
            trace!("Computing movable locations");
            self.tiles
                .values()
                .filter(|tile| !tile.is_move_obstacle())
                .map(HexagonalTile::location)
                .collect()
        })
    }

    /// Tiles for [Self::movable_locations], read through the same cache
    pub fn movable_tiles(&self) -> impl Iterator<Item = &HexagonalTile<T>> {
        self.movable_locations()
            .iter()
            .filter_map(move |location| self.tiles.get(location))
    }

    /// [Self::edges], minus any tiles that aren't movable
    pub fn movable_edges(&self) -> &MapEdges {
        self.cache.movable_edges.get_or_compute(|| {
            trace!("Computing movable edges");
            let movable = self.movable_locations();
            self.edges().filter(|location| movable.contains(location))
        })
    }

    /// Flood outwards from `source`, spending movement cost to enter each
    /// tile, and return the cheapest known cost for every location reached.
    /// The source is always included at cost 0, and is the first entry.
    /// Other locations are in order of discovery. If there is no tile at
    /// `source`, nothing is reachable.
    ///
    /// Frontier tiles are expanded a whole round at a time, so a location can
    /// be found again later via a cheaper path, in which case it's expanded
    /// again with the lower cost. Costs only ever go down and every entry is
    /// capped by `range`, so this always terminates.
    pub fn reachable_costs(
        &self,
        source: CubeCoordinate,
        range: u32,
    ) -> CubeCoordinateIndexMap<u32> {
        let mut reachable = CubeCoordinateIndexMap::default();
        if !self.is_valid_location(source) {
            return reachable;
        }
        reachable.insert(source, 0);

        let mut frontier = vec![source];
        while !frontier.is_empty() {
            let mut next = CubeCoordinateIndexSet::default();
            for location in frontier {
                let cost = match reachable.get(&location) {
                    Some(&cost) => cost,
                    None => continue,
                };
                for neighbor in location.neighbors() {
                    let tile = match self.tiles.get(&neighbor) {
                        Some(tile) if !tile.is_move_obstacle() => tile,
                        _ => continue,
                    };
                    let candidate = cost.saturating_add(tile.movement_cost());
                    let improves = reachable
                        .get(&neighbor)
                        .map_or(true, |&known| candidate < known);
                    if candidate <= range && improves {
                        reachable.insert(neighbor, candidate);
                        next.insert(neighbor);
                    }
                }
            }
            frontier = next.into_iter().collect();
        }
        reachable
    }

    /// Get every tile that can be reached from `source` without spending
    /// more than `range` movement. See [Self::reachable_costs].
    pub fn get_reachable_tiles(
        &self,
        source: CubeCoordinate,
        range: u32,
    ) -> Vec<&HexagonalTile<T>> {
        self.get_reachable_locations(source, range)
            .into_iter()
            .filter_map(|location| self.tiles.get(&location))
            .collect()
    }

    /// Same as [Self::get_reachable_tiles], but just the locations
    pub fn get_reachable_locations(
        &self,
        source: CubeCoordinate,
        range: u32,
    ) -> Vec<CubeCoordinate> {
        timed!("Reachability query", {
            self.reachable_costs(source, range).keys().copied().collect()
        })
    }

    /// Get everywhere a mover can go with its full range. A mover that can't
    /// move can only stay where it is.
    pub fn get_reachable_locations_for(
        &self,
        mover: &impl Movable,
    ) -> Vec<CubeCoordinate> {
        let location = mover.location();
        if mover.can_move() {
            self.get_reachable_locations(location, mover.movement_range())
        } else if self.is_valid_location(location) {
            vec![location]
        } else {
            Vec::new()
        }
    }

    /// Get every tile within `range` steps of `source` that has a clear line
    /// of sight to it. A tile is hidden if any tile strictly between it and
    /// the source is a view obstacle. Obstacles themselves can be seen, and
    /// gaps in the map never block anything. If there is no tile at `source`,
    /// nothing is visible.
    pub fn get_visible_tiles(
        &self,
        source: CubeCoordinate,
        range: u32,
    ) -> Vec<&HexagonalTile<T>> {
        if !self.is_valid_location(source) {
            return Vec::new();
        }
        timed!("Visibility query", {
            source
                .within_range(range)
                .into_iter()
                .filter_map(|location| self.tiles.get(&location))
                .filter(|tile| self.is_line_clear(source, tile.location()))
                .collect()
        })
    }

    /// Same as [Self::get_visible_tiles], but just the locations
    pub fn get_visible_locations(
        &self,
        source: CubeCoordinate,
        range: u32,
    ) -> Vec<CubeCoordinate> {
        self.get_visible_tiles(source, range)
            .into_iter()
            .map(HexagonalTile::location)
            .collect()
    }

    /// Get everything a viewer can see with its full range
    pub fn get_visible_locations_for(
        &self,
        viewer: &impl VisibilityLocation,
    ) -> Vec<CubeCoordinate> {
        self.get_visible_locations(viewer.location(), viewer.visible_range())
    }

    fn is_line_clear(&self, from: CubeCoordinate, to: CubeCoordinate) -> bool {
        from.line_to_midpoints(to)
            .into_iter()
            .filter_map(|location| self.tiles.get(&location))
            .all(|tile| !tile.is_view_obstacle())
    }
}
