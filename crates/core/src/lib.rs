//! Hexmap is a hex grid toolkit. It handles the coordinate math for hexagon
//! tiles (cube and offset coordinates, neighbors, rings, lines), projects
//! tiles to and from pixel space, and answers spatial queries over a sparse
//! map of tiles: which tiles a mover can reach, which tiles are in line of
//! sight, and where the map's edges are. Drawing is left to whatever is on
//! the other end.
//!
//! ```
//! use hexmap::{CubeCoordinate, HexagonalLayout, HexagonalMap, Terrain};
//!
//! #[derive(Copy, Clone, Debug, PartialEq)]
//! enum Ground {
//!     Grass,
//!     Lake,
//! }
//!
//! impl Terrain for Ground {
//!     fn id(&self) -> &str {
//!         match self {
//!             Self::Grass => "grass",
//!             Self::Lake => "lake",
//!         }
//!     }
//!
//!     fn is_move_obstacle(&self) -> bool {
//!         *self == Self::Lake
//!     }
//!
//!     fn is_view_obstacle(&self) -> bool {
//!         false
//!     }
//!
//!     fn movement_cost(&self) -> u32 {
//!         1
//!     }
//! }
//!
//! let map = HexagonalMap::from_offset_rows(
//!     HexagonalLayout::default(),
//!     true,
//!     vec![
//!         vec![Ground::Grass, Ground::Lake, Ground::Grass],
//!         vec![Ground::Grass, Ground::Grass, Ground::Grass],
//!     ],
//! );
//! let reachable = map.get_reachable_locations(CubeCoordinate::ORIGIN, 2);
//! assert!(!reachable.contains(&map.offset_location(1, 0)));
//! ```
//!
//! See [CubeCoordinate] for the coordinate system, [HexagonalLayout] for
//! pixel projection, and [HexagonalMap] for the queries.

mod config;
mod hex;
mod layout;
mod map;
mod observer;
mod util;

pub use crate::{
    config::{LayoutConfig, TileRadius},
    hex::*,
    layout::*,
    map::*,
    observer::ObservableSubject,
    util::{
        hexagon_len,
        unit::{PixelPoint, Point2, Vector2},
    },
};
