//! This module holds basic types and data structures related to hexagon grids.
//!
//! ## Coordinate Systems
//!
//! There are two coordinate systems for addressing tiles, plus one for
//! projecting them onto a screen.
//!
//! ### Cube Coordinates
//!
//! Cube coordinates are the primary system. It's the [cube coordinate
//! system defined by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube).
//! Each coordinate has three integer components (`x`, `y`, and `z`), and
//! **for every coordinate, `x + y + z = 0`.** Even though hexagon tiles are
//! laid out in two dimensions, using three makes the math for distances,
//! neighbors, rings and lines much simpler. All of the spatial algorithms work
//! in this system. See [CubeCoordinate].
//!
//! ### Offset Coordinates
//!
//! Offset coordinates are the familiar row/column addressing that most people
//! expect from a grid. Every other row (for pointy-top tiles) or column (for
//! flat-top tiles) is shoved over by half a tile. Which ones get shoved
//! depends on the parity (odd or even), so an offset coordinate is only
//! meaningful alongside its [OffsetCoordinateType]. These are convenient for
//! storage and display, but terrible for math, so convert to cube coordinates
//! before doing anything interesting. See [OffsetCoordinate].
//!
//! ### Pixel Coordinates
//!
//! Pixel coordinates are only used for rendering and input. Converting between
//! cube and pixel space requires a [HexagonalLayout](crate::HexagonalLayout),
//! which knows the tile orientation, size, and the pixel origin.

mod cube;
mod data_structure;
mod offset;

pub use self::{cube::*, data_structure::*, offset::*};
