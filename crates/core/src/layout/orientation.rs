use crate::util::unit::Vector2;
use anyhow::anyhow;
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// The two ways hexagons can be tiled. This determines which way tiles are
/// shifted in offset coordinates, as well as all the constants needed to
/// project tiles into pixel space.
///
/// Serializes as its string ID (`"pointy-top"` or `"flat-top"`).
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum HexagonalOrientation {
    /// Tiles have a vertex at the top, and rows are shifted. The six
    /// directions are NE, E, SE, SW, W, NW.
    #[strum(serialize = "pointy-top")]
    PointyTop,
    /// Tiles have an edge at the top, and columns are shifted. The six
    /// directions are NE, SE, S, SW, NW, N.
    #[strum(serialize = "flat-top")]
    FlatTop,
}

impl HexagonalOrientation {
    /// Get the string ID for this orientation
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Look up an orientation by its string ID. Errors if the ID doesn't match
    /// either orientation.
    pub fn from_id(id: &str) -> anyhow::Result<Self> {
        id.parse()
            .map_err(|_| anyhow!("Invalid orientation: {}", id))
    }

    /// Matrix to go from cube (x, y) to pixel space, for tiles of radius 1
    pub fn forward(self) -> Matrix2<f64> {
        match self {
            Self::PointyTop => Matrix2::new(SQRT_3, SQRT_3 / 2.0, 0.0, 1.5),
            Self::FlatTop => Matrix2::new(1.5, 0.0, SQRT_3 / 2.0, SQRT_3),
        }
    }

    /// Inverse of [Self::forward]
    pub fn backward(self) -> Matrix2<f64> {
        match self {
            Self::PointyTop => {
                Matrix2::new(SQRT_3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0)
            }
            Self::FlatTop => {
                Matrix2::new(2.0 / 3.0, 0.0, -1.0 / 3.0, SQRT_3 / 3.0)
            }
        }
    }

    /// The angle of the first corner, in sixths of a full turn
    pub fn start_angle(self) -> f64 {
        match self {
            Self::PointyTop => 0.5,
            Self::FlatTop => 0.0,
        }
    }

    /// Multiply the tile radius by this to get the full width/height of a tile
    pub fn size_multiplier(self) -> Vector2 {
        match self {
            Self::PointyTop => Vector2::new(SQRT_3, 2.0),
            Self::FlatTop => Vector2::new(2.0, SQRT_3),
        }
    }

    /// Multiply the tile size by this to get the distance between the centers
    /// of two tiles when they're packed in a grid. Tiles interlock along the
    /// shifted axis, so they're only 3/4 of a tile apart on that axis.
    /// Flat-top tiles shift columns, so their 3/4 is on x, not y.
    pub fn packed_multiplier(self) -> Vector2 {
        match self {
            Self::PointyTop => Vector2::new(1.0, 0.75),
            Self::FlatTop => Vector2::new(0.75, 1.0),
        }
    }
}

impl Default for HexagonalOrientation {
    fn default() -> Self {
        Self::PointyTop
    }
}

impl TryFrom<String> for HexagonalOrientation {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_id(&value)
    }
}

impl From<HexagonalOrientation> for String {
    fn from(orientation: HexagonalOrientation) -> Self {
        orientation.id().to_owned()
    }
}
