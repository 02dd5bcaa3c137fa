use crate::{hex::Locatable, CubeCoordinate};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// The kind of ground that covers a tile. Terrains are defined by whatever
/// application is using the map, this crate only cares about how they affect
/// movement and line of sight.
pub trait Terrain {
    /// A stable identifier for this kind of terrain
    fn id(&self) -> &str;

    /// Can tiles of this terrain be entered at all?
    fn is_move_obstacle(&self) -> bool;

    /// Does this terrain block line of sight?
    fn is_view_obstacle(&self) -> bool;

    /// Cost to enter a tile of this terrain. Should be positive; a cost of 0
    /// makes tiles free to cross.
    fn movement_cost(&self) -> u32;
}

// Allow terrains to be shared between many tiles without copying
impl<T: Terrain + ?Sized> Terrain for Rc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn is_move_obstacle(&self) -> bool {
        (**self).is_move_obstacle()
    }

    fn is_view_obstacle(&self) -> bool {
        (**self).is_view_obstacle()
    }

    fn movement_cost(&self) -> u32 {
        (**self).movement_cost()
    }
}

impl<T: Terrain + ?Sized> Terrain for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn is_move_obstacle(&self) -> bool {
        (**self).is_move_obstacle()
    }

    fn is_view_obstacle(&self) -> bool {
        (**self).is_view_obstacle()
    }

    fn movement_cost(&self) -> u32 {
        (**self).movement_cost()
    }
}

/// Something that can look up terrains by ID, e.g. when loading a map from a
/// file.
pub trait TerrainProvider {
    type Terrain: Terrain;

    /// Get the terrain with the given ID. Errors if there is no such terrain.
    fn terrain(&self, id: &str) -> anyhow::Result<Self::Terrain>;
}

/// A single tile on a map: a location, plus whatever is on it. Tiles are
/// immutable, so to change the terrain at a location, replace the whole tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexagonalTile<T> {
    location: CubeCoordinate,
    terrain: T,
}

impl<T> HexagonalTile<T> {
    pub fn new(location: CubeCoordinate, terrain: T) -> Self {
        Self { location, terrain }
    }

    pub fn location(&self) -> CubeCoordinate {
        self.location
    }

    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    pub fn into_terrain(self) -> T {
        self.terrain
    }
}

impl<T: Terrain> HexagonalTile<T> {
    pub fn is_move_obstacle(&self) -> bool {
        self.terrain.is_move_obstacle()
    }

    pub fn is_view_obstacle(&self) -> bool {
        self.terrain.is_view_obstacle()
    }

    pub fn movement_cost(&self) -> u32 {
        self.terrain.movement_cost()
    }
}

impl<T> Locatable for HexagonalTile<T> {
    fn location(&self) -> CubeCoordinate {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Swamp;

    impl Terrain for Swamp {
        fn id(&self) -> &str {
            "swamp"
        }

        fn is_move_obstacle(&self) -> bool {
            false
        }

        fn is_view_obstacle(&self) -> bool {
            true
        }

        fn movement_cost(&self) -> u32 {
            4
        }
    }

    #[test]
    fn test_tile_delegates_to_terrain() {
        let location = CubeCoordinate::new_xy(3, -1);
        let tile = HexagonalTile::new(location, Swamp);
        assert_eq!(HexagonalTile::location(&tile), location);
        assert_eq!(Locatable::location(&tile), location);
        assert_eq!(tile.terrain(), &Swamp);
        assert!(!tile.is_move_obstacle());
        assert!(tile.is_view_obstacle());
        assert_eq!(tile.movement_cost(), 4);

        // Shared terrain behaves the same
        let shared = HexagonalTile::new(location, Rc::new(Swamp));
        assert_eq!(shared.terrain().id(), "swamp");
        assert_eq!(shared.movement_cost(), 4);
        let borrowed = HexagonalTile::new(location, &Swamp);
        assert!(borrowed.is_view_obstacle());
    }
}
