use anyhow::{anyhow, Context};
use config::{Config, File};
use hexmap::{
    HexagonalLayout, HexagonalMap, LayoutConfig, Terrain, TerrainProvider,
};
use log::{debug, info};
use serde::Deserialize;
use std::{collections::HashMap, path::Path, rc::Rc};
use validator::Validate;

/// A map definition, as loaded from a JSON or TOML file
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct MapFile {
    #[serde(default)]
    #[validate]
    pub layout: LayoutConfig,

    /// Shift odd rows/columns (true) or even ones (false)
    #[serde(default = "default_odd_offset")]
    pub odd_offset: bool,

    /// Every terrain that can appear in `rows`
    #[validate]
    pub terrains: Vec<TerrainDefinition>,

    /// One string per offset row, starting at row 0. Each string is a
    /// whitespace-separated list of terrain IDs, starting at column 0.
    pub rows: Vec<String>,
}

fn default_odd_offset() -> bool {
    true
}

/// A terrain type defined in a map file
#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
pub struct TerrainDefinition {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub move_obstacle: bool,
    #[serde(default)]
    pub view_obstacle: bool,
    #[validate(range(min = 1))]
    pub movement_cost: u32,
}

impl Terrain for TerrainDefinition {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_move_obstacle(&self) -> bool {
        self.move_obstacle
    }

    fn is_view_obstacle(&self) -> bool {
        self.view_obstacle
    }

    fn movement_cost(&self) -> u32 {
        self.movement_cost
    }
}

/// Terrain definitions keyed by ID. Each definition is shared between all the
/// tiles that use it.
#[derive(Debug, Default)]
pub struct TerrainTable {
    terrains: HashMap<String, Rc<TerrainDefinition>>,
}

impl TerrainTable {
    pub fn new(
        definitions: impl IntoIterator<Item = TerrainDefinition>,
    ) -> anyhow::Result<Self> {
        let mut terrains = HashMap::new();
        for definition in definitions {
            let id = definition.id.clone();
            if terrains.insert(id.clone(), Rc::new(definition)).is_some() {
                return Err(anyhow!("Duplicate terrain ID: {}", id));
            }
        }
        Ok(Self { terrains })
    }
}

impl TerrainProvider for TerrainTable {
    type Terrain = Rc<TerrainDefinition>;

    fn terrain(&self, id: &str) -> anyhow::Result<Self::Terrain> {
        self.terrains
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown terrain ID: {}", id))
    }
}

pub type FileMap = HexagonalMap<Rc<TerrainDefinition>>;

/// Read a map file from disk. Supported formats: JSON, TOML
pub fn load_map_file(path: &Path) -> anyhow::Result<MapFile> {
    let mut settings = Config::new();
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow!("invalid character in path {:?}", path))?;
    settings
        .merge(File::with_name(path_str))
        .context("error reading map file")?;
    let map_file: MapFile =
        settings.try_into().context("error reading map definition")?;
    map_file.validate().context("invalid map definition")?;
    Ok(map_file)
}

/// Build a map from its definition. Every terrain ID in the rows has to be
/// defined in the terrain list.
pub fn build_map(map_file: MapFile) -> anyhow::Result<FileMap> {
    let layout = HexagonalLayout::from_config(map_file.layout)
        .context("invalid layout")?;
    let table = TerrainTable::new(map_file.terrains)?;
    debug!("Loaded {} terrain definition(s)", table.terrains.len());

    let rows = map_file
        .rows
        .iter()
        .enumerate()
        .map(|(row, line)| {
            line.split_whitespace()
                .enumerate()
                .map(|(column, id)| {
                    table.terrain(id).with_context(|| {
                        format!("at row {}, column {}", row, column)
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let map = HexagonalMap::from_offset_rows(layout, map_file.odd_offset, rows);
    info!(
        "Built {} map: {} tiles, {}x{}",
        map.offset_type(),
        map.tile_count(),
        map.width(),
        map.height()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: &str, cost: u32) -> TerrainDefinition {
        TerrainDefinition {
            id: id.into(),
            move_obstacle: false,
            view_obstacle: false,
            movement_cost: cost,
        }
    }

    fn map_file(rows: &[&str]) -> MapFile {
        MapFile {
            layout: LayoutConfig::default(),
            odd_offset: true,
            terrains: vec![definition("grass", 1), definition("hill", 2)],
            rows: rows.iter().map(|row| row.to_string()).collect(),
        }
    }

    #[test]
    fn test_terrain_table() {
        let table =
            TerrainTable::new(vec![definition("grass", 1), definition("hill", 2)])
                .unwrap();
        assert_eq!(table.terrain("hill").unwrap().movement_cost(), 2);
        let err = table.terrain("lava").unwrap_err();
        assert_eq!(err.to_string(), "Unknown terrain ID: lava");

        assert!(TerrainTable::new(vec![
            definition("grass", 1),
            definition("grass", 2)
        ])
        .is_err());
    }

    #[test]
    fn test_build_map() {
        let map = build_map(map_file(&["grass hill grass", "hill  grass"])).unwrap();
        assert_eq!(map.tile_count(), 5);
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        let terrain = map.get_terrain(map.offset_location(1, 1)).unwrap();
        assert_eq!(terrain.id(), "grass");
        // Tiles share their terrain definition
        let a = map.get_terrain(map.offset_location(0, 0)).unwrap();
        let b = map.get_terrain(map.offset_location(2, 0)).unwrap();
        assert!(Rc::ptr_eq(a, b));
    }

    #[test]
    fn test_build_map_unknown_terrain() {
        let err = build_map(map_file(&["grass grass", "grass lava"])).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("row 1, column 1"), "{}", message);
        assert!(message.contains("Unknown terrain ID: lava"), "{}", message);
    }

    #[test]
    fn test_validation() {
        let mut file = map_file(&["grass"]);
        file.terrains[0].movement_cost = 0;
        assert!(file.validate().is_err());
    }
}
