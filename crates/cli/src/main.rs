mod map_file;

use crate::map_file::{build_map, load_map_file, FileMap};
use anyhow::bail;
use hexmap::{timed, CubeCoordinate, MapEdge, MapEdges, PixelPoint};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{path::PathBuf, process};
use structopt::StructOpt;
use strum::IntoEnumIterator;

/// CLI for querying hex maps via the Hexmap toolkit.
#[derive(Debug, StructOpt)]
#[structopt(name = "hexmap")]
struct Opt {
    /// Path to a file that defines the map: layout, terrain types, and one
    /// line of terrain IDs per row. Supported formats: JSON, TOML
    #[structopt(short, long)]
    map: PathBuf,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    command: Command,
}

/// A tile position, in the map's offset coordinates
#[derive(Copy, Clone, Debug, StructOpt)]
struct OffsetArgs {
    /// Offset column
    #[structopt(long, allow_hyphen_values = true)]
    col: i32,

    /// Offset row
    #[structopt(long, allow_hyphen_values = true)]
    row: i32,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// List every tile that can be reached from a tile without spending
    /// more than the given movement
    Reachable {
        #[structopt(flatten)]
        source: OffsetArgs,
        #[structopt(long)]
        range: u32,
    },
    /// List every tile in line of sight of a tile, within the given distance
    Visible {
        #[structopt(flatten)]
        source: OffsetArgs,
        #[structopt(long)]
        range: u32,
    },
    /// Print the pixel center and corners of a tile
    Pixel {
        #[structopt(flatten)]
        location: OffsetArgs,
    },
    /// Find the tile that contains a pixel
    Hex {
        #[structopt(long, allow_hyphen_values = true)]
        x: i32,
        #[structopt(long, allow_hyphen_values = true)]
        y: i32,
    },
    /// Print the map's extent and the tiles along each of its edges
    Edges,
}

/// Resolve an offset position to a tile that exists on the map
fn map_location(map: &FileMap, args: OffsetArgs) -> anyhow::Result<CubeCoordinate> {
    let location = map.offset_location(args.col, args.row);
    if !map.is_valid_location(location) {
        bail!("no tile at [{}, {}]", args.col, args.row);
    }
    Ok(location)
}

fn format_location(map: &FileMap, location: CubeCoordinate) -> String {
    format!("{} {}", map.to_offset(location), location)
}

fn print_locations(map: &FileMap, locations: &[CubeCoordinate]) {
    for location in locations {
        println!("{}", format_location(map, *location));
    }
}

fn print_edges(map: &FileMap, label: &str, edges: &MapEdges) {
    for edge in MapEdge::iter() {
        let tiles: Vec<String> = edges
            .get(edge)
            .iter()
            .map(|location| map.to_offset(*location).to_string())
            .collect();
        println!("{} {}: {}", label, edge, tiles.join(" "));
    }
}

/// Run a single query against the map and print the results to stdout
fn run_command(map: &FileMap, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Reachable { source, range } => {
            let source = map_location(map, source)?;
            let locations = timed!(
                "Reachability search",
                log::Level::Info,
                map.get_reachable_locations(source, range)
            );
            info!("{} tile(s) reachable from {}", locations.len(), source);
            print_locations(map, &locations);
        }
        Command::Visible { source, range } => {
            let source = map_location(map, source)?;
            let locations = timed!(
                "Visibility search",
                log::Level::Info,
                map.get_visible_locations(source, range)
            );
            info!("{} tile(s) visible from {}", locations.len(), source);
            print_locations(map, &locations);
        }
        Command::Pixel { location } => {
            // Pixels are well-defined for any coordinate, not just tiles
            let location = map.offset_location(location.col, location.row);
            println!("center: {}", map.layout().to_point(location));
            for (i, corner) in map.polygon_corners(location).iter().enumerate() {
                println!("corner {}: {}", i, corner);
            }
        }
        Command::Hex { x, y } => {
            let location = map.to_hex(PixelPoint::new(x, y));
            let suffix = if map.is_valid_location(location) {
                ""
            } else {
                " (not on map)"
            };
            println!("{}{}", format_location(map, location), suffix);
        }
        Command::Edges => {
            match map.offset_bounds() {
                Some(bounds) => println!(
                    "columns {}..={}, rows {}..={} ({}x{}, aspect ratio {:.3})",
                    bounds.min_x,
                    bounds.max_x,
                    bounds.min_y,
                    bounds.max_y,
                    bounds.width(),
                    bounds.height(),
                    map.aspect_ratio()
                ),
                None => println!("empty map"),
            }
            print_edges(map, "edge", map.edges());
            print_edges(map, "movable edge", map.movable_edges());
        }
    }
    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let map_file = load_map_file(&opt.map)?;
    let map = timed!("Map loading", log::Level::Info, build_map(map_file)?);
    info!("Loaded map from {:?}", &opt.map);

    run_command(&map, opt.command)
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
