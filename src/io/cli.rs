//! Command-line interface for loading maps and exporting their collision layers

use crate::io::configuration::{DEFAULT_PALETTE, EXPORT_INFIX};
use crate::io::error::Result;
use crate::io::image::export_collision_png;
use crate::io::progress::ProgressManager;
use crate::io::source::DirectorySource;
use crate::spatial::collision::CollisionMap;
use crate::spatial::grid::Cell;
use crate::world::manager::MapManager;
use crate::world::map::World;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "collidemap")]
#[command(
    author,
    version,
    about = "Load collision layers from tile-map editor exports"
)]
/// Command-line arguments for the collision loader
pub struct Cli {
    /// Directory containing the `maps/` folder
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Names of the maps to load, in order (`town` loads `maps/town.json`)
    #[arg(value_name = "MAP", required = true)]
    pub maps: Vec<String>,

    /// Write every collision layer as a PNG into this directory
    #[arg(short, long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Map a tile id to a collision class, e.g. `--class 17=1` (repeatable)
    #[arg(short, long = "class", value_name = "TILE=CLASS", value_parser = parse_class)]
    pub classes: Vec<(Cell, Cell)>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Collision mapping built from the `--class` pairs
    pub fn collision_map(&self) -> CollisionMap {
        CollisionMap::from_classes(self.classes.iter().copied())
    }
}

/// Parse a `TILE=CLASS` pair
///
/// # Errors
///
/// Returns a description of the problem if the pair is not two integers
/// separated by `=`
pub fn parse_class(pair: &str) -> std::result::Result<(Cell, Cell), String> {
    let (tile, class) = pair
        .split_once('=')
        .ok_or_else(|| format!("expected TILE=CLASS, found '{pair}'"))?;
    let tile = tile
        .trim()
        .parse::<Cell>()
        .map_err(|e| format!("invalid tile id '{tile}': {e}"))?;
    let class = class
        .trim()
        .parse::<Cell>()
        .map_err(|e| format!("invalid collision class '{class}': {e}"))?;
    Ok((tile, class))
}

/// File an exported collision layer is written to
pub fn export_path(directory: &Path, map: &str, index: u32) -> PathBuf {
    // Nested map names become flat file names
    let stem = map.replace(['/', '\\'], "_");
    directory.join(format!("{stem}{EXPORT_INFIX}{index}.png"))
}

/// One summary line per collision layer of each world
pub fn summary_lines(worlds: &[World]) -> Vec<String> {
    let mut lines = Vec::new();
    for world in worlds {
        if world.is_empty() {
            lines.push(format!("{}: no collision layers", world.name()));
            continue;
        }
        for layer in world.layers() {
            let grid = layer.collisions();
            let [x, y] = grid.origin();
            lines.push(format!(
                "{}: layer {} at ({x}, {y}), {}x{} cells, {} solid",
                world.name(),
                layer.index(),
                grid.columns(),
                grid.rows(),
                grid.count_nonzero()
            ));
        }
    }
    lines
}

/// Orchestrates sequential map loading with progress tracking
pub struct MapProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MapProcessor {
    /// Create a new map processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Load the requested maps, print a summary and export if requested
    ///
    /// # Errors
    ///
    /// Returns the first map load error, or an export error
    pub fn process(&mut self) -> Result<()> {
        let source = DirectorySource::new(&self.cli.root);
        let mut manager = MapManager::with_mapping(source, self.cli.collision_map());

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.maps.len());
        }

        let loaded = self.load_all(&mut manager);

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        loaded?;

        Self::report(manager.worlds());

        if let Some(ref directory) = self.cli.export {
            Self::export(manager.worlds(), directory)?;
        }

        Ok(())
    }

    fn load_all(&mut self, manager: &mut MapManager<DirectorySource>) -> Result<()> {
        for (index, name) in self.cli.maps.iter().enumerate() {
            let start_time = Instant::now();

            if let Some(ref mut pm) = self.progress_manager {
                pm.start_map(index, name);
            }

            let position = manager.load_map(name)?;

            if let Some(ref mut pm) = self.progress_manager {
                let layers = manager.world(position).map_or(0, World::layer_count);
                pm.complete_map(index, layers, start_time.elapsed());
            }
        }
        Ok(())
    }

    // Allow print for the loaded layer summary, the tool's primary output
    #[allow(clippy::print_stdout)]
    fn report(worlds: &[World]) {
        for line in summary_lines(worlds) {
            println!("{line}");
        }
    }

    fn export(worlds: &[World], directory: &Path) -> Result<()> {
        for world in worlds {
            for layer in world.layers() {
                let path = export_path(directory, world.name(), layer.index());
                export_collision_png(layer.collisions(), &DEFAULT_PALETTE, &path)?;
            }
        }
        Ok(())
    }
}
