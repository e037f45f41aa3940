//! CLI entry point for loading collision layers from map exports

use clap::Parser;
use collidemap::io::cli::{Cli, MapProcessor};

fn main() -> collidemap::Result<()> {
    let cli = Cli::parse();
    let mut processor = MapProcessor::new(cli);
    processor.process()
}
