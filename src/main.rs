//! CLI entry point for the photomosaic builder

use clap::Parser;
use tilemosaic::io::cli::{Cli, MosaicProcessor};
use tilemosaic::io::logging::init_logging;

fn main() -> tilemosaic::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut processor = MosaicProcessor::new(cli);
    processor.process()?;
    Ok(())
}
