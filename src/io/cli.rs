//! Command-line interface for building a mosaic from a tile directory

use crate::algorithm::executor::MosaicExecutor;
use crate::analysis::catalog::TileCatalog;
use crate::io::configuration::{
    DEFAULT_COLOR_DIFF, DEFAULT_SEED, MosaicConfig, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
    SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, invalid_configuration};
use crate::io::image::{TileDirectory, export_canvas, load_image};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tilemosaic")]
#[command(
    author,
    version,
    about = "Rebuild an image out of many smaller images",
    after_help = "Giving one of --grid-width/--grid-height and one of --cell-width/--cell-height \
                  fixes the output size while the remaining sizes follow the reference image and \
                  the average tile shape."
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Image that is rebuilt out of the tiles
    #[arg(short, long, visible_alias = "ref-img", value_name = "IMAGE")]
    pub reference: PathBuf,

    /// Directory holding the tile images (every file must be an image)
    #[arg(short = 'p', long, visible_alias = "img-path", value_name = "DIR")]
    pub tiles: PathBuf,

    /// Output image; defaults to `<reference>_mosaic.png` next to the reference
    #[arg(short, long, visible_alias = "out", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of tiles across the output
    #[arg(long, visible_alias = "out-width", value_parser = clap::value_parser!(u32).range(1..))]
    pub grid_width: Option<u32>,

    /// Number of tiles down the output
    #[arg(long, visible_alias = "out-height", value_parser = clap::value_parser!(u32).range(1..))]
    pub grid_height: Option<u32>,

    /// Pixel width of one tile in the output
    #[arg(long, visible_alias = "mini-width", value_parser = clap::value_parser!(u32).range(1..))]
    pub cell_width: Option<u32>,

    /// Pixel height of one tile in the output
    #[arg(long, visible_alias = "mini-height", value_parser = clap::value_parser!(u32).range(1..))]
    pub cell_height: Option<u32>,

    /// Pad tiles with the reference colour instead of their own average colour
    #[arg(long)]
    pub ref_background: bool,

    /// Largest colour distance allowed when filling cells with reused tiles
    #[arg(long, default_value_t = DEFAULT_COLOR_DIFF, value_name = "DISTANCE")]
    pub color_diff: f64,

    /// Random seed for reproducible mosaics
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log detail (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Mosaic configuration described by the arguments
    pub const fn config(&self) -> MosaicConfig {
        MosaicConfig {
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            color_from_reference: self.ref_background,
            color_diff: self.color_diff,
            seed: self.seed,
        }
    }

    /// Where the mosaic will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Self::default_output_path(&self.reference))
    }

    fn default_output_path(reference: &Path) -> PathBuf {
        let stem = reference.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            OUTPUT_EXTENSION
        );

        if let Some(parent) = reference.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Runs one mosaic job end to end
pub struct MosaicProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl MosaicProcessor {
    /// Create a processor for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Validate, build and write the mosaic
    ///
    /// Nothing is written unless every step succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A size or threshold is invalid, or the output extension is unsupported
    /// - The tile directory or reference image cannot be found or decoded
    /// - The mosaic cannot be written
    pub fn process(&mut self) -> Result<PathBuf> {
        let start_time = Instant::now();
        let config = self.cli.config();
        config.validate()?;

        let output_path = self.cli.output_path();
        Self::check_output_extension(&output_path)?;

        let tiles = TileDirectory::open(&self.cli.tiles)?;
        info!(
            directory = %tiles.root().display(),
            tiles = tiles.paths().len(),
            "tile directory listed"
        );

        let bar = self
            .progress_manager
            .stage("Catalog", tiles.paths().len() as u64);
        let catalog = TileCatalog::from_source(&tiles, &bar)?;
        let reference = load_image(&self.cli.reference)?;

        let mut executor = MosaicExecutor::new(&catalog, config)?;
        let mosaic = executor.run(&reference, &tiles, &self.progress_manager)?;
        self.progress_manager.finish();

        export_canvas(&mosaic.canvas, &output_path)?;
        info!(
            output = %output_path.display(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "mosaic written"
        );

        Ok(output_path)
    }

    fn check_output_extension(output_path: &Path) -> Result<()> {
        let extension = output_path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            Ok(())
        } else {
            Err(invalid_configuration(
                "output",
                &output_path.display(),
                &format!("extension must be one of {}", SUPPORTED_EXTENSIONS.join(", ")),
            ))
        }
    }
}
