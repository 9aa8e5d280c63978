use crate::{
    algorithm::greedy::GreedyMatcher,
    algorithm::leftover::LeftoverResolver,
    analysis::catalog::TileCatalog,
    io::configuration::{FALLBACK_CANDIDATES, MosaicConfig},
    io::error::Result,
    io::image::TileSource,
    io::progress::ProgressManager,
    math::Color,
    render::compositor::Compositor,
    spatial::grid::{CellAssignment, ReferenceGrid},
    spatial::layout::{LayoutPlanner, MosaicPlan},
};
use image::RgbImage;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

/// Seeded random source for every stochastic choice in a run
///
/// Draws happen in a fixed order (cell shuffle first, then one seed per
/// leftover cell) so a seed fully determines the mosaic.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniformly random ordering of `0..len`
    pub fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }

    /// Independent seeds for per-cell generators
    pub fn seeds(&mut self, count: usize) -> Vec<u64> {
        (0..count).map(|_| self.rng.random::<u64>()).collect()
    }
}

/// Products of a finished run
pub struct Mosaic {
    /// Grid and cell geometry
    pub plan: MosaicPlan,
    /// Reference image reduced to one colour per cell
    pub grid: ReferenceGrid,
    /// Tile chosen for every cell
    pub assignment: CellAssignment,
    /// Rendered output
    pub canvas: RgbImage,
}

/// Drives layout, matching, leftover resolution and compositing
pub struct MosaicExecutor<'a> {
    /// Tiles available for placement
    pub catalog: &'a TileCatalog,
    /// Validated run configuration
    pub config: MosaicConfig,
    /// Random number generator for the shuffle and leftover draws
    pub random_selector: RandomSelector,
}

impl<'a> MosaicExecutor<'a> {
    /// Create an executor for one run
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the configuration fails validation
    pub fn new(catalog: &'a TileCatalog, config: MosaicConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            config,
            random_selector: RandomSelector::new(config.seed),
        })
    }

    /// Resolve grid and cell sizes for a reference image of the given size
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the reference image has zero size
    pub fn plan(&self, reference_dimensions: (u32, u32)) -> Result<MosaicPlan> {
        let planner = LayoutPlanner::new(reference_dimensions, self.catalog)?;
        Ok(planner.plan(&self.config))
    }

    /// One-to-one greedy matching over a shuffled cell order
    ///
    /// Returns the partial assignment and the cells left without a tile, in
    /// shuffled order.
    ///
    /// # Errors
    ///
    /// Returns an error if the matcher reports a cell outside the grid
    pub fn match_cells(
        &mut self,
        grid: &ReferenceGrid,
        progress: &ProgressManager,
    ) -> Result<(CellAssignment, Vec<usize>)> {
        let cell_order = self.random_selector.permutation(grid.len());
        let mut matcher = GreedyMatcher::new(&self.catalog.colors(), &grid.colors(), &cell_order);
        let mut assignment = CellAssignment::new(grid.width() as usize, grid.height() as usize);

        let bar = progress.stage("Matching", matcher.total_steps() as u64);
        while let Some((tile, cell)) = matcher.step() {
            assignment.assign(cell, tile)?;
            bar.inc(1);
        }
        bar.finish_and_clear();

        let (unused_tiles, leftover_cells) = matcher.remainder();
        if !unused_tiles.is_empty() {
            warn!(
                unused = unused_tiles.len(),
                cells = grid.len(),
                "more tiles than cells, some tiles will not appear"
            );
        }
        debug!(
            matched = assignment.assigned_count(),
            leftover = leftover_cells.len(),
            "one-to-one matching finished"
        );

        Ok((assignment, leftover_cells))
    }

    /// Give every remaining cell a tile, reusing tiles as needed
    ///
    /// # Errors
    ///
    /// Returns an error if a resolved cell is outside the grid
    pub fn resolve_leftovers(
        &mut self,
        grid: &ReferenceGrid,
        assignment: &mut CellAssignment,
        leftover_cells: &[usize],
        progress: &ProgressManager,
    ) -> Result<()> {
        if leftover_cells.is_empty() {
            return Ok(());
        }

        let seeds = self.random_selector.seeds(leftover_cells.len());
        let colors = grid.colors();
        let cells: Vec<(usize, Color)> = leftover_cells
            .iter()
            .filter_map(|&cell| colors.get(cell).map(|&color| (cell, color)))
            .collect();

        let bar = progress.stage("Leftovers", cells.len() as u64);
        let resolver = LeftoverResolver::new(
            self.catalog.colors(),
            self.config.color_diff,
            FALLBACK_CANDIDATES,
        );
        for (cell, tile) in resolver.resolve_all(&cells, &seeds) {
            assignment.assign(cell, tile)?;
            bar.inc(1);
        }
        bar.finish_and_clear();

        debug!(
            resolved = cells.len(),
            color_diff = self.config.color_diff,
            "leftover cells resolved"
        );
        Ok(())
    }

    /// Complete cell assignment for a reference grid
    ///
    /// # Errors
    ///
    /// Returns an error if either assignment phase fails
    pub fn assign(
        &mut self,
        grid: &ReferenceGrid,
        progress: &ProgressManager,
    ) -> Result<CellAssignment> {
        let (mut assignment, leftover_cells) = self.match_cells(grid, progress)?;
        self.resolve_leftovers(grid, &mut assignment, &leftover_cells, progress)?;
        Ok(assignment)
    }

    /// Plan, assign and render a mosaic of `reference`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reference image has zero size
    /// - Any assignment phase fails
    /// - A tile cannot be decoded while compositing
    pub fn run<S: TileSource + ?Sized>(
        &mut self,
        reference: &RgbImage,
        source: &S,
        progress: &ProgressManager,
    ) -> Result<Mosaic> {
        let plan = self.plan(reference.dimensions())?;
        info!(
            tiles = self.catalog.len(),
            grid_width = plan.grid_width,
            grid_height = plan.grid_height,
            cell_width = plan.cell_width,
            cell_height = plan.cell_height,
            "layout ready"
        );

        let grid = ReferenceGrid::from_image(reference, &plan);
        let assignment = self.assign(&grid, progress)?;

        let bar = progress.stage("Rendering", plan.cell_count() as u64);
        let compositor = Compositor::new(
            plan,
            &grid,
            self.catalog,
            source,
            self.config.color_from_reference,
        );
        let canvas = compositor.compose(&assignment, &bar)?;
        info!(
            width = canvas.width(),
            height = canvas.height(),
            "mosaic rendered"
        );

        Ok(Mosaic {
            plan,
            grid,
            assignment,
            canvas,
        })
    }
}
