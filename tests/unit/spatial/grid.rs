//! Tests for the reference grid and cell assignment

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use tilemosaic::spatial::grid::{CellAssignment, ReferenceGrid, cell_position};
    use tilemosaic::spatial::layout::MosaicPlan;
    use tilemosaic::{MosaicError, Result};

    fn plan(grid_width: u32, grid_height: u32) -> MosaicPlan {
        MosaicPlan {
            grid_width,
            grid_height,
            cell_width: 4,
            cell_height: 4,
        }
    }

    // Tests row-major numbering
    // Verified by swapping the division and remainder
    #[test]
    fn test_cell_position() {
        assert_eq!(cell_position(0, 3), (0, 0));
        assert_eq!(cell_position(2, 3), (2, 0));
        assert_eq!(cell_position(3, 3), (0, 1));
        assert_eq!(cell_position(7, 3), (1, 2));
    }

    // Tests downscaling a quadrant image keeps one colour per quadrant
    // Verified by sampling with nearest neighbour from the wrong corner
    #[test]
    fn test_from_image_quadrants() {
        let colors = [
            Rgb([255, 0, 0]),
            Rgb([0, 255, 0]),
            Rgb([0, 0, 255]),
            Rgb([255, 255, 0]),
        ];
        let reference = RgbImage::from_fn(20, 20, |x, y| {
            let quadrant = usize::from(y >= 10) * 2 + usize::from(x >= 10);
            colors.get(quadrant).copied().unwrap_or(Rgb([0, 0, 0]))
        });

        let grid = ReferenceGrid::from_image(&reference, &plan(2, 2));
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.pixel(0, 0), colors.first().copied());
        assert_eq!(grid.pixel(1, 0), colors.get(1).copied());
        assert_eq!(grid.pixel(0, 1), colors.get(2).copied());
        assert_eq!(grid.pixel(1, 1), colors.get(3).copied());
    }

    // Tests a uniform reference gives uniform cells at any grid size
    // Verified by leaving some cells black
    #[test]
    fn test_from_image_uniform() {
        let reference = RgbImage::from_pixel(35, 12, Rgb([90, 60, 30]));
        let grid = ReferenceGrid::from_image(&reference, &plan(5, 3));
        assert_eq!((grid.width(), grid.height()), (5, 3));
        assert!(grid.colors().iter().all(|&c| c == [90.0, 60.0, 30.0]));
    }

    // Tests mismatched pixel counts are refused
    // Verified by accepting any pixel vector
    #[test]
    fn test_from_pixels_length_check() {
        let result = ReferenceGrid::from_pixels(2, 2, vec![Rgb([0, 0, 0]); 3]);
        assert!(matches!(result, Err(MosaicError::InvalidSourceData { .. })));
    }

    // Tests lookups outside the grid return None rather than wrapping
    // Verified by indexing the flat vector without a column check
    #[test]
    fn test_pixel_out_of_bounds() -> Result<()> {
        let grid = ReferenceGrid::from_pixels(2, 1, vec![Rgb([1, 1, 1]), Rgb([2, 2, 2])])?;
        assert_eq!(grid.pixel(1, 0), Some(Rgb([2, 2, 2])));
        assert_eq!(grid.pixel(2, 0), None);
        assert_eq!(grid.pixel(0, 1), None);
        Ok(())
    }

    // Tests assignment bookkeeping through a partial then complete fill
    // Verified by counting overwritten cells twice
    #[test]
    fn test_assignment_fill() -> Result<()> {
        let mut assignment = CellAssignment::new(3, 2);
        assert_eq!(assignment.cell_count(), 6);
        assert_eq!((assignment.width(), assignment.height()), (3, 2));

        assignment.assign(4, 9)?;
        assignment.assign(0, 1)?;
        assert_eq!(assignment.get(1, 1), Some(9));
        assert_eq!(assignment.get(0, 0), Some(1));
        assert_eq!(assignment.assigned_count(), 2);
        assert_eq!(assignment.unassigned_cells(), vec![1, 2, 3, 5]);
        assert!(!assignment.is_complete());

        for cell in [1, 2, 3, 5] {
            assignment.assign(cell, cell)?;
        }
        assignment.assign(0, 7)?;
        assert_eq!(assignment.assigned_count(), 6);
        assert!(assignment.is_complete());
        assert_eq!(assignment.to_complete_vec()?, vec![7, 1, 2, 3, 9, 5]);
        Ok(())
    }

    // Tests the first empty cell is reported with its coordinates
    // Verified by reporting the flat index instead
    #[test]
    fn test_incomplete_assignment_error() -> Result<()> {
        let mut assignment = CellAssignment::new(2, 2);
        assignment.assign(0, 0)?;
        assignment.assign(1, 0)?;
        assert!(matches!(
            assignment.to_complete_vec(),
            Err(MosaicError::UnassignedCell { x: 0, y: 1 })
        ));
        Ok(())
    }

    // Tests cells past the end are rejected
    // Verified by silently ignoring the write
    #[test]
    fn test_assign_outside_grid() {
        let mut assignment = CellAssignment::new(2, 2);
        assert!(assignment.assign(4, 0).is_err());
        assert_eq!(assignment.assigned_count(), 0);
    }
}
