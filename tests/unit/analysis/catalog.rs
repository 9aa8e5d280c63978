//! Tests for tile descriptors and catalog statistics

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use indicatif::ProgressBar;
    use tilemosaic::analysis::catalog::{TileCatalog, TileDescriptor};
    use tilemosaic::{MosaicError, Result};

    fn descriptor(aspect_ratio: f64, native_height: u32) -> TileDescriptor {
        TileDescriptor {
            index: 99,
            average_color: [0.0, 0.0, 0.0],
            aspect_ratio,
            native_height,
        }
    }

    // Tests average colour covers every pixel
    // Verified by averaging only the first row
    #[test]
    fn test_descriptor_average_color() -> Result<()> {
        let mut image = RgbImage::from_pixel(4, 2, Rgb([0, 0, 0]));
        for x in 0..4 {
            image.put_pixel(x, 1, Rgb([200, 100, 50]));
        }

        let descriptor = TileDescriptor::from_image(3, &image)?;
        assert_eq!(descriptor.index, 3);
        assert_eq!(descriptor.average_color, [100.0, 50.0, 25.0]);
        assert!((descriptor.aspect_ratio - 2.0).abs() < f64::EPSILON);
        assert_eq!(descriptor.native_height, 2);
        Ok(())
    }

    // Tests zero-sized tiles are rejected
    // Verified by dividing by the pixel count unchecked
    #[test]
    fn test_descriptor_rejects_empty_image() {
        let image = RgbImage::new(0, 5);
        assert!(matches!(
            TileDescriptor::from_image(0, &image),
            Err(MosaicError::InvalidSourceData { .. })
        ));
    }

    // Tests descriptors are re-indexed by position
    // Verified by keeping the incoming index
    #[test]
    fn test_from_descriptors_reindexes() -> Result<()> {
        let catalog = TileCatalog::from_descriptors(vec![descriptor(1.0, 10), descriptor(2.0, 20)])?;
        let indices: Vec<usize> = catalog.descriptors().iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        Ok(())
    }

    // Tests an empty catalog is refused
    // Verified by removing the emptiness check
    #[test]
    fn test_empty_catalog_rejected() {
        assert!(TileCatalog::from_descriptors(Vec::new()).is_err());
    }

    // Tests mean statistics and height truncation
    // Verified by rounding the mean height
    #[test]
    fn test_mean_statistics() -> Result<()> {
        let catalog = TileCatalog::from_descriptors(vec![
            descriptor(1.0, 10),
            descriptor(2.0, 11),
            descriptor(0.5, 11),
            descriptor(0.5, 11),
        ])?;
        assert!((catalog.mean_aspect_ratio() - 1.0).abs() < f64::EPSILON);
        // 43 / 4 = 10.75
        assert_eq!(catalog.mean_height(), 10);
        Ok(())
    }

    // Tests lookup reports out-of-range indices
    // Verified by clamping the index
    #[test]
    fn test_get_out_of_range() -> Result<()> {
        let catalog = TileCatalog::from_descriptors(vec![descriptor(1.0, 10)])?;
        assert!(catalog.get(0).is_ok());
        assert!(matches!(
            catalog.get(1),
            Err(MosaicError::InvalidTileIndex {
                index: 1,
                max_tiles: 1
            })
        ));
        Ok(())
    }

    // Tests parallel catalog building preserves tile order
    // Verified by collecting descriptors in completion order
    #[test]
    fn test_from_source_preserves_order() -> Result<()> {
        let tiles: Vec<RgbImage> = (0..32u8)
            .map(|i| RgbImage::from_pixel(u32::from(i) + 1, 4, Rgb([i, i, i])))
            .collect();

        let catalog = TileCatalog::from_source(&tiles, &ProgressBar::hidden())?;
        assert_eq!(catalog.len(), 32);
        for (i, d) in catalog.descriptors().iter().enumerate() {
            assert_eq!(d.index, i);
            assert_eq!(d.average_color, [i as f64; 3]);
            assert_eq!(catalog.colors().get(i), Some(&d.average_color));
        }
        Ok(())
    }
}
