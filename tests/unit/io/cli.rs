//! Tests for argument parsing and the end-to-end processor

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tilemosaic::io::cli::{Cli, MosaicProcessor};
    use tilemosaic::io::image::load_image;
    use tilemosaic::{MosaicError, Result};

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("tilemosaic").chain(args.iter().copied()))
    }

    fn setup(dir: &TempDir) -> Result<(PathBuf, PathBuf)> {
        let tiles = dir.path().join("tiles");
        std::fs::create_dir(&tiles)?;
        let colors = [[250, 10, 10], [10, 250, 10], [10, 10, 250], [240, 240, 240]];
        for (i, color) in colors.iter().enumerate() {
            RgbImage::from_pixel(8, 6, Rgb(*color)).save(tiles.join(format!("tile{i}.png")))?;
        }

        let reference = dir.path().join("photo.png");
        RgbImage::from_fn(40, 30, |x, y| {
            if x < 20 {
                Rgb([250, 10, 10])
            } else if y < 15 {
                Rgb([10, 250, 10])
            } else {
                Rgb([10, 10, 250])
            }
        })
        .save(&reference)?;

        Ok((reference, tiles))
    }

    // Tests long names map onto the configuration
    // Verified by dropping the ref-background flag from the config
    #[test]
    fn test_parse_long_names() -> std::result::Result<(), clap::Error> {
        let cli = parse(&[
            "--reference",
            "ref.jpg",
            "--tiles",
            "tiles",
            "--grid-width",
            "12",
            "--cell-height",
            "9",
            "--ref-background",
            "--color-diff",
            "12.5",
            "--seed",
            "7",
        ])?;
        let config = cli.config();
        assert_eq!(config.grid_width, Some(12));
        assert_eq!(config.grid_height, None);
        assert_eq!(config.cell_height, Some(9));
        assert!(config.color_from_reference);
        assert!((config.color_diff - 12.5).abs() < f64::EPSILON);
        assert_eq!(config.seed, 7);
        assert!(cli.should_show_progress());
        Ok(())
    }

    // Tests the legacy option names are accepted
    // Verified by removing the visible aliases
    #[test]
    fn test_parse_aliases() -> std::result::Result<(), clap::Error> {
        let cli = parse(&[
            "--ref-img",
            "a.png",
            "--img-path",
            "tiles",
            "--out-width",
            "3",
            "--out-height",
            "4",
            "--mini-width",
            "5",
            "--mini-height",
            "6",
            "--out",
            "x.png",
            "-q",
        ])?;
        let config = cli.config();
        assert_eq!(
            (config.grid_width, config.grid_height, config.cell_width, config.cell_height),
            (Some(3), Some(4), Some(5), Some(6))
        );
        assert_eq!(cli.output_path(), PathBuf::from("x.png"));
        assert!(!cli.should_show_progress());
        Ok(())
    }

    // Tests zero sizes are refused at parse time
    // Verified by accepting the full u32 range
    #[test]
    fn test_parse_rejects_zero() {
        assert!(parse(&["-r", "a.png", "-p", "t", "--grid-width", "0"]).is_err());
        assert!(parse(&["-r", "a.png", "-p", "t", "--cell-height", "0"]).is_err());
        assert!(parse(&["-r", "a.png"]).is_err());
    }

    // Tests the default output sits next to the reference
    // Verified by writing to the working directory
    #[test]
    fn test_default_output_path() -> std::result::Result<(), clap::Error> {
        let cli = parse(&["-r", "pics/holiday.jpg", "-p", "tiles", "-vv"])?;
        assert_eq!(cli.output_path(), PathBuf::from("pics/holiday_mosaic.png"));
        assert_eq!(cli.verbose, 2);
        Ok(())
    }

    // Tests a full run writes an image of grid * cell pixels
    // Verified by exporting the reduced reference grid instead
    #[test]
    fn test_process_end_to_end() -> Result<()> {
        let dir = TempDir::new()?;
        let (reference, tiles) = setup(&dir)?;
        let output = dir.path().join("out/mosaic.png");

        let cli = Cli {
            reference,
            tiles,
            output: Some(output.clone()),
            grid_width: Some(4),
            grid_height: Some(3),
            cell_width: Some(8),
            cell_height: Some(6),
            ref_background: false,
            color_diff: 30.0,
            seed: 42,
            quiet: true,
            verbose: 0,
        };
        let written = MosaicProcessor::new(cli).process()?;
        assert_eq!(written, output);

        let mosaic = load_image(&output)?;
        assert_eq!(mosaic.dimensions(), (32, 18));
        // Left half of the reference is red, so the red tile lands there
        assert_eq!(mosaic.get_pixel_checked(0, 0), Some(&Rgb([250, 10, 10])));
        Ok(())
    }

    // Tests a non-image in the tile directory aborts without output
    // Verified by skipping undecodable tiles
    #[test]
    fn test_process_rejects_non_image_tile() -> Result<()> {
        let dir = TempDir::new()?;
        let (reference, tiles) = setup(&dir)?;
        std::fs::write(tiles.join("readme.txt"), "tiles go here")?;
        let output = dir.path().join("mosaic.png");

        let cli = Cli::try_parse_from([
            "tilemosaic",
            "-q",
            "-r",
            &reference.to_string_lossy(),
            "-p",
            &tiles.to_string_lossy(),
            "-o",
            &output.to_string_lossy(),
        ])
        .map_err(|e| std::io::Error::other(e.to_string()))?;
        let result = MosaicProcessor::new(cli).process();
        assert!(matches!(result, Err(MosaicError::UnsupportedImage { .. })));
        assert!(!output.exists());
        Ok(())
    }

    // Tests an unsupported output extension fails before any work
    // Verified by letting the encoder pick from the extension
    #[test]
    fn test_process_rejects_output_extension() -> Result<()> {
        let dir = TempDir::new()?;
        let (reference, tiles) = setup(&dir)?;

        let cli = Cli {
            reference,
            tiles,
            output: Some(dir.path().join("mosaic.bmp")),
            grid_width: None,
            grid_height: None,
            cell_width: None,
            cell_height: None,
            ref_background: false,
            color_diff: 30.0,
            seed: 42,
            quiet: true,
            verbose: 0,
        };
        let result = MosaicProcessor::new(cli).process();
        assert!(matches!(
            result,
            Err(MosaicError::InvalidConfiguration {
                parameter: "output",
                ..
            })
        ));
        Ok(())
    }
}
