//! Image decoding, tile directory listing and mosaic export

use crate::io::error::{MosaicError, Result, invalid_source};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Random-access provider of decoded tile images
///
/// Tiles are addressed by a stable index in `0..tile_count()`. Implementors
/// must be shareable across threads so catalog building and compositing can
/// decode tiles in parallel.
pub trait TileSource: Sync {
    /// Number of tiles available
    fn tile_count(&self) -> usize;

    /// Decode the tile at `index`
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or decoding fails
    fn load_tile(&self, index: usize) -> Result<RgbImage>;
}

impl TileSource for [RgbImage] {
    fn tile_count(&self) -> usize {
        self.len()
    }

    fn load_tile(&self, index: usize) -> Result<RgbImage> {
        self.get(index)
            .cloned()
            .ok_or(MosaicError::InvalidTileIndex {
                index,
                max_tiles: self.len(),
            })
    }
}

impl TileSource for Vec<RgbImage> {
    fn tile_count(&self) -> usize {
        self.as_slice().tile_count()
    }

    fn load_tile(&self, index: usize) -> Result<RgbImage> {
        self.as_slice().load_tile(index)
    }
}

/// Tiles read from a directory, decoded again every time they are requested
///
/// Every regular, non-hidden file directly inside the directory is a tile.
/// Files are ordered by name so indices are stable between runs.
#[derive(Clone, Debug)]
pub struct TileDirectory {
    root: PathBuf,
    paths: Vec<PathBuf>,
}

impl TileDirectory {
    /// List the tiles of a directory without decoding them
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist or is not a directory
    /// - The directory cannot be read
    /// - The directory holds no files
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(MosaicError::SourceNotFound { path: root });
        }

        let entries = std::fs::read_dir(&root).map_err(|e| MosaicError::FileSystem {
            path: root.clone(),
            operation: "list directory",
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| MosaicError::FileSystem {
                    path: root.clone(),
                    operation: "list directory",
                    source: e,
                })?
                .path();
            let hidden = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with('.'));
            if path.is_file() && !hidden {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(invalid_source(&format!(
                "tile directory '{}' contains no files",
                root.display()
            )));
        }

        Ok(Self { root, paths })
    }

    /// Directory the tiles were listed from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Tile file paths in index order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl TileSource for TileDirectory {
    fn tile_count(&self) -> usize {
        self.paths.len()
    }

    fn load_tile(&self, index: usize) -> Result<RgbImage> {
        let path = self.paths.get(index).ok_or(MosaicError::InvalidTileIndex {
            index,
            max_tiles: self.paths.len(),
        })?;
        load_image(path)
    }
}

/// Decode an image file into 8-bit RGB
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist (`SourceNotFound`)
/// - The file cannot be decoded as an image (`UnsupportedImage`)
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path_buf = path.as_ref().to_path_buf();
    if !path_buf.is_file() {
        return Err(MosaicError::SourceNotFound { path: path_buf });
    }

    let img = image::open(&path_buf).map_err(|e| MosaicError::UnsupportedImage {
        path: path_buf,
        source: e,
    })?;

    Ok(img.to_rgb8())
}

/// Write the finished canvas, creating parent directories as needed
///
/// The encoding is chosen from the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved to the specified path
pub fn export_canvas<P: AsRef<Path>>(canvas: &RgbImage, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
