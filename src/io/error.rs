//! Error types for mosaic construction and its file-system boundary

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Tile directory or reference image path does not resolve
    SourceNotFound {
        /// Path that could not be found
        path: PathBuf,
    },

    /// A file could not be decoded as an image
    UnsupportedImage {
        /// Path to the offending file
        path: PathBuf,
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// A user-supplied size or threshold failed validation
    InvalidConfiguration {
        /// Option name, e.g. `grid_width`
        parameter: &'static str,
        /// Value as given
        value: String,
        /// What the option requires
        reason: String,
    },

    /// Inputs are well-formed but cannot produce a mosaic
    ///
    /// Covers an empty tile directory and zero-sized images.
    InvalidSourceData {
        /// Which input is unusable and why
        reason: String,
    },

    /// Tile index exceeds the catalog
    InvalidTileIndex {
        /// Requested tile
        index: usize,
        /// Number of tiles available
        max_tiles: usize,
    },

    /// A cell reached the compositor without a tile
    UnassignedCell {
        /// Cell column
        x: usize,
        /// Cell row
        y: usize,
    },

    /// Failed to save the finished mosaic to disk
    ImageExport {
        /// Output path
        path: PathBuf,
        /// Encoder or write error
        source: image::ImageError,
    },

    /// Listing a directory or creating one failed
    FileSystem {
        /// Directory involved
        path: PathBuf,
        /// Short verb phrase, e.g. `list directory`
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound { path } => {
                write!(f, "Path '{}' not found", path.display())
            }
            Self::UnsupportedImage { path, source } => {
                write!(f, "'{}' is not a supported image: {source}", path.display())
            }
            Self::InvalidConfiguration {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (tiles: {max_tiles})")
            }
            Self::UnassignedCell { x, y } => {
                write!(f, "Cell ({x}, {y}) has no tile assigned")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedImage { source, .. } | Self::ImageExport { source, .. } => {
                Some(source)
            }
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::UnsupportedImage {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid configuration error
pub fn invalid_configuration(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
