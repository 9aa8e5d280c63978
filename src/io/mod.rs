/// Command-line interface and run driver
pub mod cli;
/// Constants and run configuration
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding, tile sources and export
pub mod image;
/// Logging setup
pub mod logging;
/// Progress bars
pub mod progress;
