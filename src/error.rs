//! Error types for the background generator

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a background
///
/// Every error is terminal for the run: nothing is retried and no partial
/// output file is left behind.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested icon has no entry in the archive
    #[error("Icon {0:?} not found in the archive")]
    AssetNotFound(String),

    /// Invalid configuration (e.g. a minimum exceeding its maximum)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Background color string is not a six-digit hex color
    #[error("Malformed color {0:?}: expected a six-digit hex color like #ff0000")]
    Color(String),

    /// Fetching the icon archive failed
    #[error("Network error: {0}")]
    Network(String),

    /// The icon archive or an icon inside it could not be read
    #[error("Archive error: {0}")]
    Archive(String),

    /// Filesystem error while caching the archive or writing the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
