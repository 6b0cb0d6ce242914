//! Error type for marble generation

use std::io;
use std::path::PathBuf;

/// Errors raised while generating or saving marble textures.
///
/// Every variant is terminal for a batch run; nothing is retried and files
/// written before the failure are left in place.
#[derive(Debug, thiserror::Error)]
pub enum MarbleError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("PNG encoding error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Invalid texture size: {0} (must be at least 1 pixel)")]
    InvalidSize(u32),

    #[error("Invalid noise scale: {0} (must be finite and positive)")]
    InvalidNoiseScale(f64),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}
