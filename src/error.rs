//! Error types for cloth operations.

use std::path::PathBuf;

/// Errors that can occur while manipulating or persisting a cloth.
///
/// Nothing here is fatal to the simulation: a failed call leaves state as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClothError {
    /// A save file could not be opened, read or written.
    #[error("IO error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
    /// The handle was minted before the particle collection was rebuilt.
    #[error("stale handle to particle {index} (generation {generation}, cloth is at {current})")]
    StaleHandle { index: usize, generation: u32, current: u32 },
    /// Particle index is out of bounds.
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },
}

impl ClothError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ClothError::Io { path: path.into(), message: err.to_string() }
    }
}
