//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// No episode is currently selected
    #[error("No episode loaded")]
    NoEpisodeLoaded,

    /// Start index outside the queue
    #[error("Index {index} out of bounds for queue of {len} episodes")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
