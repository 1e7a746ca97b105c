//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum ArcadeError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Configuration rejected before an environment was built.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The lower bound of the no-op count exceeds the upper bound.
    #[error("No-op range is empty: input_frames = {input_frames}, scaled max_noops = {max_noops}")]
    InvalidNoopRange {
        /// Lower bound, the number of input frames.
        input_frames: usize,
        /// Upper bound, the maximum number of no-ops scaled by the frame skip.
        max_noops: usize,
    },

    /// Every warm-up attempt ended the episode.
    #[error("Episode terminated during no-op warm-up in all {0} attempts")]
    WarmupExhausted(usize),

    /// ROM image of a game not found.
    #[error("ROM not found: {0}")]
    RomNotFound(String),
}
