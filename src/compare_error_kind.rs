use std::path::PathBuf;

use ffmpeg_frames::FfmpegError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for the various reasons why two images or videos could not be
/// compared.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CompareErrorKind {
    /// The image at src_path could not be opened or decoded. The underlying
    /// decoder message is preserved as a string.
    #[error("Failed to load image {src_path}: {error}")]
    ImageLoad { src_path: PathBuf, error: String },

    /// Ffmpeg failed while extracting frames from the video at src_path.
    #[error("Failed to decode video {src_path}: {error}")]
    VideoDecode { src_path: PathBuf, error: FfmpegError },

    /// The image directory could not be listed.
    #[error("Failed to read image directory {src_path}: {error}")]
    DirRead { src_path: PathBuf, error: String },

    /// The video or image directory produced no frames at all.
    #[error("No frames found in {0}")]
    NoFrames(PathBuf),

    /// The similarity primitive is only defined for equal-sized inputs.
    /// Mismatched inputs are rejected rather than silently resized.
    #[error("Frame dimension mismatch: {dims_a:?} vs {dims_b:?}")]
    DimensionMismatch {
        dims_a: (u32, u32),
        dims_b: (u32, u32),
    },

    /// Both sequences must contribute at least one frame pair to a score.
    #[error("Nothing to compare: the sequence intersection is empty")]
    NothingToCompare,

    /// The structural-similarity backend reported a failure.
    #[error("Similarity calculation failed: {0}")]
    Similarity(String),
}
