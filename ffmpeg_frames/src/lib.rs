//! Thin wrapper around the ffmpeg and ffprobe command line tools.
//!
//! Frames are decoded by spawning ffmpeg with a rawvideo output and reading
//! rgb24 buffers from its stdout. Ffmpeg and Ffprobe must be installed and
//! visible on the command line.

pub(crate) mod error;
pub(crate) mod frame_reader;
pub(crate) mod video_info;

pub use error::FfmpegError;
pub use frame_reader::{FrameReader, FrameReaderBuilder};
pub use video_info::VideoInfo;
