use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Various causes of failure for ffmpeg/ffprobe operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FfmpegError {
    /// Ffmpeg/Ffprobe command was not found. Make sure Ffmpeg is installed
    /// and can be found on the command line.
    #[error("ffmpeg/ffprobe not found. Make sure ffmpeg and ffprobe are installed and visible on the command line")]
    NotFound,

    /// Io error occurred while executing the Ffmpeg/Ffprobe command.
    #[error("ffmpeg io error: {0}")]
    Io(String),

    /// Ffmpeg/Ffprobe returned a nonzero exit code. Ffmpeg sometimes prints
    /// very long error strings, so only the first few hundred characters of
    /// stderr are kept.
    #[error("internal ffmpeg failure: {0}")]
    Internal(String),

    /// Failed to interpret Ffmpeg/Ffprobe output as a utf8 string.
    #[error("utf8 parsing/conversion failure")]
    Utf8Conversion,

    /// Ffprobe reported a zero-sized resolution for the first video stream.
    /// This sometimes occurs when attempting to decode an audio file.
    #[error("video has a zero-sized resolution")]
    InvalidResolution,

    /// The output from ffprobe could not be parsed.
    #[error("failed to parse video properties: {0}")]
    InfoParse(String),
}

impl From<std::io::Error> for FfmpegError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            FfmpegError::NotFound
        } else {
            FfmpegError::Io(e.to_string())
        }
    }
}

//limit the amount of stderr text carried inside an error
pub(crate) fn truncate_stderr(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr).chars().take(500).collect()
}
