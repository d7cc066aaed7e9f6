use std::{path::Path, process::Command};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{truncate_stderr, FfmpegError};

/// Some of the video metadata that can be obtained by using ffprobe.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize, Default)]
pub struct VideoInfo {
    resolution: (u32, u32),
    duration_secs: f64,
}

impl VideoInfo {
    /// Use ffprobe to get the resolution and duration of a video. If the
    /// video contains multiple streams then only the first video stream is
    /// inspected.
    ///
    /// # errors
    /// * The file cannot be read or is not recognized as a video by ffprobe
    /// * The output from ffprobe could not be parsed
    /// * The reported resolution was zero in either dimension
    pub fn new(src_path: impl AsRef<Path>) -> Result<Self, FfmpegError> {
        let output = Command::new("ffprobe")
            .args(["-v", "error"])
            .args(["-select_streams", "v:0"])
            .args(["-show_entries", "stream=width,height"])
            .args(["-show_entries", "format=duration"])
            .args(["-of", "json"])
            .arg(src_path.as_ref())
            .output()?;

        if !output.status.success() {
            return Err(FfmpegError::Internal(truncate_stderr(&output.stderr)));
        }

        let text =
            std::str::from_utf8(&output.stdout).map_err(|_| FfmpegError::Utf8Conversion)?;
        let parsed: Value =
            serde_json::from_str(text).map_err(|e| FfmpegError::InfoParse(e.to_string()))?;

        let stream = parsed["streams"]
            .get(0)
            .ok_or(FfmpegError::InvalidResolution)?;
        let width = stream["width"].as_u64().unwrap_or(0) as u32;
        let height = stream["height"].as_u64().unwrap_or(0) as u32;
        if width == 0 || height == 0 {
            return Err(FfmpegError::InvalidResolution);
        }

        //audio-only files and some containers report no duration. That is
        //not fatal here.
        let duration_secs = match &parsed["format"]["duration"] {
            Value::String(d) => d
                .parse()
                .map_err(|e: std::num::ParseFloatError| FfmpegError::InfoParse(e.to_string()))?,
            _ => 0.0,
        };

        Ok(Self {
            resolution: (width, height),
            duration_secs,
        })
    }

    /// The (x, y) resolution of the first video stream.
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// The duration of the video in seconds, or 0 when unknown.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}
