use std::{
    io::Read,
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
    time::{Duration, SystemTime},
};

use image::RgbImage;

use crate::{error::FfmpegError, video_info::VideoInfo};

const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for a [FrameReader].
#[derive(Clone, Debug)]
pub struct FrameReaderBuilder {
    src_path: PathBuf,
    fps: Option<String>,
    num_frames: Option<u32>,
    timeout_secs: Option<u64>,
}

impl FrameReaderBuilder {
    pub fn new(src_path: impl AsRef<Path>) -> Self {
        Self {
            src_path: src_path.as_ref().to_path_buf(),
            fps: None,
            num_frames: None,
            timeout_secs: None,
        }
    }

    pub fn src_path(&self) -> &Path {
        &self.src_path
    }

    /// Decode at the given frame rate instead of the native one. Accepts any
    /// ffmpeg fps expression, e.g. "5" or "1/3".
    pub fn fps(&mut self, fps: impl AsRef<str>) -> &mut Self {
        match self.fps {
            Some(_) => panic!("FPS option already set"),
            None => self.fps = Some(fps.as_ref().to_string()),
        }

        self
    }

    /// Stop after decoding this many frames.
    pub fn num_frames(&mut self, num_frames: u32) -> &mut Self {
        self.num_frames = Some(num_frames);
        self
    }

    /// Give up decoding after this many seconds.
    pub fn timeout_secs(&mut self, timeout_secs: u64) -> &mut Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Probe the video and spawn the decoding process.
    pub fn spawn(&self) -> Result<(FrameReader, VideoInfo), FfmpegError> {
        let info = VideoInfo::new(&self.src_path)?;
        let (x, y) = info.resolution();

        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-i").arg(&self.src_path);
        if let Some(fps) = &self.fps {
            cmd.args(["-filter:v".to_string(), format!("fps={fps}")]);
        }
        if let Some(num_frames) = self.num_frames {
            cmd.args(["-frames:v".to_string(), num_frames.to_string()]);
        }
        cmd.args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-an", "-v", "error"]);
        cmd.arg("pipe:1");
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        let child = cmd.spawn()?;

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let reader = FrameReader {
            x,
            y,
            child,
            timeout_time: SystemTime::now() + Duration::from_secs(timeout_secs),
            finished: false,
        };

        Ok((reader, info))
    }
}

/// An iterator over the decoded frames of one video, in presentation order.
///
/// Each frame is read from the stdout of a spawned ffmpeg process as one
/// rgb24 buffer of the probed resolution. Iteration ends at stream end, on
/// any read failure, or when the configured timeout passes.
#[derive(Debug)]
pub struct FrameReader {
    x: u32,
    y: u32,
    child: Child,
    timeout_time: SystemTime,
    finished: bool,
}

impl Iterator for FrameReader {
    type Item = RgbImage;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || SystemTime::now() > self.timeout_time {
            self.finish();
            return None;
        }

        let frame_len = self.x as usize * self.y as usize * 3;
        let mut raw_buf = vec![0u8; frame_len];

        let stdout = self.child.stdout.as_mut()?;
        let mut buf_head = 0;
        while buf_head < raw_buf.len() {
            if SystemTime::now() > self.timeout_time {
                self.finish();
                return None;
            }

            match stdout.read(&mut raw_buf[buf_head..]) {
                //no more data can be read, or something went wrong
                Err(_) | Ok(0) => {
                    self.finish();
                    return None;
                }

                Ok(bytes_read) => buf_head += bytes_read,
            }
        }

        //buffer length is x * y * 3 by construction
        Some(RgbImage::from_raw(self.x, self.y, raw_buf).unwrap())
    }
}

impl FrameReader {
    fn finish(&mut self) {
        self.finished = true;
        let _kill_error = self.child.kill();
        let _wait_error = self.child.wait();
    }
}

// to prevent accumulation of zombie processes, reap the return code of the
// ffmpeg subcommand (if nothing else has done so already) here
impl Drop for FrameReader {
    fn drop(&mut self) {
        let _kill_error = self.child.kill();
        let _wait_error = self.child.wait();
    }
}
