use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

use ffmpeg_frames::FrameReaderBuilder;
use image::{DynamicImage, RgbImage};

use crate::compare_error_kind::CompareErrorKind;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// All frames of one video, fully materialized in decode order.
///
/// The overlap search compares frames at arbitrary offsets, so sequences are
/// read into memory up-front rather than streamed. A sequence lives only for
/// the duration of one comparison; nothing is persisted.
pub struct VideoFrames {
    frames: Vec<RgbImage>,
    src_path: PathBuf,
}

impl VideoFrames {
    /// Decode every frame of the video at src_path.
    pub fn load(src_path: impl AsRef<Path>) -> Result<Self, CompareErrorKind> {
        Self::load_inner(src_path.as_ref(), None)
    }

    /// Decode the video at src_path, downsampled to the given frame rate
    /// (an ffmpeg fps expression such as "5" or "1/3"). Use this to bound
    /// the sequence length before an overlap search on long videos.
    pub fn load_with_fps(src_path: impl AsRef<Path>, fps: &str) -> Result<Self, CompareErrorKind> {
        Self::load_inner(src_path.as_ref(), Some(fps))
    }

    fn load_inner(src_path: &Path, fps: Option<&str>) -> Result<Self, CompareErrorKind> {
        let mut builder = FrameReaderBuilder::new(src_path);
        if let Some(fps) = fps {
            builder.fps(fps);
        }

        let (reader, _info) = builder
            .spawn()
            .map_err(|error| CompareErrorKind::VideoDecode {
                src_path: src_path.to_path_buf(),
                error,
            })?;

        let frames = reader.collect::<Vec<_>>();
        if frames.is_empty() {
            return Err(CompareErrorKind::NoFrames(src_path.to_path_buf()));
        }

        Ok(Self {
            frames,
            src_path: src_path.to_path_buf(),
        })
    }

    /// Build a frame sequence from a directory of still images, ordered by
    /// the numeric parts of their filenames (frame_2.png sorts before
    /// frame_10.png).
    pub fn from_image_dir(dir: impl AsRef<Path>) -> Result<Self, CompareErrorKind> {
        let dir = dir.as_ref();

        let mut image_paths = list_image_files(dir)?;
        image_paths.sort_by(|a, b| natural_order(a, b));

        let frames = image_paths
            .iter()
            .map(|path| load_image(path).map(|img| img.to_rgb8()))
            .collect::<Result<Vec<_>, _>>()?;

        if frames.is_empty() {
            return Err(CompareErrorKind::NoFrames(dir.to_path_buf()));
        }

        Ok(Self {
            frames,
            src_path: dir.to_path_buf(),
        })
    }

    /// The path to the video file or image directory this sequence was read
    /// from.
    pub fn src_path(&self) -> &Path {
        &self.src_path
    }

    pub fn frames(&self) -> &[RgbImage] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<RgbImage> {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

/// Load and decode a single image, reporting the path on failure.
pub fn load_image(src_path: impl AsRef<Path>) -> Result<DynamicImage, CompareErrorKind> {
    image::open(src_path.as_ref()).map_err(|e| CompareErrorKind::ImageLoad {
        src_path: src_path.as_ref().to_path_buf(),
        error: e.to_string(),
    })
}

/// True when the path has a recognized still-image extension.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}

fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>, CompareErrorKind> {
    let entries = std::fs::read_dir(dir).map_err(|e| CompareErrorKind::DirRead {
        src_path: dir.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut paths = vec![];
    for entry in entries {
        let entry = entry.map_err(|e| CompareErrorKind::DirRead {
            src_path: dir.to_path_buf(),
            error: e.to_string(),
        })?;

        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }

    Ok(paths)
}

//Order two paths by splitting their filenames into text and digit runs, so
//numbered frames sort numerically instead of lexically.
fn natural_order(a: &Path, b: &Path) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum KeyPart {
    Number(u64),
    Text(String),
}

fn natural_key(path: &Path) -> Vec<KeyPart> {
    let name = path.file_name().unwrap_or_default().to_string_lossy();

    let mut parts = vec![];
    let mut current_text = String::new();
    let mut current_number = String::new();

    fn flush_text(text: &mut String, parts: &mut Vec<KeyPart>) {
        if !text.is_empty() {
            parts.push(KeyPart::Text(text.to_ascii_lowercase()));
            text.clear();
        }
    }
    fn flush_number(digits: &mut String, parts: &mut Vec<KeyPart>) {
        if !digits.is_empty() {
            //saturate rather than fail on absurdly long digit runs
            let value = digits.parse().unwrap_or(u64::MAX);
            parts.push(KeyPart::Number(value));
            digits.clear();
        }
    }

    for c in name.chars() {
        if c.is_ascii_digit() {
            flush_text(&mut current_text, &mut parts);
            current_number.push(c);
        } else {
            flush_number(&mut current_number, &mut parts);
            current_text.push(c);
        }
    }
    flush_text(&mut current_text, &mut parts);
    flush_number(&mut current_number, &mut parts);

    parts
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_numbered_frames_sort_numerically() {
        let mut paths = vec![
            PathBuf::from("frames/image_10.png"),
            PathBuf::from("frames/image_2.png"),
            PathBuf::from("frames/image_1.png"),
        ];
        paths.sort_by(|a, b| natural_order(a, b));

        let names = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, ["image_1.png", "image_2.png", "image_10.png"]);
    }

    #[test]
    fn test_image_extension_matching_is_case_insensitive() {
        assert!(has_image_extension(Path::new("a/frame.PNG")));
        assert!(has_image_extension(Path::new("a/frame.jpeg")));
        assert!(!has_image_extension(Path::new("a/frame.txt")));
        assert!(!has_image_extension(Path::new("a/frame")));
    }
}
