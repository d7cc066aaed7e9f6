#![allow(clippy::len_without_is_empty)]

//! # Overview
//! vid_sim_lib is a library for comparing images and videos for similarity,
//! and for locating the temporal overlap between two independently captured
//! video streams.
//!
//! # How it works
//! Every frame is reduced to a perceptual [FrameFingerprint] (a DCT-based
//! hash of its pixel content). Two frames are treated as depicting the same
//! moment when the hamming distance between their fingerprints is within a
//! configurable [HashTolerance] rather than requiring bit-exact equality,
//! because re-encoding, codec differences or slight colour shifts between
//! two capture pipelines make exact matches unrealistic.
//!
//! [find_overlap] then searches two fingerprint sequences for the longest
//! contiguous run of frames that fuzzy-match pairwise, trying every pair of
//! starting offsets and extending each candidate run greedily until the
//! first mismatch. The reported [OverlapMatch] can be used to truncate both
//! videos to their common section before finer-grained scoring.
//!
//! Per-frame similarity scoring ([score_images], [score_sequences]) is a
//! thin layer over a structural-similarity primitive, with a raw
//! pixel-difference method as an alternative.
//!
//! # High level API
//! ```rust,no_run
//! use vid_sim_lib::{find_overlap_in_frames, score_sequences, OverlapParams, ScoreMethod, VideoFrames};
//!
//! # fn main() -> Result<(), vid_sim_lib::CompareErrorKind> {
//! let first = VideoFrames::load("render_a.mp4")?;
//! let second = VideoFrames::load("render_b.mp4")?;
//!
//! match find_overlap_in_frames(first.frames(), second.frames(), OverlapParams::default()) {
//!     None => println!("no overlap found"),
//!     Some(overlap) => {
//!         let range1 = overlap.first();
//!         let range2 = overlap.second();
//!         let common_a = &first.frames()[range1.start()..=range1.end()];
//!         let common_b = &second.frames()[range2.start()..=range2.end()];
//!         let score = score_sequences(common_a, common_b, ScoreMethod::Ssim)?;
//!         println!("common section scores {score:.2}%");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//! The overlap search is exhaustive over every pair of starting offsets, so
//! its cost grows with the product of the two sequence lengths. It is
//! intended for sequences of tens to low thousands of frames; downsample the
//! frame rate first ([VideoFrames::load_with_fps]) when comparing longer
//! videos.
//!
//! The search assumes both videos play the shared section at the same frame
//! rate. It does not resample variable frame rates and does not attempt
//! sub-frame interpolation.
//!
//! # Prerequisites
//! Video decoding shells out to the Ffmpeg command line tools. Make Ffmpeg
//! and Ffprobe available on the command line, for example:
//!
//! * Debian-based systems: ```# apt-get install ffmpeg```
//! * Yum-based systems: ```# yum install ffmpeg```
//! * Windows: install from <https://ffmpeg.org/download.html> and add the
//!   install directory to the PATH environment variable

pub(crate) mod compare_error_kind;
pub(crate) mod definitions;
pub(crate) mod frame_fingerprint;
pub(crate) mod frame_src;
pub(crate) mod overlap;
pub(crate) mod scoring;

pub use compare_error_kind::CompareErrorKind;
pub use definitions::{DEFAULT_MAX_DISTANCE, DEFAULT_MIN_OVERLAP_LEN};
pub use frame_fingerprint::{FrameFingerprint, HashTolerance, RawDistance};
pub use frame_src::{has_image_extension, load_image, VideoFrames};
pub use overlap::{find_overlap, find_overlap_in_frames, FrameRange, OverlapMatch, OverlapParams};
pub use scoring::{score_images, score_sequences, ScoreMethod};

#[doc(hidden)]
pub use frame_fingerprint::test_util;
