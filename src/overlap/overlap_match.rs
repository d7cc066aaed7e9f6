use serde::{Deserialize, Serialize};

/// A contiguous run of frames within one sequence, described by 0-based
/// inclusive start and end indexes.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct FrameRange {
    start: usize,
    end: usize,
}

impl FrameRange {
    //a range always spans at least one frame
    pub(crate) fn from_start_len(start: usize, len: usize) -> Self {
        debug_assert!(len >= 1);
        Self {
            start,
            end: start + len - 1,
        }
    }

    /// Index of the first frame in the run.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the last frame in the run (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// The number of frames in the run.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// The best alignment found between two frame sequences: a pair of
/// equal-length runs whose frames fuzzy-match pairwise in 1:1 stride.
///
/// An OverlapMatch can be queried for the matching range in either sequence,
/// e.g. to truncate both videos to their common section before per-frame
/// similarity scoring.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct OverlapMatch {
    first: FrameRange,
    second: FrameRange,
}

impl OverlapMatch {
    pub(crate) fn new(start1: usize, start2: usize, len: usize) -> Self {
        Self {
            first: FrameRange::from_start_len(start1, len),
            second: FrameRange::from_start_len(start2, len),
        }
    }

    /// The matching run within the first sequence.
    pub fn first(&self) -> FrameRange {
        self.first
    }

    /// The matching run within the second sequence.
    pub fn second(&self) -> FrameRange {
        self.second
    }

    /// The overlap length in frames. Both ranges always have this length.
    pub fn len(&self) -> usize {
        self.first.len()
    }
}
