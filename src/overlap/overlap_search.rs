use image::RgbImage;
use rayon::prelude::*;

use crate::{
    definitions::DEFAULT_MIN_OVERLAP_LEN,
    frame_fingerprint::{FrameFingerprint, HashTolerance},
};

use super::OverlapMatch;

/// Configuration for the overlap search.
///
/// `min_match_len` is the shortest run of fuzzy-matching frame pairs that
/// qualifies as an overlap. Values of 0 or 1 are legal but degenerate: any
/// single coinciding frame pair would count as an "overlap", so callers
/// should normally choose 2 or more.
///
/// `tolerance` is the maximum fingerprint distance at which two frames are
/// still considered the same moment.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct OverlapParams {
    pub min_match_len: usize,
    pub tolerance: HashTolerance,
}

impl Default for OverlapParams {
    fn default() -> Self {
        Self {
            min_match_len: DEFAULT_MIN_OVERLAP_LEN,
            tolerance: HashTolerance::default(),
        }
    }
}

//A candidate alignment: the run of pairwise-matching frames starting at
//(start1, start2).
#[derive(Clone, Copy, Debug)]
struct Candidate {
    start1: usize,
    start2: usize,
    len: usize,
}

impl Candidate {
    //Pick the winner between two candidates: the longer run, with ties
    //broken towards the lower start1, then the lower start2. This total
    //order reproduces the "first found wins" outcome of a sequential scan
    //with ascending start1 (outer) and start2 (inner).
    fn prefer(self, other: Candidate) -> Candidate {
        let self_key = (std::cmp::Reverse(self.len), self.start1, self.start2);
        let other_key = (std::cmp::Reverse(other.len), other.start1, other.start2);
        if self_key <= other_key {
            self
        } else {
            other
        }
    }
}

/// Search two fingerprint sequences for their best-aligned contiguous
/// matching run.
///
/// Every pair of starting offsets is tried; from each pair the scan walks
/// both cursors forward in lock-step while the frames fuzzy-match, and the
/// longest qualifying walk wins. Ties are broken deterministically towards
/// the earliest start in the first sequence, then the earliest start in the
/// second.
///
/// Fingerprints must have been computed once per frame beforehand (see
/// [FrameFingerprint::of_frames]); the scan itself never touches pixel data.
///
/// Returns `None` when no run of at least `params.min_match_len` matching
/// frame pairs exists. Absence is an expected outcome for unrelated inputs,
/// not an error.
///
/// The cost is O(len1 * len2 * average_run_length): the scan is exhaustive
/// by design, and intended for sequences of up to a few thousand frames.
/// Callers with longer videos should downsample the frame rate before
/// fingerprinting. The outer loop is partitioned across threads; results do
/// not depend on the partitioning.
pub fn find_overlap(
    seq1: &[FrameFingerprint],
    seq2: &[FrameFingerprint],
    params: OverlapParams,
) -> Option<OverlapMatch> {
    if seq1.is_empty() || seq2.is_empty() {
        return None;
    }

    //a window always spans at least one frame
    let min_match_len = params.min_match_len.max(1);

    //no run can be longer than the shorter sequence
    if min_match_len > seq1.len().min(seq2.len()) {
        return None;
    }

    (0..seq1.len())
        .into_par_iter()
        .filter_map(|start1| best_run_from(seq1, seq2, start1, min_match_len, params.tolerance))
        .reduce_with(Candidate::prefer)
        .map(|best| OverlapMatch::new(best.start1, best.start2, best.len))
}

/// Convenience wrapper over [find_overlap] that fingerprints both frame
/// sequences first (exactly once per frame, in parallel).
pub fn find_overlap_in_frames(
    frames1: &[RgbImage],
    frames2: &[RgbImage],
    params: OverlapParams,
) -> Option<OverlapMatch> {
    let fingerprints1 = FrameFingerprint::of_frames(frames1);
    let fingerprints2 = FrameFingerprint::of_frames(frames2);
    find_overlap(&fingerprints1, &fingerprints2, params)
}

//The best qualifying run among all runs starting at start1 in seq1. The
//inner scan visits start2 in ascending order and only accepts strictly
//longer runs, so the returned candidate has the lowest start2 among equals.
fn best_run_from(
    seq1: &[FrameFingerprint],
    seq2: &[FrameFingerprint],
    start1: usize,
    min_match_len: usize,
    tolerance: HashTolerance,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for start2 in 0..seq2.len() {
        let len = run_length(seq1, seq2, start1, start2, tolerance);

        let improves = best.as_ref().map_or(true, |b| len > b.len);
        if len >= min_match_len && improves {
            best = Some(Candidate {
                start1,
                start2,
                len,
            });
        }
    }

    best
}

//Walk two cursors forward in lock-step from (offset1, offset2), counting
//pairs while they fuzzy-match. Stops at the first mismatch or when either
//sequence runs out.
fn run_length(
    seq1: &[FrameFingerprint],
    seq2: &[FrameFingerprint],
    mut offset1: usize,
    mut offset2: usize,
    tolerance: HashTolerance,
) -> usize {
    let mut len = 0;

    while offset1 < seq1.len()
        && offset2 < seq2.len()
        && seq1[offset1].matches(&seq2[offset2], tolerance)
    {
        len += 1;
        offset1 += 1;
        offset2 += 1;
    }

    len
}

#[cfg(test)]
mod test {
    use rand::prelude::*;

    use super::*;

    fn params(min_match_len: usize, tolerance: u32) -> OverlapParams {
        OverlapParams {
            min_match_len,
            tolerance: HashTolerance::new(tolerance),
        }
    }

    fn distinct_fingerprints(n: usize) -> Vec<FrameFingerprint> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(100);
        let base = FrameFingerprint::random_fingerprint(&mut rng);

        //spacing of 32 bits keeps every pair well outside any tolerance
        //used in these tests
        (0..n)
            .map(|i| base.fingerprint_with_distance(32 * i as u32, &mut rng))
            .collect()
    }

    #[test]
    fn test_searching_empty_sequences_finds_nothing() {
        let fps = distinct_fingerprints(3);

        assert!(find_overlap(&[], &fps, params(1, 0)).is_none());
        assert!(find_overlap(&fps, &[], params(1, 0)).is_none());
        assert!(find_overlap(&[], &[], params(1, 0)).is_none());
    }

    #[test]
    fn test_min_match_len_zero_behaves_as_one() {
        let fps = distinct_fingerprints(2);
        let seq1 = [fps[0].clone(), fps[1].clone()];
        let seq2 = [fps[1].clone()];

        let found = find_overlap(&seq1, &seq2, params(0, 0)).unwrap();
        assert_eq!(found.first().start(), 1);
        assert_eq!(found.second().start(), 0);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_min_match_len_longer_than_either_sequence_finds_nothing() {
        let fps = distinct_fingerprints(3);

        assert!(find_overlap(&fps, &fps, params(4, 0)).is_none());
    }

    #[test]
    fn test_overlap_is_not_reported_below_min_match_len() {
        let fps = distinct_fingerprints(6);

        //seq1 and seq2 share only a two-frame run
        let seq1 = [fps[0].clone(), fps[1].clone(), fps[2].clone()];
        let seq2 = [fps[1].clone(), fps[2].clone(), fps[5].clone()];

        assert!(find_overlap(&seq1, &seq2, params(3, 0)).is_none());
        assert!(find_overlap(&seq1, &seq2, params(2, 0)).is_some());
    }

    #[test]
    fn test_tie_break_prefers_earliest_starts() {
        let fps = distinct_fingerprints(4);

        //the shared frame appears twice on both sides, giving four length-1
        //candidate windows. The reported one must be the earliest in seq1,
        //then the earliest in seq2.
        let seq1 = [fps[0].clone(), fps[1].clone(), fps[0].clone()];
        let seq2 = [fps[2].clone(), fps[0].clone(), fps[3].clone(), fps[0].clone()];

        let found = find_overlap(&seq1, &seq2, params(1, 0)).unwrap();
        assert_eq!(found.first().start(), 0);
        assert_eq!(found.second().start(), 1);
        assert_eq!(found.len(), 1);
    }
}
