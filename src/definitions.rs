// Fingerprint definitions
pub const HASH_IMAGE_X: u32 = 16;
pub const HASH_IMAGE_Y: u32 = 16;

// Two fingerprints within this hamming distance are treated as depicting the
// same moment. Re-encoding and codec differences move a handful of bits, so
// exact equality is too strict for real capture pipelines.
pub const DEFAULT_MAX_DISTANCE: u32 = 5;

// Shortest run of matching frames that counts as an overlap. A single
// coinciding frame pair is usually noise.
pub const DEFAULT_MIN_OVERLAP_LEN: usize = 3;

// Similarity scores are reported as percentages.
pub const SCORE_SCALE: f64 = 100.0;
