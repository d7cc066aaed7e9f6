mod overlap_match;
mod overlap_search;

pub use overlap_match::{FrameRange, OverlapMatch};
pub use overlap_search::{find_overlap, find_overlap_in_frames, OverlapParams};
