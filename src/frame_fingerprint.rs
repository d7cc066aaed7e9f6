use image::{DynamicImage, RgbImage};
use image_hasher::{HashAlg, Hasher, HasherConfig, ImageHash};
use rayon::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::definitions::{HASH_IMAGE_X, HASH_IMAGE_Y};

/// The hamming distance between two [FrameFingerprint] objects.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct RawDistance {
    pub distance: u32,
}

impl RawDistance {
    pub fn within_tolerance(&self, tolerance: HashTolerance) -> bool {
        self.distance <= tolerance.value
    }

    pub fn u32_value(&self) -> u32 {
        self.distance
    }
}

/// Tolerance applied when deciding whether two fingerprints depict the same
/// moment.
///
/// A tolerance of 0 requires the raw bits of both fingerprints to be
/// identical. Small nonzero values absorb the perceptual drift introduced by
/// re-encoding, codec changes and minor brightness shifts between two capture
/// pipelines.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct HashTolerance {
    pub value: u32,
}

impl HashTolerance {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn contains(&self, dist: &RawDistance) -> bool {
        dist.distance <= self.value
    }
}

impl Default for HashTolerance {
    fn default() -> Self {
        Self {
            value: crate::definitions::DEFAULT_MAX_DISTANCE,
        }
    }
}

/// A perceptual fingerprint of a single video frame, used for fuzzy frame
/// matching during overlap alignment.
///
/// The fingerprint is a DCT-based hash of the frame contents. It is a pure
/// function of the pixel data: hashing the same frame twice always yields the
/// same fingerprint. Fingerprints are cheap to compare (hamming distance over
/// a fixed number of bits), so they are computed once per frame up-front and
/// reused for every comparison in the alignment scan.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FrameFingerprint {
    hash: ImageHash,
}

fn build_hasher() -> Hasher {
    HasherConfig::new()
        .hash_size(HASH_IMAGE_X, HASH_IMAGE_Y)
        .hash_alg(HashAlg::Mean)
        .preproc_dct()
        .to_hasher()
}

impl FrameFingerprint {
    /// Fingerprint a single decoded image.
    pub fn of_image(img: &DynamicImage) -> Self {
        Self {
            hash: build_hasher().hash_image(img),
        }
    }

    /// Fingerprint a single video frame.
    pub fn of_frame(frame: &RgbImage) -> Self {
        Self {
            hash: build_hasher().hash_image(frame),
        }
    }

    /// Fingerprint every frame of a sequence exactly once.
    ///
    /// This is the entry point alignment callers should use: the returned
    /// vec is index-aligned with `frames`, and all subsequent comparisons
    /// work on the precomputed fingerprints rather than raw pixel content.
    /// Frames are hashed in parallel.
    pub fn of_frames(frames: &[RgbImage]) -> Vec<Self> {
        frames.par_iter().map(Self::of_frame).collect()
    }

    /// The raw hamming distance from this fingerprint to another.
    /// Symmetric, and zero iff both fingerprints carry identical bits.
    pub fn distance(&self, other: &FrameFingerprint) -> RawDistance {
        RawDistance {
            distance: self.hash.dist(&other.hash),
        }
    }

    /// The fuzzy frame matching predicate: true iff the distance between the
    /// two fingerprints is within `tolerance`. Pure, with no side effects.
    pub fn matches(&self, other: &FrameFingerprint, tolerance: HashTolerance) -> bool {
        tolerance.contains(&self.distance(other))
    }
}

impl AsRef<FrameFingerprint> for FrameFingerprint {
    fn as_ref(&self) -> &FrameFingerprint {
        self
    }
}

// Fingerprints serialize as their base64 string form.
impl Serialize for FrameFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hash.to_base64())
    }
}

impl<'de> Deserialize<'de> for FrameFingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let hash = ImageHash::from_base64(&encoded)
            .map_err(|e| de::Error::custom(format!("invalid fingerprint: {e:?}")))?;
        Ok(Self { hash })
    }
}

//Utilities for testing
#[doc(hidden)]
pub mod test_util {

    use rand::prelude::*;

    use super::FrameFingerprint;
    use crate::definitions::{HASH_IMAGE_X, HASH_IMAGE_Y};

    pub const FINGERPRINT_BYTES: usize = (HASH_IMAGE_X * HASH_IMAGE_Y) as usize / 8;

    #[doc(hidden)]
    impl FrameFingerprint {
        /// Build a fingerprint directly from raw hash bytes, bypassing image
        /// hashing altogether.
        pub fn from_raw_bytes(bytes: &[u8]) -> Self {
            Self {
                hash: image_hasher::ImageHash::from_bytes(bytes).unwrap(),
            }
        }

        pub fn random_fingerprint(rng: &mut StdRng) -> Self {
            let mut bytes = [0u8; FINGERPRINT_BYTES];
            rng.fill_bytes(&mut bytes);
            Self::from_raw_bytes(&bytes)
        }

        /// Derive a fingerprint at an exact hamming distance from this one,
        /// by flipping `target_distance` distinct bits.
        pub fn fingerprint_with_distance(&self, target_distance: u32, rng: &mut StdRng) -> Self {
            let mut bytes = self.hash.as_bytes().to_vec();

            let mut flipped = self.clone();
            while self.distance(&flipped).u32_value() < target_distance {
                let chosen_byte = rng.gen_range(0..bytes.len());
                let chosen_bit = rng.gen_range(0..8);
                bytes[chosen_byte] ^= 1u8 << chosen_bit;
                flipped = Self::from_raw_bytes(&bytes);
            }
            assert!(self.distance(&flipped).u32_value() == target_distance);
            flipped
        }
    }
}

#[cfg(test)]
mod test {
    use rand::prelude::*;

    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        for _i in 0..1_000 {
            let fp1 = FrameFingerprint::random_fingerprint(&mut rng);
            let fp2 = FrameFingerprint::random_fingerprint(&mut rng);

            assert_eq!(fp1.distance(&fp2), fp2.distance(&fp1));
        }
    }

    #[test]
    fn test_matches_is_reflexive_at_zero_tolerance() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        for _i in 0..100 {
            let fp = FrameFingerprint::random_fingerprint(&mut rng);
            assert!(fp.matches(&fp, HashTolerance::new(0)));
        }
    }

    #[test]
    fn test_matches_tracks_tolerance_boundary() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let base = FrameFingerprint::random_fingerprint(&mut rng);

        for dist in 1..=8 {
            let other = base.fingerprint_with_distance(dist, &mut rng);

            assert!(base.matches(&other, HashTolerance::new(dist)));
            assert!(!base.matches(&other, HashTolerance::new(dist - 1)));
        }
    }

    #[test]
    fn test_identical_content_yields_identical_fingerprints() {
        let img = image::RgbImage::from_fn(64, 64, |x, y| image::Rgb([x as u8, y as u8, 128]));

        let fp1 = FrameFingerprint::of_frame(&img);
        let fp2 = FrameFingerprint::of_frame(&img.clone());

        assert_eq!(fp1, fp2);
        assert_eq!(fp1.distance(&fp2).u32_value(), 0);
    }

    #[test]
    fn test_serde_round_trips_through_base64() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let fp = FrameFingerprint::random_fingerprint(&mut rng);

        let encoded = serde_json::to_string(&fp).unwrap();
        let decoded: FrameFingerprint = serde_json::from_str(&encoded).unwrap();

        assert_eq!(fp, decoded);
    }
}
