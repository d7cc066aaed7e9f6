mod pixel_diff;

use image::{DynamicImage, GrayImage, RgbImage};
use image_compare::Algorithm;
use serde::{Deserialize, Serialize};

use crate::{compare_error_kind::CompareErrorKind, definitions::SCORE_SCALE};

/// The pairwise frame-similarity primitive to score with.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum ScoreMethod {
    /// Structural similarity (MSSIM over a sliding window). Tolerant of
    /// uniform brightness shifts, sensitive to structural change.
    Ssim,

    /// Mean absolute per-pixel difference. Cheap, and sensitive to any
    /// change at all, including uniform brightness shifts.
    PixelDiff,
}

/// Compare two images and return a similarity score in the range 0..=100.
///
/// Both images are converted to grayscale before comparison. Images of
/// differing dimensions are rejected with
/// [CompareErrorKind::DimensionMismatch]; no resizing or cropping is
/// attempted on the caller's behalf.
pub fn score_images(
    image_a: &DynamicImage,
    image_b: &DynamicImage,
    method: ScoreMethod,
) -> Result<f64, CompareErrorKind> {
    score_gray(&image_a.to_luma8(), &image_b.to_luma8(), method)
}

/// Compare two frame sequences pairwise and return the mean similarity score
/// in the range 0..=100.
///
/// When the sequences differ in length only the first `min(len_a, len_b)`
/// index-aligned pairs are compared; trailing frames of the longer sequence
/// are silently ignored. There is no interpolation or resampling. Callers
/// wanting to compare just the common section of two videos should truncate
/// both sequences to the ranges reported by
/// [find_overlap][crate::find_overlap] first.
pub fn score_sequences(
    seq_a: &[RgbImage],
    seq_b: &[RgbImage],
    method: ScoreMethod,
) -> Result<f64, CompareErrorKind> {
    let shared_len = seq_a.len().min(seq_b.len());
    if shared_len == 0 {
        return Err(CompareErrorKind::NothingToCompare);
    }

    let mut total = 0.0;
    for (frame_a, frame_b) in seq_a[..shared_len].iter().zip(&seq_b[..shared_len]) {
        let gray_a = image::imageops::grayscale(frame_a);
        let gray_b = image::imageops::grayscale(frame_b);
        total += score_gray(&gray_a, &gray_b, method)?;
    }

    Ok(total / shared_len as f64)
}

fn score_gray(
    gray_a: &GrayImage,
    gray_b: &GrayImage,
    method: ScoreMethod,
) -> Result<f64, CompareErrorKind> {
    if gray_a.dimensions() != gray_b.dimensions() {
        return Err(CompareErrorKind::DimensionMismatch {
            dims_a: gray_a.dimensions(),
            dims_b: gray_b.dimensions(),
        });
    }

    let score = match method {
        ScoreMethod::Ssim => {
            image_compare::gray_similarity_structure(&Algorithm::MSSIMSimple, gray_a, gray_b)
                .map_err(|e| CompareErrorKind::Similarity(format!("{e:?}")))?
                .score
        }
        ScoreMethod::PixelDiff => pixel_diff::similarity(gray_a, gray_b),
    };

    Ok(score * SCORE_SCALE)
}

#[cfg(test)]
mod test {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 3) as u8, (y * 3) as u8, ((x + y) * 2) as u8])
        })
    }

    #[test]
    fn test_identical_images_score_100() {
        let img = DynamicImage::ImageRgb8(gradient_image(64, 64));

        for method in [ScoreMethod::Ssim, ScoreMethod::PixelDiff] {
            let score = score_images(&img, &img, method).unwrap();
            assert!(
                (score - 100.0).abs() < 1e-6,
                "{method:?}: expected 100, got {score}"
            );
        }
    }

    #[test]
    fn test_different_images_score_below_100() {
        let img_a = DynamicImage::ImageRgb8(gradient_image(64, 64));
        let img_b = DynamicImage::ImageRgb8(RgbImage::from_fn(64, 64, |x, y| {
            image::Rgb([255 - (x * 3) as u8, (y * 7) as u8, 0])
        }));

        for method in [ScoreMethod::Ssim, ScoreMethod::PixelDiff] {
            let score = score_images(&img_a, &img_b, method).unwrap();
            assert!(score < 100.0, "{method:?}: got {score}");
        }
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let img_a = DynamicImage::ImageRgb8(gradient_image(64, 64));
        let img_b = DynamicImage::ImageRgb8(gradient_image(64, 32));

        for method in [ScoreMethod::Ssim, ScoreMethod::PixelDiff] {
            let result = score_images(&img_a, &img_b, method);
            assert!(matches!(
                result,
                Err(CompareErrorKind::DimensionMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_sequence_scoring_truncates_to_shorter_sequence() {
        let frame = gradient_image(32, 32);
        let other = RgbImage::from_fn(32, 32, |x, _y| image::Rgb([(x * 8) as u8, 0, 0]));

        //the extra trailing frame of seq_a must be ignored entirely
        let seq_a = vec![frame.clone(), frame.clone(), other];
        let seq_b = vec![frame.clone(), frame];

        let score = score_sequences(&seq_a, &seq_b, ScoreMethod::PixelDiff).unwrap();
        assert!((score - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_intersection_is_rejected() {
        let seq: Vec<RgbImage> = vec![gradient_image(32, 32)];

        let result = score_sequences(&seq, &[], ScoreMethod::PixelDiff);
        assert!(matches!(result, Err(CompareErrorKind::NothingToCompare)));
    }
}
