use image::GrayImage;

//Mean absolute per-pixel difference mapped onto 0..=1, where 1.0 is a
//perfect match. Callers have already checked that dimensions agree.
pub(crate) fn similarity(gray_a: &GrayImage, gray_b: &GrayImage) -> f64 {
    let num_pixels = u64::from(gray_a.width()) * u64::from(gray_a.height());
    if num_pixels == 0 {
        return 1.0;
    }

    let total_diff: u64 = gray_a
        .pixels()
        .zip(gray_b.pixels())
        .map(|(pix_a, pix_b)| u64::from(pix_a[0].abs_diff(pix_b[0])))
        .sum();

    let max_diff = num_pixels * u64::from(u8::MAX);
    1.0 - (total_diff as f64 / max_diff as f64)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_black_vs_white_is_zero() {
        let black = GrayImage::from_pixel(8, 8, image::Luma([0]));
        let white = GrayImage::from_pixel(8, 8, image::Luma([255]));

        assert_eq!(similarity(&black, &white), 0.0);
        assert_eq!(similarity(&black, &black), 1.0);
    }

    #[test]
    fn test_uniform_offset_scales_linearly() {
        let black = GrayImage::from_pixel(8, 8, image::Luma([0]));
        let gray = GrayImage::from_pixel(8, 8, image::Luma([51]));

        let score = similarity(&black, &gray);
        assert!((score - 0.8).abs() < 1e-9);
    }
}
