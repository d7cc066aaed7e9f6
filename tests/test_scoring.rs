use image::RgbImage;
use vid_sim_lib::*;

fn ramp_frame(offset: u32) -> RgbImage {
    RgbImage::from_fn(64, 64, |x, y| {
        image::Rgb([
            ((x + offset) * 3) as u8,
            ((y + offset) * 3) as u8,
            ((x + y) * 2) as u8,
        ])
    })
}

#[test]
fn test_scoring_a_sequence_against_itself_is_100() {
    let seq = (0..5).map(ramp_frame).collect::<Vec<_>>();

    for method in [ScoreMethod::Ssim, ScoreMethod::PixelDiff] {
        let score = score_sequences(&seq, &seq, method).unwrap();
        assert!(
            (score - 100.0).abs() < 1e-6,
            "{method:?}: expected 100, got {score}"
        );
    }
}

#[test]
fn test_perturbed_sequence_scores_below_100() {
    let seq_a = (0..5).map(ramp_frame).collect::<Vec<_>>();
    let seq_b = (0..5).map(|i| ramp_frame(i + 40)).collect::<Vec<_>>();

    for method in [ScoreMethod::Ssim, ScoreMethod::PixelDiff] {
        let score = score_sequences(&seq_a, &seq_b, method).unwrap();
        assert!(score < 100.0, "{method:?}: got {score}");
    }
}

#[test]
//Length mismatch is not an error: only the index-aligned prefix pairs count.
fn test_unequal_lengths_compare_only_the_shared_prefix() {
    let seq_long = (0..6).map(ramp_frame).collect::<Vec<_>>();
    let seq_short = (0..3).map(ramp_frame).collect::<Vec<_>>();

    for method in [ScoreMethod::Ssim, ScoreMethod::PixelDiff] {
        let score = score_sequences(&seq_long, &seq_short, method).unwrap();
        assert!(
            (score - 100.0).abs() < 1e-6,
            "{method:?}: expected 100 over the shared prefix, got {score}"
        );
    }
}

#[test]
fn test_loading_a_nonexistent_image_is_an_error() {
    let result = load_image("does/not/exist.png");
    assert!(matches!(result, Err(CompareErrorKind::ImageLoad { .. })));
}

#[test]
//End to end: align two sequences on their common section, truncate both to
//the reported ranges, and score the result.
fn test_overlap_truncation_then_scoring() {
    let filler = |v: u8| RgbImage::from_pixel(64, 64, image::Rgb([v, 0, 0]));

    let common = (0..4).map(|i| ramp_frame(i * 10)).collect::<Vec<_>>();

    let mut seq1 = vec![filler(10), filler(30)];
    seq1.extend(common.iter().cloned());

    let mut seq2 = common.clone();
    seq2.push(filler(200));

    let overlap = find_overlap_in_frames(
        &seq1,
        &seq2,
        OverlapParams {
            min_match_len: 3,
            tolerance: HashTolerance::new(0),
        },
    )
    .unwrap();

    assert_eq!(overlap.first().start(), 2);
    assert_eq!(overlap.second().start(), 0);
    assert_eq!(overlap.len(), 4);

    let common_1 = &seq1[overlap.first().start()..=overlap.first().end()];
    let common_2 = &seq2[overlap.second().start()..=overlap.second().end()];

    let score = score_sequences(common_1, common_2, ScoreMethod::Ssim).unwrap();
    assert!((score - 100.0).abs() < 1e-6);
}
