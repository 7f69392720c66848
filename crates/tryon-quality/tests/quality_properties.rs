// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end behaviour of the quality gate on encoded photos.

mod common;

use common::{checkerboard, horizontal_gradient, jpeg, png, solid, upscale};
use tryon_core::{EncodedImage, IssueKind, QualityVerdict};
use tryon_quality::{ImageQualityAnalyzer, analyze};

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[test]
fn narrow_or_short_photos_are_low_resolution() {
    for (w, h) in [(299, 1000), (1000, 299), (120, 120), (299, 299)] {
        let verdict = analyze(&png(&checkerboard(w, h, 10)));
        assert!(
            verdict.has(IssueKind::LowResolution),
            "{w}x{h} should be low resolution"
        );
    }
}

#[test]
fn exactly_minimum_size_is_not_low_resolution() {
    let verdict = analyze(&png(&checkerboard(300, 300, 10)));
    assert!(!verdict.has(IssueKind::LowResolution));
}

#[test]
fn small_gray_png_is_low_resolution_and_blurry() {
    let verdict = analyze(&png(&solid(100, 100, [128, 128, 128])));
    assert_eq!(
        verdict.issues(),
        &[IssueKind::LowResolution, IssueKind::Blurry]
    );
    assert!(!verdict.is_acceptable());
}

// ---------------------------------------------------------------------------
// Brightness and sharpness
// ---------------------------------------------------------------------------

#[test]
fn black_photo_is_dark_and_blurry() {
    let verdict = analyze(&png(&solid(400, 400, [0, 0, 0])));
    assert_eq!(verdict.issues(), &[IssueKind::TooDark, IssueKind::Blurry]);
}

#[test]
fn near_black_photo_is_dark_and_blurry() {
    let verdict = analyze(&png(&solid(640, 480, [40, 45, 50])));
    assert_eq!(verdict.issues(), &[IssueKind::TooDark, IssueKind::Blurry]);
}

#[test]
fn checkerboard_passes_without_downsampling() {
    let verdict = analyze(&png(&checkerboard(400, 400, 8)));
    assert_eq!(verdict, QualityVerdict::accept());
}

#[test]
fn checkerboard_passes_after_downsampling() {
    let analyzer = ImageQualityAnalyzer::default();
    let assessment = analyzer.analyze_detailed(&png(&checkerboard(1000, 1000, 20)));
    assert!(assessment.verdict.is_acceptable());

    let metrics = assessment.metrics.expect("decoded");
    assert_eq!((metrics.native_width, metrics.native_height), (1000, 1000));
    assert_eq!((metrics.analysis_width, metrics.analysis_height), (500, 500));
    assert!(metrics.laplacian_variance.unwrap() > 100.0);
}

#[test]
fn fine_checkerboard_survives_halving_but_single_pixel_cells_do_not() {
    // At 1000x1000 the analysis raster is 500x500, so every 2x2 block is
    // averaged. Cells of 2 or 3 pixels keep their edges through that.
    for cell in [2, 3] {
        let verdict = analyze(&png(&checkerboard(1000, 1000, cell)));
        assert!(verdict.is_acceptable(), "cell {cell}: got {:?}", verdict.issues());
    }

    // 1-pixel cells average to flat gray: bright enough, but no edges left.
    let assessment = ImageQualityAnalyzer::default()
        .analyze_detailed(&png(&checkerboard(1000, 1000, 1)));
    assert_eq!(assessment.verdict.issues(), &[IssueKind::Blurry]);
    let metrics = assessment.metrics.expect("decoded");
    assert!(metrics.avg_brightness.unwrap() > 100.0);
    assert!(metrics.laplacian_variance.unwrap() < 1.0);
}

#[test]
fn jpeg_checkerboard_passes() {
    let verdict = analyze(&jpeg(&checkerboard(800, 600, 16), 90));
    assert!(verdict.is_acceptable(), "got {:?}", verdict.issues());
}

// ---------------------------------------------------------------------------
// Scale robustness
// ---------------------------------------------------------------------------

#[test]
fn upscaled_small_source_is_blurry_but_not_low_resolution() {
    let source = horizontal_gradient(250, 250);
    let enlarged = upscale(&source, 1000, 1000);

    let small = analyze(&png(&source));
    assert_eq!(small.issues(), &[IssueKind::LowResolution, IssueKind::Blurry]);

    let large = analyze(&png(&enlarged));
    assert_eq!(large.issues(), &[IssueKind::Blurry]);
}

#[test]
fn native_soft_photo_is_blurry() {
    let verdict = analyze(&png(&horizontal_gradient(1000, 1000)));
    assert_eq!(verdict.issues(), &[IssueKind::Blurry]);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn same_bytes_same_verdict() {
    let image = jpeg(&checkerboard(700, 500, 3), 75);
    let analyzer = ImageQualityAnalyzer::default();

    let first = analyzer.analyze_detailed(&image);
    let second = analyzer.analyze_detailed(&image.clone());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Permissive failure
// ---------------------------------------------------------------------------

#[test]
fn malformed_inputs_are_accepted() {
    let valid = png(&checkerboard(320, 320, 4));
    let mut truncated = valid.bytes().to_vec();
    truncated.truncate(33);
    let mut corrupted = valid.bytes().to_vec();
    for byte in corrupted.iter_mut().skip(16) {
        *byte = 0xAB;
    }

    let inputs = [
        EncodedImage::from_bytes(Vec::new(), "image/png"),
        EncodedImage::from_bytes(b"definitely not an image".to_vec(), "image/jpeg"),
        EncodedImage::from_bytes(b"plain text".to_vec(), "text/plain"),
        EncodedImage::from_bytes(truncated, "image/png"),
        EncodedImage::from_bytes(corrupted, "image/png"),
    ];

    for input in &inputs {
        let assessment = ImageQualityAnalyzer::default().analyze_detailed(input);
        assert_eq!(assessment.verdict, QualityVerdict::accept());
        assert!(assessment.metrics.is_none());
    }
}

#[test]
fn data_url_input_is_analyzed() {
    let url = png(&solid(100, 100, [128, 128, 128])).to_data_url();
    let verdict = ImageQualityAnalyzer::default().analyze_data_url(&url);
    assert_eq!(
        verdict.issues(),
        &[IssueKind::LowResolution, IssueKind::Blurry]
    );
}

#[test]
fn broken_data_url_is_accepted() {
    let analyzer = ImageQualityAnalyzer::default();
    assert!(analyzer.analyze_data_url("data:image/png;base64,!!!").is_acceptable());
    assert!(analyzer.analyze_data_url("not a url at all").is_acceptable());
}
