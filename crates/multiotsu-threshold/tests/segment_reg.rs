//! Segmentation regression test
//!
//! Runs the full image pipeline on synthetic gray and RGB images and checks
//! the selected thresholds and the rendered colors.

use multiotsu_core::{ImageFormat, PixelDepth, color};
use multiotsu_test::{RegParams, synth};
use multiotsu_threshold::{
    PALETTE_FOUR, RegionCount, SegmentOptions, ThresholdError, find_thresholds, segment_image,
};

#[test]
fn segment_reg() {
    let mut rp = RegParams::new("segment");

    // --- Test 1: bimodal gray image, binary split ---
    eprintln!("=== Bimodal K=2 ===");
    let bimodal = synth::bimodal_gray(40, 30, 10, 240).expect("bimodal");
    let opts = SegmentOptions::for_counts(&[RegionCount::Two]);
    let out = segment_image(&bimodal, &opts).expect("segment bimodal");
    let t = out.report.selected.thresholds.as_slice()[0];
    rp.check((10..240).contains(&t), "threshold strictly between the modes");
    rp.compare_values(
        600.0,
        synth::count_color(&out.image, color::BLACK) as f64,
        0.0,
    );
    rp.compare_values(
        600.0,
        synth::count_color(&out.image, color::WHITE) as f64,
        0.0,
    );
    rp.check(out.image.depth() == PixelDepth::Bit32, "output is 32 bpp");
    rp.check(
        out.image.width() == bimodal.width() && out.image.height() == bimodal.height(),
        "output has input size",
    );
    rp.write_pix_and_check(&out.image, ImageFormat::Bmp)
        .expect("write bimodal");
    eprintln!("  {}", out.report.selected);

    // --- Test 2: RGB input gives the same answer as its gray version ---
    eprintln!("=== RGB input ===");
    let rgb = synth::gray_to_rgb(&bimodal).expect("rgb");
    let out_rgb = segment_image(&rgb, &opts).expect("segment rgb");
    rp.check(
        out_rgb.report.selected == out.report.selected,
        "RGB and gray select the same thresholds",
    );
    rp.compare_pix(&out.image, &out_rgb.image);

    // --- Test 3: four clusters, all region counts ---
    eprintln!("=== Four clusters ===");
    let levels = [20u8, 90, 160, 230];
    let pixs = synth::cycle_gray(16, 8, &levels).expect("cycle");
    let out = segment_image(&pixs, &SegmentOptions::default()).expect("segment cycle");
    let report = &out.report;
    rp.check(report.results.len() == 3, "one result per region count");
    rp.check(
        report.selected.region_count == RegionCount::Four,
        "four clusters select K=4",
    );
    rp.check(
        report.selected.thresholds.as_slice() == [20, 90, 160],
        "K=4 cuts directly after each cluster",
    );
    for (i, &c) in PALETTE_FOUR.iter().enumerate() {
        rp.compare_values(
            32.0,
            synth::count_color(&out.image, c) as f64,
            0.0,
        );
        rp.check(
            out.image.get_pixel(i as u32, 0) == Some(c),
            "cluster order maps to palette order",
        );
    }
    rp.write_pix_and_check(&out.image, ImageFormat::Png)
        .expect("write four clusters");
    for (count, seg) in &report.results {
        match seg {
            Some(seg) => eprintln!("  K={}: {}", count, seg),
            None => eprintln!("  K={}: none", count),
        }
    }

    // --- Test 4: sequential and subsampled searches ---
    eprintln!("=== Options ===");
    let seq = find_thresholds(&pixs, &SegmentOptions::default().with_parallel(false))
        .expect("sequential");
    rp.check(seq == out.report, "sequential report matches parallel");
    let sub = find_thresholds(&bimodal, &opts.clone().with_sample_factor(3))
        .expect("subsampled");
    let t = sub.selected.thresholds.as_slice()[0];
    rp.check((10..240).contains(&t), "subsampling keeps both modes");

    // --- Test 5: flat image ---
    eprintln!("=== Flat image ===");
    let flat = synth::cycle_gray(8, 8, &[128]).expect("flat");
    rp.check(
        matches!(
            segment_image(&flat, &SegmentOptions::default()),
            Err(ThresholdError::NoValidPartition)
        ),
        "flat image has no valid partition",
    );

    assert!(rp.cleanup(), "segment regression test failed");
}
