//! Histogram regression test
//!
//! Builds intensity histograms from synthetic gray and RGB images and
//! checks normalization, subsampling and the grayscale conversion.

use multiotsu_core::{Histogram, PixelDepth, rgb_to_gray};
use multiotsu_test::{RegParams, synth};

#[test]
fn histogram_reg() {
    let mut rp = RegParams::new("histogram");

    // --- Test 1: ramp covers every level equally ---
    eprintln!("=== Ramp ===");
    let ramp = synth::ramp_gray(512, 3).expect("ramp");
    let hist = ramp.gray_histogram(1).expect("histogram");
    rp.compare_values(256.0, hist.distinct_levels() as f64, 0.0);
    rp.compare_values(1.0, hist.total_mass(), 1e-12);
    rp.compare_values(1.0 / 256.0, hist.mass(0), 1e-15);
    rp.compare_values(1.0 / 256.0, hist.mass(255), 1e-15);
    rp.compare_values(127.5, hist.mean(), 1e-9);
    rp.check(hist == Histogram::uniform(), "ramp histogram is uniform");

    // --- Test 2: subsampling ---
    eprintln!("=== Subsampling ===");
    let counts = ramp.gray_counts(2).expect("counts");
    rp.compare_values(512.0, counts.iter().sum::<u64>() as f64, 0.0);
    rp.compare_values(0.0, counts[1] as f64, 0.0);
    rp.compare_values(4.0, counts[2] as f64, 0.0);
    rp.check(ramp.gray_counts(0).is_err(), "factor 0 rejected");

    // --- Test 3: bimodal masses ---
    eprintln!("=== Bimodal ===");
    let bimodal = synth::bimodal_gray(10, 10, 10, 240).expect("bimodal");
    let hist = bimodal.gray_histogram(1).expect("histogram");
    rp.compare_values(0.5, hist.mass(10), 0.0);
    rp.compare_values(0.5, hist.mass(240), 0.0);
    rp.compare_values(2.0, hist.distinct_levels() as f64, 0.0);

    // --- Test 4: RGB goes through the fixed gray formula ---
    eprintln!("=== RGB to gray ===");
    rp.compare_values(0.0, f64::from(rgb_to_gray(1, 1, 1)), 0.0);
    rp.compare_values(140.0, f64::from(rgb_to_gray(100, 150, 200)), 0.0);
    rp.compare_values(76.0, f64::from(rgb_to_gray(255, 0, 0)), 0.0);
    rp.compare_values(29.0, f64::from(rgb_to_gray(0, 0, 255)), 0.0);

    let rgb = synth::gray_to_rgb(&bimodal).expect("rgb");
    rp.check(
        rgb.gray_histogram(1).is_err(),
        "32 bpp needs conversion before counting",
    );
    let gray = rgb.convert_to_gray().expect("convert");
    rp.check(gray.depth() == PixelDepth::Bit8, "converted to 8 bpp");
    rp.compare_pix(&bimodal, &gray);

    assert!(rp.cleanup(), "histogram regression test failed");
}
