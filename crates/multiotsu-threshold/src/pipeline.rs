//! Image-level segmentation
//!
//! image -> intensities -> histogram -> per-K search -> selection -> render

use crate::options::SegmentOptions;
use crate::region::{RegionCount, Segmentation};
use crate::render::{default_palette, render_with_palette};
use crate::search::search;
use crate::select::select_best;
use crate::ThresholdResult;
use multiotsu_core::{Histogram, Pix};

/// Per-K search results and the selected one
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// One entry per searched region count, in search order; `None` where
    /// no valid partition exists
    pub results: Vec<(RegionCount, Option<Segmentation>)>,
    /// The result with the lowest objective
    pub selected: Segmentation,
}

/// Rendered image plus the search that produced it
#[derive(Debug, Clone)]
pub struct SegmentOutput {
    /// 32 bpp image, one color per region
    pub image: Pix,
    /// Search results
    pub report: SearchReport,
}

/// Run every requested search on a histogram and select the best result.
pub fn search_histogram(hist: &Histogram, options: &SegmentOptions) -> ThresholdResult<SearchReport> {
    options.validate()?;

    let results: Vec<(RegionCount, Option<Segmentation>)> = options
        .region_counts
        .iter()
        .map(|&count| (count, search(hist, count, options.parallel)))
        .collect();

    let selected = select_best(results.iter().map(|(_, seg)| *seg))?;
    log::info!("selected {}", selected);

    Ok(SearchReport { results, selected })
}

/// Compute the histogram of `pix` and search it.
///
/// 32 bpp input is converted to intensities first.
pub fn find_thresholds(pix: &Pix, options: &SegmentOptions) -> ThresholdResult<SearchReport> {
    options.validate()?;

    let gray = pix.convert_to_gray()?;
    let hist = gray.gray_histogram(options.sample_factor)?;
    log::debug!(
        "{}x{} image, {} distinct levels, mean {:.3}",
        gray.width(),
        gray.height(),
        hist.distinct_levels(),
        hist.mean()
    );

    search_histogram(&hist, options)
}

/// Segment `pix` into the best of the requested region counts and render it.
///
/// # Errors
///
/// - [`ThresholdError::NoValidPartition`](crate::ThresholdError::NoValidPartition)
///   if the image has too few distinct intensities for every requested K
/// - [`ThresholdError::UnsupportedRegionCount`](crate::ThresholdError::UnsupportedRegionCount)
///   if a custom palette does not fit the selected region count
pub fn segment_image(pix: &Pix, options: &SegmentOptions) -> ThresholdResult<SegmentOutput> {
    let report = find_thresholds(pix, options)?;
    let selected = report.selected;

    let palette = match &options.palette {
        Some(p) => p.as_slice(),
        None => default_palette(selected.region_count),
    };
    let image = render_with_palette(pix, &selected.thresholds, palette)?;

    Ok(SegmentOutput { image, report })
}
