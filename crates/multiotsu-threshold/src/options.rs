//! Segmentation options

use crate::region::RegionCount;
use crate::{ThresholdError, ThresholdResult};

/// Options for [`segment_image`](crate::segment_image) and
/// [`find_thresholds`](crate::find_thresholds)
///
/// # Example
///
/// ```
/// use multiotsu_threshold::{RegionCount, SegmentOptions};
///
/// let options = SegmentOptions::for_counts(&[RegionCount::Four, RegionCount::Two]);
/// assert_eq!(options.region_counts, vec![RegionCount::Two, RegionCount::Four]);
/// assert!(options.parallel);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOptions {
    /// Region counts to search, compared in this order
    pub region_counts: Vec<RegionCount>,

    /// Fan each search out over the first threshold with rayon
    ///
    /// Results are identical either way.
    pub parallel: bool,

    /// Histogram subsampling factor; 1 counts every pixel
    pub sample_factor: u32,

    /// Colors for the output regions, darkest first
    ///
    /// `None` uses [`default_palette`](crate::default_palette). A custom
    /// palette only renders results whose region count equals its length.
    pub palette: Option<Vec<u32>>,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            region_counts: RegionCount::ALL.to_vec(),
            parallel: true,
            sample_factor: 1,
            palette: None,
        }
    }
}

impl SegmentOptions {
    /// Search only the given region counts.
    ///
    /// Counts are sorted ascending and deduplicated so that ties between
    /// region counts always resolve toward the smaller K.
    pub fn for_counts(counts: &[RegionCount]) -> Self {
        let mut region_counts = counts.to_vec();
        region_counts.sort_unstable();
        region_counts.dedup();
        Self {
            region_counts,
            ..Default::default()
        }
    }

    /// Set the parallel flag
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Use a custom palette
    pub fn with_palette(mut self, palette: Vec<u32>) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Set the histogram subsampling factor
    pub fn with_sample_factor(mut self, factor: u32) -> Self {
        self.sample_factor = factor;
        self
    }

    /// Check the options before any work is done.
    ///
    /// # Errors
    ///
    /// - [`ThresholdError::InvalidParameters`] if no region count is given or
    ///   the sample factor is 0
    /// - [`ThresholdError::UnsupportedRegionCount`] if a custom palette
    ///   matches none of the requested region counts
    pub fn validate(&self) -> ThresholdResult<()> {
        if self.region_counts.is_empty() {
            return Err(ThresholdError::InvalidParameters(
                "at least one region count is required".to_string(),
            ));
        }
        if self.sample_factor == 0 {
            return Err(ThresholdError::InvalidParameters(
                "sample factor must be >= 1".to_string(),
            ));
        }
        if let Some(palette) = &self.palette
            && !self
                .region_counts
                .iter()
                .any(|c| c.regions() == palette.len())
        {
            return Err(ThresholdError::UnsupportedRegionCount(format!(
                "palette has {} colors but searched region counts are {:?}",
                palette.len(),
                self.region_counts
            )));
        }
        Ok(())
    }
}
