//! Per-region statistics for a candidate partition
//!
//! For each region the evaluator accumulates:
//!
//! - weight: total histogram mass of the region
//! - mean: `sum(p * i) / weight`
//! - variance: `sum(p * (i - mean)^2)`, weighted by histogram mass and
//!   not divided again by the region weight
//!
//! The objective of a partition is `sum(variance * weight)` over regions.
//! A partition with any empty region has no statistics at all.

use crate::region::{MAX_REGIONS, Thresholds, region_of};
use multiotsu_core::Histogram;

/// Statistics of one contiguous region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionStats {
    /// Probability mass of the region
    pub weight: f64,
    /// Mean intensity
    pub mean: f64,
    /// Mass-weighted squared deviation from the mean
    pub variance: f64,
}

/// Statistics of every region of a partition, in region order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionStats {
    regions: [RegionStats; MAX_REGIONS],
    count: usize,
}

impl PartitionStats {
    /// Per-region statistics, region 0 first
    pub fn regions(&self) -> &[RegionStats] {
        &self.regions[..self.count]
    }

    /// Sum of variance times weight over all regions
    pub fn objective(&self) -> f64 {
        self.regions().iter().map(|r| r.variance * r.weight).sum()
    }

    /// Sum of region weights
    pub fn total_weight(&self) -> f64 {
        self.regions().iter().map(|r| r.weight).sum()
    }
}

/// Evaluate the partition of `hist` defined by `thresholds`.
///
/// Returns `None` when some region has zero weight.
///
/// # Example
///
/// ```
/// use multiotsu_core::Histogram;
/// use multiotsu_threshold::{Thresholds, evaluate};
///
/// let hist = Histogram::from_levels(&[(10, 1.0), (20, 1.0), (200, 2.0)]).unwrap();
/// let stats = evaluate(&hist, &Thresholds::new(&[100]).unwrap()).unwrap();
/// assert_eq!(stats.regions()[0].mean, 15.0);
/// assert_eq!(stats.regions()[1].variance, 0.0);
///
/// // Nothing lies above 200
/// assert!(evaluate(&hist, &Thresholds::new(&[200]).unwrap()).is_none());
/// ```
pub fn evaluate(hist: &Histogram, thresholds: &Thresholds) -> Option<PartitionStats> {
    let levels: Vec<(u8, f64)> = hist.present_levels().collect();
    evaluate_levels(&levels, thresholds.as_slice())
}

/// Objective of the partition, or `None` if it is degenerate
pub fn objective(hist: &Histogram, thresholds: &Thresholds) -> Option<f64> {
    evaluate(hist, thresholds).map(|s| s.objective())
}

/// Evaluate over the non-empty `(level, mass)` entries of a histogram.
///
/// Empty levels contribute nothing to any sum, so skipping them gives the
/// same result as walking all 256 entries.
pub(crate) fn evaluate_levels(levels: &[(u8, f64)], cuts: &[u8]) -> Option<PartitionStats> {
    let count = cuts.len() + 1;
    let mut weight = [0.0f64; MAX_REGIONS];
    let mut moment = [0.0f64; MAX_REGIONS];

    for &(level, p) in levels {
        let r = region_of(level, cuts);
        weight[r] += p;
        moment[r] += p * f64::from(level);
    }

    if weight[..count].iter().any(|&w| w == 0.0) {
        return None;
    }

    let mut regions = [RegionStats::default(); MAX_REGIONS];
    for (region, (&w, &m)) in regions.iter_mut().zip(weight.iter().zip(&moment)).take(count) {
        region.weight = w;
        region.mean = m / w;
    }

    for &(level, p) in levels {
        let region = &mut regions[region_of(level, cuts)];
        let d = f64::from(level) - region.mean;
        region.variance += p * d * d;
    }

    Some(PartitionStats { regions, count })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(levels: &[u8]) -> Thresholds {
        Thresholds::new(levels).unwrap()
    }

    #[test]
    fn test_two_point_histogram() {
        let hist = Histogram::from_levels(&[(0, 0.5), (255, 0.5)]).unwrap();
        let stats = evaluate(&hist, &t(&[0])).unwrap();
        let r = stats.regions();
        assert_eq!(r.len(), 2);
        assert_eq!((r[0].weight, r[0].mean, r[0].variance), (0.5, 0.0, 0.0));
        assert_eq!((r[1].weight, r[1].mean, r[1].variance), (0.5, 255.0, 0.0));
        assert_eq!(stats.objective(), 0.0);
    }

    #[test]
    fn test_variance_not_normalized_by_weight() {
        // Region 0 = {0: 0.25, 2: 0.25}, mean 1
        // variance = 0.25 * 1 + 0.25 * 1 = 0.5; objective term = 0.5 * 0.5
        let hist = Histogram::from_levels(&[(0, 1.0), (2, 1.0), (100, 2.0)]).unwrap();
        let stats = evaluate(&hist, &t(&[50])).unwrap();
        let r0 = stats.regions()[0];
        assert_eq!(r0.weight, 0.5);
        assert_eq!(r0.mean, 1.0);
        assert!((r0.variance - 0.5).abs() < 1e-12);
        assert!((stats.objective() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_weights_sum_to_total() {
        let hist = Histogram::uniform();
        for cuts in [&[127u8][..], &[10, 200], &[0, 1, 254]] {
            let stats = evaluate(&hist, &t(cuts)).unwrap();
            assert!((stats.total_weight() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_region() {
        let hist = Histogram::from_levels(&[(10, 1.0), (20, 1.0)]).unwrap();
        // Middle region (10, 15] is empty
        assert!(evaluate(&hist, &t(&[10, 15])).is_none());
        // Last region above 20 is empty
        assert!(objective(&hist, &t(&[10, 20])).is_none());
        assert!(objective(&hist, &t(&[10])).is_some());
    }

    #[test]
    fn test_sparse_matches_dense_walk() {
        let hist = Histogram::from_levels(&[(3, 2.0), (40, 1.0), (41, 5.0), (250, 1.0)]).unwrap();
        let dense: Vec<(u8, f64)> = (0..=255u8).map(|l| (l, hist.mass(l))).collect();
        let sparse: Vec<(u8, f64)> = hist.present_levels().collect();
        let cuts = [3u8, 40];
        assert_eq!(evaluate_levels(&dense, &cuts), evaluate_levels(&sparse, &cuts));
    }
}
