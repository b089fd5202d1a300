//! Exhaustive threshold search
//!
//! Enumerates every strictly increasing tuple of K-1 levels in [0, 255] in
//! lexicographic order, evaluates each with [`crate::stats`], and keeps the
//! tuple with the lowest objective. The first tuple in enumeration order
//! wins ties, and degenerate tuples are skipped.
//!
//! The parallel search splits the work by the first threshold `t1`. Each
//! branch scans its own tuples in order, then branch results are reduced
//! left to right with the same strict comparison, so it returns exactly
//! what the sequential scan returns.

use crate::region::{MAX_THRESHOLDS, RegionCount, Segmentation, Thresholds};
use crate::stats::evaluate_levels;
use multiotsu_core::Histogram;
use rayon::prelude::*;
use std::time::Instant;

const MAX_LEVEL: u16 = 255;

/// Running best of a scan: objective and cut points
#[derive(Debug, Clone, Copy)]
struct Candidate {
    objective: f64,
    cuts: [u8; MAX_THRESHOLDS],
}

/// Keep `a` unless `b` is strictly better.
#[inline]
fn keep_first_min(a: Option<Candidate>, b: Option<Candidate>) -> Option<Candidate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.objective < a.objective { b } else { a }),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Best tuple among those starting with `t1`, in lexicographic order.
fn scan_branch(levels: &[(u8, f64)], count: RegionCount, t1: u16) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    let mut consider = |cuts: &[u8]| {
        if let Some(stats) = evaluate_levels(levels, cuts) {
            let objective = stats.objective();
            if best.is_none_or(|b| objective < b.objective) {
                let mut padded = [0u8; MAX_THRESHOLDS];
                padded[..cuts.len()].copy_from_slice(cuts);
                best = Some(Candidate {
                    objective,
                    cuts: padded,
                });
            }
        }
    };

    let a = t1 as u8;
    match count {
        RegionCount::Two => consider(&[a]),
        RegionCount::Three => {
            for t2 in t1 + 1..=MAX_LEVEL {
                consider(&[a, t2 as u8]);
            }
        }
        RegionCount::Four => {
            for t2 in t1 + 1..=MAX_LEVEL {
                for t3 in t2 + 1..=MAX_LEVEL {
                    consider(&[a, t2 as u8, t3 as u8]);
                }
            }
        }
    }
    best
}

/// Find the partition of `hist` into `count` regions with minimal objective.
///
/// Returns `None` if every candidate leaves some region empty, which
/// happens exactly when fewer than K distinct levels are present.
pub fn search(hist: &Histogram, count: RegionCount, parallel: bool) -> Option<Segmentation> {
    let start = Instant::now();
    let levels: Vec<(u8, f64)> = hist.present_levels().collect();

    let best = if parallel {
        (0..=MAX_LEVEL)
            .into_par_iter()
            .map(|t1| scan_branch(&levels, count, t1))
            .reduce(|| None, keep_first_min)
    } else {
        (0..=MAX_LEVEL)
            .map(|t1| scan_branch(&levels, count, t1))
            .fold(None, keep_first_min)
    };

    let result = best.map(|c| {
        Segmentation::new(
            c.objective,
            Thresholds::from_sorted(&c.cuts[..count.thresholds()]),
        )
    });

    match &result {
        Some(seg) => log::debug!(
            "K={} search: {} ({} levels, {:?})",
            count,
            seg,
            levels.len(),
            start.elapsed()
        ),
        None => log::debug!(
            "K={} search: no valid partition ({} levels, {:?})",
            count,
            levels.len(),
            start.elapsed()
        ),
    }

    result
}

/// Best single threshold (binary Otsu)
pub fn search_two(hist: &Histogram) -> Option<Segmentation> {
    search(hist, RegionCount::Two, true)
}

/// Best pair of thresholds
pub fn search_three(hist: &Histogram) -> Option<Segmentation> {
    search(hist, RegionCount::Three, true)
}

/// Best triple of thresholds
pub fn search_four(hist: &Histogram) -> Option<Segmentation> {
    search(hist, RegionCount::Four, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse(levels: &[(u8, f64)]) -> Histogram {
        Histogram::from_levels(levels).unwrap()
    }

    #[test]
    fn test_two_point_histogram() {
        let hist = sparse(&[(0, 0.5), (255, 0.5)]);
        let seg = search_two(&hist).unwrap();
        assert_eq!(seg.thresholds.as_slice(), &[0]);
        assert_eq!(seg.objective, 0.0);
        assert_eq!(seg.region_count, RegionCount::Two);
    }

    #[test]
    fn test_uniform_binary_split() {
        let seg = search(&Histogram::uniform(), RegionCount::Two, false).unwrap();
        let t = seg.thresholds.as_slice()[0];
        assert!(t == 127 || t == 128, "threshold {}", t);
    }

    #[test]
    fn test_first_tuple_wins_ties() {
        // Two identical spikes: every t in [10, 199] separates them with
        // objective 0; the first one enumerated is 10.
        let hist = sparse(&[(10, 1.0), (200, 1.0)]);
        for parallel in [false, true] {
            let seg = search(&hist, RegionCount::Two, parallel).unwrap();
            assert_eq!(seg.thresholds.as_slice(), &[10]);
        }
    }

    #[test]
    fn test_exact_partition_three() {
        let hist = sparse(&[(20, 1.0), (120, 1.0), (220, 1.0)]);
        let seg = search_three(&hist).unwrap();
        assert_eq!(seg.thresholds.as_slice(), &[20, 120]);
        assert!(seg.objective.abs() < 1e-12);
    }

    #[test]
    fn test_too_few_levels() {
        let one = sparse(&[(77, 1.0)]);
        assert!(search_two(&one).is_none());

        let two = sparse(&[(5, 1.0), (9, 1.0)]);
        assert!(search_two(&two).is_some());
        assert!(search(&two, RegionCount::Three, false).is_none());
        assert!(search(&two, RegionCount::Four, false).is_none());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let hist = sparse(&[(3, 4.0), (60, 1.0), (61, 2.0), (130, 3.0), (200, 1.0), (254, 2.0)]);
        for count in RegionCount::ALL {
            let seq = search(&hist, count, false);
            let par = search(&hist, count, true);
            assert_eq!(seq, par, "K={}", count);
            assert_eq!(seq, search(&hist, count, false));
        }
    }

    #[test]
    fn test_monotone_in_region_count() {
        let hist = sparse(&[(0, 1.0), (40, 3.0), (90, 2.0), (91, 2.0), (180, 5.0), (255, 1.0)]);
        let two = search(&hist, RegionCount::Two, true).unwrap().objective;
        let three = search(&hist, RegionCount::Three, true).unwrap().objective;
        let four = search(&hist, RegionCount::Four, true).unwrap().objective;
        assert!(four <= three + 1e-12);
        assert!(three <= two + 1e-12);
    }

    #[test]
    fn test_keep_first_min() {
        let a = Candidate {
            objective: 1.0,
            cuts: [1, 0, 0],
        };
        let b = Candidate {
            objective: 1.0,
            cuts: [2, 0, 0],
        };
        let c = Candidate {
            objective: 0.5,
            cuts: [3, 0, 0],
        };
        assert_eq!(keep_first_min(Some(a), Some(b)).unwrap().cuts[0], 1);
        assert_eq!(keep_first_min(Some(a), Some(c)).unwrap().cuts[0], 3);
        assert_eq!(keep_first_min(None, Some(b)).unwrap().cuts[0], 2);
        assert!(keep_first_min(None, None).is_none());
    }
}
