//! Region counts, threshold tuples and segmentation results
//!
//! A tuple of K-1 strictly increasing cut points splits the intensity range
//! [0, 255] into K contiguous regions:
//!
//! - region 0 holds levels `<= t1`
//! - region i holds levels in `(t_i, t_{i+1}]`
//! - the last region holds levels `> t_{K-1}`
//!
//! Search and rendering both go through [`region_of`], so a level is
//! always assigned to the same region in both places.

use crate::{ThresholdError, ThresholdResult};
use std::fmt;
use std::str::FromStr;

/// Largest supported number of regions
pub const MAX_REGIONS: usize = 4;

/// Largest supported number of thresholds
pub const MAX_THRESHOLDS: usize = MAX_REGIONS - 1;

/// Number of tonal regions to split an image into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionCount {
    /// Binary Otsu: one threshold
    Two = 2,
    /// Two thresholds
    Three = 3,
    /// Three thresholds
    Four = 4,
}

impl RegionCount {
    /// All supported counts, in the order they are searched and compared
    pub const ALL: [RegionCount; 3] = [RegionCount::Two, RegionCount::Three, RegionCount::Four];

    /// Number of regions (K)
    pub fn regions(self) -> usize {
        self as usize
    }

    /// Number of thresholds (K - 1)
    pub fn thresholds(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u32> for RegionCount {
    type Error = ThresholdError;

    fn try_from(value: u32) -> ThresholdResult<Self> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            _ => Err(ThresholdError::UnsupportedRegionCount(format!(
                "{} (expected 2, 3 or 4)",
                value
            ))),
        }
    }
}

impl FromStr for RegionCount {
    type Err = ThresholdError;

    fn from_str(s: &str) -> ThresholdResult<Self> {
        let value: u32 = s.trim().parse().map_err(|_| {
            ThresholdError::UnsupportedRegionCount(format!("'{}' (expected 2, 3 or 4)", s))
        })?;
        Self::try_from(value)
    }
}

impl fmt::Display for RegionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.regions())
    }
}

/// Region index of an intensity level under a set of cut points.
///
/// Counts the thresholds the level lies strictly above; `thresholds` must be
/// strictly increasing.
#[inline]
pub fn region_of(level: u8, thresholds: &[u8]) -> usize {
    thresholds.iter().take_while(|&&t| level > t).count()
}

/// Strictly increasing tuple of 1 to 3 threshold levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Thresholds {
    values: [u8; MAX_THRESHOLDS],
    len: u8,
}

impl Thresholds {
    /// Build a tuple from explicit levels.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError::UnsupportedRegionCount`] for fewer than 1 or
    /// more than 3 levels, and [`ThresholdError::InvalidParameters`] if the
    /// levels are not strictly increasing.
    pub fn new(levels: &[u8]) -> ThresholdResult<Self> {
        if levels.is_empty() || levels.len() > MAX_THRESHOLDS {
            return Err(ThresholdError::UnsupportedRegionCount(format!(
                "{} thresholds (expected 1 to {})",
                levels.len(),
                MAX_THRESHOLDS
            )));
        }
        if levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ThresholdError::InvalidParameters(format!(
                "thresholds must be strictly increasing: {:?}",
                levels
            )));
        }
        Ok(Self::from_sorted(levels))
    }

    /// Build from levels already known to be increasing and 1..=3 long.
    pub(crate) fn from_sorted(levels: &[u8]) -> Self {
        debug_assert!(!levels.is_empty() && levels.len() <= MAX_THRESHOLDS);
        let mut values = [0u8; MAX_THRESHOLDS];
        values[..levels.len()].copy_from_slice(levels);
        Self {
            values,
            len: levels.len() as u8,
        }
    }

    /// The threshold levels in increasing order
    pub fn as_slice(&self) -> &[u8] {
        &self.values[..self.len as usize]
    }

    /// Number of thresholds (K - 1)
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; a tuple holds at least one threshold
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of regions these thresholds define
    pub fn region_count(&self) -> RegionCount {
        match self.len {
            1 => RegionCount::Two,
            2 => RegionCount::Three,
            _ => RegionCount::Four,
        }
    }

    /// Region index of `level`
    #[inline]
    pub fn region_of(&self, level: u8) -> usize {
        region_of(level, self.as_slice())
    }
}

impl fmt::Display for Thresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, t) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", t)?;
        }
        write!(f, "]")
    }
}

/// Best partition found for one region count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmentation {
    /// Sum over regions of variance times weight; never negative
    pub objective: f64,
    /// The winning cut points
    pub thresholds: Thresholds,
    /// Number of regions
    pub region_count: RegionCount,
}

impl Segmentation {
    /// Create a result; the region count follows from the thresholds.
    pub fn new(objective: f64, thresholds: Thresholds) -> Self {
        Self {
            objective,
            region_count: thresholds.region_count(),
            thresholds,
        }
    }
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "K={} thresholds={} objective={:.6}",
            self.region_count, self.thresholds, self.objective
        )
    }
}
