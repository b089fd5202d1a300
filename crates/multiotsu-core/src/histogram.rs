//! Normalized intensity histogram
//!
//! A [`Histogram`] is a probability mass function over the 256 levels of an
//! 8-bit intensity image. Every level is always present in the backing
//! array; absent intensities simply carry zero mass.

use crate::error::{Error, Result};

/// Number of intensity levels in an 8-bit image.
pub const LEVELS: usize = 256;

/// Probability mass over intensity levels 0..=255.
///
/// Masses are non-negative and sum to 1.0 (up to rounding). Built once per
/// image and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    mass: [f64; LEVELS],
}

impl Histogram {
    /// Build a histogram from raw occurrence counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHistogram`] if every count is zero.
    pub fn from_counts(counts: &[u64; LEVELS]) -> Result<Self> {
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return Err(Error::EmptyHistogram);
        }
        let total = total as f64;
        let mut mass = [0.0; LEVELS];
        for (m, &c) in mass.iter_mut().zip(counts) {
            *m = c as f64 / total;
        }
        Ok(Self { mass })
    }

    /// Build a histogram from unnormalized weights, one per level.
    ///
    /// `weights` may be shorter than 256; missing levels get zero mass.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for more than 256 entries or any
    /// negative / non-finite weight, and [`Error::EmptyHistogram`] if the
    /// weights sum to zero.
    pub fn from_weights(weights: &[f64]) -> Result<Self> {
        if weights.len() > LEVELS {
            return Err(Error::InvalidParameter(format!(
                "histogram has {} levels, at most {} allowed",
                weights.len(),
                LEVELS
            )));
        }
        if let Some((level, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(Error::InvalidParameter(format!(
                "weight {w} at level {level} must be finite and >= 0"
            )));
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(Error::EmptyHistogram);
        }

        let mut mass = [0.0; LEVELS];
        for (m, &w) in mass.iter_mut().zip(weights) {
            *m = w / total;
        }
        Ok(Self { mass })
    }

    /// Build a histogram from sparse `(level, weight)` pairs.
    ///
    /// Repeated levels accumulate. Weights are normalized like
    /// [`Histogram::from_weights`].
    pub fn from_levels(levels: &[(u8, f64)]) -> Result<Self> {
        let mut weights = [0.0; LEVELS];
        for &(level, w) in levels {
            weights[level as usize] += w;
        }
        Self::from_weights(&weights)
    }

    /// Flat histogram with mass 1/256 on every level.
    pub fn uniform() -> Self {
        Self {
            mass: [1.0 / LEVELS as f64; LEVELS],
        }
    }

    /// Mass at a single level.
    #[inline]
    pub fn mass(&self, level: u8) -> f64 {
        self.mass[level as usize]
    }

    /// The full level-indexed mass array.
    #[inline]
    pub fn masses(&self) -> &[f64; LEVELS] {
        &self.mass
    }

    /// Sum of all masses (1.0 up to rounding).
    pub fn total_mass(&self) -> f64 {
        self.mass.iter().sum()
    }

    /// Iterate over `(level, mass)` for levels with non-zero mass, ascending.
    pub fn present_levels(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.mass
            .iter()
            .enumerate()
            .filter(|(_, m)| **m > 0.0)
            .map(|(level, &m)| (level as u8, m))
    }

    /// Number of levels with non-zero mass.
    pub fn distinct_levels(&self) -> usize {
        self.mass.iter().filter(|m| **m > 0.0).count()
    }

    /// Mean intensity over the whole histogram.
    pub fn mean(&self) -> f64 {
        self.present_levels()
            .map(|(level, m)| f64::from(level) * m)
            .sum()
    }
}
