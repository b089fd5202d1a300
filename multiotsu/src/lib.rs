//! multiotsu - Multi-level Otsu segmentation
//!
//! Splits a grayscale image into 2, 3 or 4 tonal regions by choosing the
//! thresholds that minimize total within-region variance, then renders each
//! region in its own color.
//!
//! # Overview
//!
//! - Image I/O (BMP, PNG) in [`io`]
//! - Threshold search, selection and rendering in [`threshold`]
//! - `multiotsu` command-line tool built on both
//!
//! # Example
//!
//! ```
//! use multiotsu::threshold::{RegionCount, SegmentOptions, segment_image};
//! use multiotsu::{PixMut, PixelDepth};
//!
//! let mut pm = PixMut::new(4, 1, PixelDepth::Bit8).unwrap();
//! for (x, v) in [10, 10, 240, 240].into_iter().enumerate() {
//!     pm.set_pixel(x as u32, 0, v).unwrap();
//! }
//! let out = segment_image(&pm.into(), &SegmentOptions::for_counts(&[RegionCount::Two])).unwrap();
//! assert_eq!(out.report.selected.thresholds.as_slice(), &[10]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use multiotsu_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use multiotsu_io as io;
pub use multiotsu_threshold as threshold;

pub mod cli;
