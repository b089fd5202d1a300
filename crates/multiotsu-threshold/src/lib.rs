//! multiotsu-threshold - Multi-level Otsu thresholding
//!
//! Splits the intensity range of an image into 2, 3 or 4 contiguous regions
//! by exhaustive search for the thresholds that minimize total within-region
//! variance:
//!
//! - **Evaluation** ([`stats`]): per-region weight, mean and variance of a
//!   candidate partition
//! - **Search** ([`mod@search`]): exhaustive scan of every threshold tuple for
//!   one region count
//! - **Selection** ([`select`]): lowest objective across region counts
//! - **Rendering** ([`render`]): one color per region
//! - **Pipeline** ([`pipeline`]): image in, rendered image and thresholds out
//!
//! # Example
//!
//! ```
//! use multiotsu_core::Histogram;
//! use multiotsu_threshold::{RegionCount, search};
//!
//! let hist = Histogram::from_levels(&[(0, 1.0), (255, 1.0)]).unwrap();
//! let seg = search(&hist, RegionCount::Two, true).unwrap();
//! assert_eq!(seg.thresholds.as_slice(), &[0]);
//! ```

pub mod error;
pub mod options;
pub mod pipeline;
pub mod region;
pub mod render;
pub mod search;
pub mod select;
pub mod stats;

pub use multiotsu_core;

pub use error::{ThresholdError, ThresholdResult};
pub use options::SegmentOptions;
pub use pipeline::{SearchReport, SegmentOutput, find_thresholds, search_histogram, segment_image};
pub use region::{MAX_REGIONS, RegionCount, Segmentation, Thresholds, region_of};
pub use render::{
    PALETTE_FOUR, PALETTE_THREE, PALETTE_TWO, default_palette, render_segmentation,
    render_with_palette,
};
pub use search::{search, search_four, search_three, search_two};
pub use select::select_best;
pub use stats::{PartitionStats, RegionStats, evaluate, objective};
