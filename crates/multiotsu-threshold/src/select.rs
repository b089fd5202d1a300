//! Choosing among the per-K results

use crate::region::Segmentation;
use crate::{ThresholdError, ThresholdResult};

/// Pick the result with the strictly smallest objective.
///
/// Results are compared in the order given, so on a tie the earlier one
/// (normally the smaller K) is kept. Objectives are compared as-is: a larger
/// region count is not penalized. Absent results are skipped.
///
/// # Errors
///
/// Returns [`ThresholdError::NoValidPartition`] if every result is absent.
pub fn select_best<I>(results: I) -> ThresholdResult<Segmentation>
where
    I: IntoIterator<Item = Option<Segmentation>>,
{
    results
        .into_iter()
        .flatten()
        .fold(None, |best: Option<Segmentation>, seg| match best {
            Some(b) if seg.objective >= b.objective => Some(b),
            _ => Some(seg),
        })
        .ok_or(ThresholdError::NoValidPartition)
}
