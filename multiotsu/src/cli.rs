//! Helpers for the `multiotsu` command-line tool

use crate::threshold::SearchReport;
use std::path::{Path, PathBuf};

/// Suffix added to the input stem for the default output file
pub const OUTPUT_SUFFIX: &str = "_segmented";

/// Default output path: `<stem>_segmented.bmp` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}{}.bmp", stem, OUTPUT_SUFFIX))
}

/// Log level for a `-v` count: warn, info, debug, then trace.
pub fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// One line per searched region count, then the selected result.
pub fn report_lines(report: &SearchReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .results
        .iter()
        .map(|(count, seg)| match seg {
            Some(seg) => format!(
                "K={}: thresholds={} objective={:.6}",
                count, seg.thresholds, seg.objective
            ),
            None => format!("K={}: no valid partition", count),
        })
        .collect();
    lines.push(format!("selected: {}", report.selected));
    lines
}
