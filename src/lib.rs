//! stuncount - combat log statistics
//!
//! Scans archived MUD logs for stuns, spell and melee hits, and breath damage,
//! then compares two corpora (WITH and WITHOUT some condition) side by side.

pub mod archive;
pub mod config;
pub mod error;
pub mod patterns;
pub mod report;
pub mod scan;
pub mod stats;

use std::path::Path;

pub use archive::{analyze_archive, analyze_dir, ExtractMode};
pub use config::{Config, OutputFormat};
pub use error::AnalysisError;
pub use patterns::{LineMatch, PatternSet};
pub use report::{Report, ReportRow, StatValue};
pub use scan::{scan_lines, scan_reader, FileCounts};
pub use stats::{ArchiveStats, Tally};

/// Analyze both archives, WITH first, and build the comparison report
///
/// Either archive failing aborts the run; there is no partial report.
pub fn compare(
    patterns: &PatternSet,
    with: &Path,
    without: &Path,
    mode: ExtractMode,
) -> Result<Report, AnalysisError> {
    let with_stats = analyze_archive(patterns, with, mode)?;
    let without_stats = analyze_archive(patterns, without, mode)?;
    Ok(Report::new(&with_stats, &without_stats))
}
