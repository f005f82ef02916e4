//! Assembled report: every view of a scan in display order.

use std::path::PathBuf;

use compact_str::CompactString;
use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use treetally_core::{FileEntry, ScanResult};

use crate::ranking::{folders_by_size, top_files, type_breakdown};
use crate::redundancy::{
    RedundancyMode, RedundantTotals, duplicates_by_name, duplicates_by_size, redundant_totals,
};

/// Configuration for report assembly.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ReportConfig {
    /// Number of largest files to list.
    #[builder(default = "10")]
    pub top_n: usize,

    /// How overlapping name/size groups are totalled.
    #[builder(default)]
    pub redundancy_mode: RedundancyMode,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            redundancy_mode: RedundancyMode::Combined,
        }
    }
}

impl ReportConfig {
    /// Create a new config builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }
}

/// All report views derived from one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Root path that was scanned.
    pub root_path: PathBuf,
    /// Child-directory entries seen while walking.
    pub subfolder_count: u64,
    /// Number of regular files.
    pub total_files: u64,
    /// Bytes across all files.
    pub total_size: u64,
    /// Requested length of `top_files`.
    pub top_n: usize,
    /// Largest files, largest first.
    pub top_files: Vec<FileEntry>,
    /// Names shared by two or more files.
    pub redundant_by_name: IndexMap<CompactString, Vec<PathBuf>>,
    /// Sizes shared by two or more files.
    pub redundant_by_size: IndexMap<u64, Vec<PathBuf>>,
    /// Totals over both redundancy groupings.
    pub redundant_totals: RedundantTotals,
    /// Mode used for `redundant_totals`.
    pub redundancy_mode: RedundancyMode,
    /// Folders by the bytes of their direct files, largest first.
    pub folders: Vec<(PathBuf, u64)>,
    /// Extension -> bytes.
    pub type_breakdown: IndexMap<CompactString, u64>,
    /// Entries skipped during the scan.
    pub warning_count: usize,
}

/// Builds a [`Report`] from a scan result.
pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    /// Create a report builder with default config.
    pub fn new() -> Self {
        Self {
            config: ReportConfig::default(),
        }
    }

    /// Create a report builder with custom config.
    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Derive every view from `result`.
    pub fn build(&self, result: &ScanResult) -> Report {
        let report = Report {
            root_path: result.root_path.clone(),
            subfolder_count: result.subfolder_count,
            total_files: result.total_files(),
            total_size: result.total_size(),
            top_n: self.config.top_n,
            top_files: top_files(result, self.config.top_n),
            redundant_by_name: duplicates_by_name(result),
            redundant_by_size: duplicates_by_size(result),
            redundant_totals: redundant_totals(result, self.config.redundancy_mode),
            redundancy_mode: self.config.redundancy_mode,
            folders: folders_by_size(result),
            type_breakdown: type_breakdown(result),
            warning_count: result.warnings.len(),
        };

        debug!(
            name_groups = report.redundant_by_name.len(),
            size_groups = report.redundant_by_size.len(),
            redundant = report.redundant_totals.count,
            "report built"
        );
        report
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;
    use treetally_core::ScanAccumulator;

    #[test]
    fn test_config_builder() {
        let config = ReportConfig::builder()
            .top_n(3usize)
            .redundancy_mode(RedundancyMode::Distinct)
            .build()
            .unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.redundancy_mode, RedundancyMode::Distinct);

        let defaults = ReportConfig::builder().build().unwrap();
        assert_eq!(defaults.top_n, 10);
        assert_eq!(defaults.redundancy_mode, RedundancyMode::Combined);
    }

    #[test]
    fn test_build_respects_top_n() {
        let mut acc = ScanAccumulator::new("/r");
        acc.enter_directory(Path::new("/r"));
        for i in 0..15u64 {
            acc.record_file(Path::new("/r"), PathBuf::from(format!("/r/f{i}")), i);
        }
        let result = acc.finish(Duration::ZERO);

        let config = ReportConfig::builder().top_n(5usize).build().unwrap();
        let report = ReportBuilder::with_config(config).build(&result);
        assert_eq!(report.top_files.len(), 5);
        assert_eq!(report.top_files[0].size, 14);
        assert_eq!(report.total_files, 15);
        assert_eq!(report.total_size, (0..15).sum::<u64>());
        assert!(report.redundant_by_name.is_empty());
        assert!(report.redundant_by_size.is_empty());
    }

    #[test]
    fn test_empty_scan_report() {
        let report = ReportBuilder::new().build(&ScanResult::default());
        assert!(report.top_files.is_empty());
        assert!(report.redundant_by_name.is_empty());
        assert!(report.redundant_by_size.is_empty());
        assert_eq!(report.redundant_totals, RedundantTotals::default());
        assert!(report.type_breakdown.is_empty());
    }
}
