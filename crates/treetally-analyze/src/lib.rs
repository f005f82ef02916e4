//! Report views for treetally.
//!
//! Everything here is a pure function of a [`ScanResult`]:
//!
//! - **Ranking** - largest files, folders by size, per-extension totals
//! - **Redundancy** - files sharing a name or an exact byte size
//!
//! ```rust,ignore
//! use treetally_analyze::{ReportBuilder, ReportConfig};
//! use treetally_scan::scan;
//!
//! let result = scan("/path/to/scan").unwrap();
//! let report = ReportBuilder::with_config(ReportConfig::default()).build(&result);
//!
//! println!("{} redundant files", report.redundant_totals.count);
//! ```
//!
//! Names and sizes are compared exactly; file contents are never read, so
//! a "redundant" file is a candidate, not a confirmed copy.

mod ranking;
mod redundancy;
mod report;

pub use ranking::{folders_by_size, top_files, type_breakdown};
pub use redundancy::{
    RedundancyMode, RedundantTotals, duplicates_by_name, duplicates_by_size, redundant_totals,
};
pub use report::{Report, ReportBuilder, ReportConfig, ReportConfigBuilder};

// Re-export core types
pub use treetally_core::{FileEntry, ScanResult};
