//! Directory tree scanner for treetally.
//!
//! Walks a tree once with jwalk and fills every aggregate of a
//! [`ScanResult`] along the way: extension histograms, the flat file list,
//! per-folder sizes and the name/size indexes used for redundancy reports.
//!
//! # Example
//!
//! ```rust,no_run
//! use treetally_scan::{ScanConfig, TreeScanner};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let result = TreeScanner::new().scan(&config).unwrap();
//!
//! println!("Total size: {} bytes", result.total_size());
//! println!("Subfolders: {}", result.subfolder_count);
//! ```

mod scanner;

pub use scanner::{TreeScanner, scan};

// Re-export core types for convenience
pub use treetally_core::{
    FileEntry, ScanConfig, ScanError, ScanResult, ScanWarning, WarningKind,
};
