//! Core types for treetally.
//!
//! This crate provides the data structures shared by the scanner and the
//! report builder: the scan result aggregate, scan configuration, error
//! types and size formatting.

mod config;
mod error;
mod result;
mod size;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use result::{FileEntry, ScanAccumulator, ScanResult, extension_of};
pub use size::format_size;
