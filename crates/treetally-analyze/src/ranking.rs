//! Size-ordered views: largest files, folder ranking, extension totals.

use std::path::PathBuf;

use compact_str::CompactString;
use indexmap::IndexMap;

use treetally_core::{FileEntry, ScanResult};

/// The `n` largest files, largest first.
///
/// Equal sizes keep their walk order.
pub fn top_files(result: &ScanResult, n: usize) -> Vec<FileEntry> {
    let mut files = result.files.clone();
    files.sort_by(|a, b| b.size.cmp(&a.size));
    files.truncate(n);
    files
}

/// Every scanned folder with the bytes of its direct files, largest first.
pub fn folders_by_size(result: &ScanResult) -> Vec<(PathBuf, u64)> {
    let mut folders: Vec<(PathBuf, u64)> = result
        .folder_sizes
        .iter()
        .map(|(path, size)| (path.clone(), *size))
        .collect();
    folders.sort_by(|a, b| b.1.cmp(&a.1));
    folders
}

/// Extension -> total bytes, for charting.
///
/// Files without an extension stay under the empty key; labelling it is
/// left to whoever renders the chart.
pub fn type_breakdown(result: &ScanResult) -> IndexMap<CompactString, u64> {
    result.type_sizes.clone()
}
