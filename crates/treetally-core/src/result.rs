//! Scan result aggregate and the accumulator that builds it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;

/// A regular file found during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

impl FileEntry {
    /// Create a new file entry.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Everything a single scan learned about a tree.
///
/// All maps iterate in walk order. Built once by [`ScanAccumulator::finish`]
/// and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    /// Root path that was scanned.
    pub root_path: PathBuf,

    /// Lowercased extension -> number of files. `""` means no extension.
    pub type_counts: IndexMap<CompactString, u64>,

    /// Lowercased extension -> cumulative bytes.
    pub type_sizes: IndexMap<CompactString, u64>,

    /// One entry per regular file, in walk order.
    pub files: Vec<FileEntry>,

    /// Directory -> bytes of the files directly inside it.
    pub folder_sizes: IndexMap<PathBuf, u64>,

    /// Base filename -> every path carrying that name.
    pub names_index: IndexMap<CompactString, Vec<PathBuf>>,

    /// Exact byte size -> every path of that size.
    pub sizes_index: IndexMap<u64, Vec<PathBuf>>,

    /// Child-directory entries seen while walking.
    pub subfolder_count: u64,

    /// Entries that were skipped.
    pub warnings: Vec<ScanWarning>,

    /// Duration of the scan.
    pub scan_duration: Duration,
}

impl ScanResult {
    /// Total bytes across all files.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Number of regular files found.
    pub fn total_files(&self) -> u64 {
        self.files.len() as u64
    }
}

/// Mutable builder threaded through the walk.
#[derive(Debug, Default)]
pub struct ScanAccumulator {
    result: ScanResult,
}

impl ScanAccumulator {
    /// Start accumulating for the given root.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            result: ScanResult {
                root_path: root_path.into(),
                ..ScanResult::default()
            },
        }
    }

    /// Register a directory so it gets a folder entry even when empty.
    pub fn enter_directory(&mut self, path: &Path) {
        self.result
            .folder_sizes
            .entry(path.to_path_buf())
            .or_insert(0);
    }

    /// Count one child-directory entry.
    pub fn record_subfolder(&mut self) {
        self.result.subfolder_count += 1;
    }

    /// Record a regular file living directly in `parent`.
    pub fn record_file(&mut self, parent: &Path, path: PathBuf, size: u64) {
        let name: CompactString = path
            .file_name()
            .map(|n| n.to_string_lossy().into())
            .unwrap_or_default();
        let ext = extension_of(&name);

        *self.result.type_counts.entry(ext.clone()).or_insert(0) += 1;
        *self.result.type_sizes.entry(ext).or_insert(0) += size;
        *self
            .result
            .folder_sizes
            .entry(parent.to_path_buf())
            .or_insert(0) += size;

        self.result
            .names_index
            .entry(name)
            .or_default()
            .push(path.clone());
        self.result
            .sizes_index
            .entry(size)
            .or_default()
            .push(path.clone());
        self.result.files.push(FileEntry { path, size });
    }

    /// Record a skipped entry.
    pub fn record_warning(&mut self, warning: ScanWarning) {
        self.result.warnings.push(warning);
    }

    /// Number of files recorded so far.
    pub fn file_count(&self) -> usize {
        self.result.files.len()
    }

    /// Freeze into the final result.
    pub fn finish(mut self, scan_duration: Duration) -> ScanResult {
        self.result.scan_duration = scan_duration;
        self.result
    }
}

/// Lowercased extension of a file name, dot included.
///
/// Leading dots belong to the name, so `.bashrc` has no extension.
pub fn extension_of(file_name: &str) -> CompactString {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(i) => file_name[stem_start + i..].to_lowercase().into(),
        None => CompactString::default(),
    }
}
