//! Redundant-file detection by exact name or exact byte size.
//!
//! Contents are never compared. Two files are "redundant" when they share a
//! base name or a size, which makes every group a candidate list for the
//! operator to review.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use treetally_core::ScanResult;

/// How name groups and size groups are combined into one total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedundancyMode {
    /// Sum name groups and size groups independently. A file in both
    /// kinds of group is counted twice.
    #[default]
    Combined,
    /// Count each path at most once.
    Distinct,
}

/// Count and byte total of redundant files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundantTotals {
    /// Number of files (see [`RedundancyMode`] for how overlaps count).
    pub count: u64,
    /// Bytes occupied by those files.
    pub total_bytes: u64,
}

/// Names shared by two or more files, with every path carrying them.
pub fn duplicates_by_name(result: &ScanResult) -> IndexMap<CompactString, Vec<PathBuf>> {
    result
        .names_index
        .iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(name, paths)| (name.clone(), paths.clone()))
        .collect()
}

/// Byte sizes shared by two or more files, with every path of that size.
pub fn duplicates_by_size(result: &ScanResult) -> IndexMap<u64, Vec<PathBuf>> {
    result
        .sizes_index
        .iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(size, paths)| (*size, paths.clone()))
        .collect()
}

/// Total count and size of files in any name or size group.
pub fn redundant_totals(result: &ScanResult, mode: RedundancyMode) -> RedundantTotals {
    let sizes: HashMap<&Path, u64> = result
        .files
        .iter()
        .map(|f| (f.path.as_path(), f.size))
        .collect();

    let by_name = result.names_index.values().filter(|p| p.len() > 1);
    let by_size = result.sizes_index.values().filter(|p| p.len() > 1);
    let grouped = by_name.chain(by_size).flatten().map(PathBuf::as_path);

    let mut totals = RedundantTotals::default();
    match mode {
        RedundancyMode::Combined => {
            for path in grouped {
                totals.count += 1;
                totals.total_bytes += sizes.get(path).copied().unwrap_or(0);
            }
        }
        RedundancyMode::Distinct => {
            let unique: IndexSet<&Path> = grouped.collect();
            totals.count = unique.len() as u64;
            totals.total_bytes = unique
                .iter()
                .map(|p| sizes.get(p).copied().unwrap_or(0))
                .sum();
        }
    }
    totals
}
