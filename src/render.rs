//! Text rendering for reports and the file-type chart.

use std::io::{self, Write};

use compact_str::CompactString;
use indexmap::IndexMap;

use treetally_analyze::Report;
use treetally_core::format_size;

/// Width of the chart bars, in cells.
const BAR_WIDTH: usize = 30;

/// Write the text report, section by section.
pub fn write_report(out: &mut impl Write, report: &Report) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Total Number of Subfolders: {}", report.subfolder_count)?;
    writeln!(out)?;

    writeln!(
        out,
        "Top {} Largest Files (from largest to smallest):",
        report.top_n
    )?;
    for file in &report.top_files {
        writeln!(out, "{}: {}", file.path.display(), format_size(file.size))?;
    }

    writeln!(out)?;
    if report.redundant_by_name.is_empty() {
        writeln!(out, "No Redundant Files with Same Name.")?;
    } else {
        writeln!(out, "Redundant Files (Same Name):")?;
        for (name, paths) in &report.redundant_by_name {
            writeln!(out, "{name}:")?;
            for path in paths {
                writeln!(out, "  {}", path.display())?;
            }
        }
    }

    writeln!(out)?;
    if report.redundant_by_size.is_empty() {
        writeln!(out, "No Redundant Files with Same Size.")?;
    } else {
        writeln!(out, "Redundant Files (Same Size):")?;
        for (size, paths) in &report.redundant_by_size {
            writeln!(out, "{}:", format_size(*size))?;
            for path in paths {
                writeln!(out, "  {}", path.display())?;
            }
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Total number of redundant files: {}",
        report.redundant_totals.count
    )?;
    writeln!(
        out,
        "Total size occupied by redundant files: {}",
        format_size(report.redundant_totals.total_bytes)
    )?;

    writeln!(out)?;
    writeln!(out, "Subfolders (from largest to smallest):")?;
    for (folder, size) in &report.folders {
        writeln!(out, "{}: {}", folder.display(), format_size(*size))?;
    }

    if report.warning_count > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} entr{} skipped during the scan.",
            report.warning_count,
            if report.warning_count == 1 { "y" } else { "ies" }
        )?;
    }

    Ok(())
}

/// Write a bar chart of bytes per extension, one row per extension.
///
/// Each row's share is its fraction of all scanned bytes.
pub fn write_type_chart(
    out: &mut impl Write,
    breakdown: &IndexMap<CompactString, u64>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Space Occupied by File Types")?;

    let total: u64 = breakdown.values().sum();
    if total == 0 {
        writeln!(out, "  (no data)")?;
        return Ok(());
    }

    let rows: Vec<(String, u64)> = breakdown
        .iter()
        .map(|(ext, size)| (type_label(ext, *size), *size))
        .collect();
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    for (label, size) in rows {
        let ratio = size as f64 / total as f64;
        writeln!(
            out,
            "  {:<width$} {:>5.1}% {}",
            label,
            ratio * 100.0,
            make_bar(ratio, BAR_WIDTH),
            width = label_width
        )?;
    }
    Ok(())
}

/// Chart label: the extension, or "Unknown", plus its total size.
fn type_label(ext: &str, size: u64) -> String {
    let name = if ext.is_empty() { "Unknown" } else { ext };
    format!("{name} ({})", format_size(size))
}

/// Create a simple bar.
fn make_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
