//! Output: render per-extension totals for people and tools.
//!
//! - **Table**: aligned text, largest extensions first, with a totals row
//! - **CSV / JSON**: the same fields in alphabetical key order, for
//!   downstream tooling
//!
//! All renderers are pure functions of the stats map; equal inputs give
//! byte-identical output.

pub mod csv;
pub mod json;
pub mod table;

pub use csv::{render_csv, write_csv};
pub use json::{render_json, write_json};
pub use table::{format_count, render_skipped, render_table, SKIP_PREVIEW};

/// Column headers shared by every format.
pub(crate) fn headers(show_loc: bool) -> Vec<&'static str> {
    let mut headers = vec!["ext", "files", "lines", "chars", "bytes"];
    if show_loc {
        headers.extend(["blank", "comment", "code"]);
    }
    headers
}

/// Numeric fields of a record, in header order.
pub(crate) fn values(stats: &crate::ExtStats, show_loc: bool) -> Vec<u64> {
    let mut values = vec![stats.files, stats.lines, stats.chars, stats.bytes];
    if show_loc {
        values.extend([stats.blank, stats.comment, stats.code]);
    }
    values
}
