//! CSV output, one row per extension in key order.

use std::fs;
use std::path::Path;

use crate::data::StatsByExtension;
use crate::Result;

use super::{headers, values};

const RECORD_END: &str = "\r\n";

/// Quote a field only when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render stats as CSV with a header row.
pub fn render_csv(stats: &StatsByExtension, show_loc: bool) -> String {
    let mut output = headers(show_loc).join(",");
    output.push_str(RECORD_END);

    for (ext, s) in stats.iter() {
        let mut row = vec![csv_field(ext)];
        row.extend(values(s, show_loc).iter().map(u64::to_string));
        output.push_str(&row.join(","));
        output.push_str(RECORD_END);
    }

    output
}

/// Write [`render_csv`] output to `path`.
pub fn write_csv(path: impl AsRef<Path>, stats: &StatsByExtension, show_loc: bool) -> Result<()> {
    fs::write(path, render_csv(stats, show_loc))?;
    Ok(())
}
