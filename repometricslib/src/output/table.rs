//! Aligned text table.

use crate::data::{ExtStats, SkipRecord, StatsByExtension};

use super::{headers, values};

/// Skip records listed before the summary is cut off.
pub const SKIP_PREVIEW: usize = 20;

/// Column separator.
const GAP: &str = "  ";

/// Format a count with `,` thousands separators.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn cells(label: &str, stats: &ExtStats, show_loc: bool) -> Vec<String> {
    let mut row = vec![label.to_string()];
    row.extend(values(stats, show_loc).into_iter().map(format_count));
    row
}

/// Left-align the first cell, right-align the rest.
fn format_row(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect::<Vec<_>>()
        .join(GAP)
}

/// Render the stats as a table, largest extensions first.
///
/// Rows are ordered by `(bytes, chars, lines, files)` descending. An empty
/// line and a `TOTAL` row summing every column close the table. Column widths
/// also fit the `TOTAL` cells.
pub fn render_table(stats: &StatsByExtension, show_loc: bool) -> String {
    let header: Vec<String> = headers(show_loc).into_iter().map(String::from).collect();
    let rows: Vec<Vec<String>> = stats
        .sorted_by_size()
        .into_iter()
        .map(|(ext, s)| cells(ext, s, show_loc))
        .collect();
    let total = cells("TOTAL", &stats.total(), show_loc);

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows.iter().chain(std::iter::once(&total)) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();

    let mut out = String::new();
    out.push_str(&format_row(&header, &widths));
    out.push('\n');
    out.push_str(&format_row(&separator, &widths));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format_row(&total, &widths));
    out.push('\n');
    out
}

/// Summarize skipped files, listing at most [`SKIP_PREVIEW`] of them.
///
/// Empty when nothing was skipped.
pub fn render_skipped(skipped: &[SkipRecord]) -> String {
    if skipped.is_empty() {
        return String::new();
    }

    let mut out = format!(
        "Skipped files: {} (showing up to {})\n",
        skipped.len(),
        SKIP_PREVIEW
    );
    for record in skipped.iter().take(SKIP_PREVIEW) {
        out.push_str(&format!(
            "  - {} [{}]\n",
            record.path.display(),
            record.reason
        ));
    }
    if skipped.len() > SKIP_PREVIEW {
        out.push_str("  ...\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SkipReason;
    use std::path::PathBuf;

    fn sample() -> StatsByExtension {
        let mut map = StatsByExtension::new();
        map.add(
            ".rs",
            ExtStats {
                files: 12,
                lines: 1500,
                chars: 42000,
                bytes: 42100,
                blank: 200,
                comment: 300,
                code: 1000,
            },
        );
        map.add(
            ".md",
            ExtStats {
                files: 1,
                lines: 10,
                chars: 300,
                bytes: 300,
                blank: 2,
                ..ExtStats::default()
            },
        );
        map
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(5_000_000), "5,000,000");
        assert_eq!(format_count(123_456_789), "123,456,789");
    }

    #[test]
    fn test_table_layout() {
        let table = render_table(&sample(), true);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines,
            vec![
                "ext    files  lines   chars   bytes  blank  comment   code",
                "-----  -----  -----  ------  ------  -----  -------  -----",
                ".rs       12  1,500  42,000  42,100    200      300  1,000",
                ".md        1     10     300     300      2        0      0",
                "",
                "TOTAL     13  1,510  42,300  42,400    202      300  1,000",
            ]
        );
    }

    #[test]
    fn test_table_without_breakdown() {
        let table = render_table(&sample(), false);
        let header = table.lines().next().unwrap();

        assert_eq!(header, "ext    files  lines   chars   bytes");
        assert!(!table.contains("comment"));
    }

    #[test]
    fn test_table_equal_bytes_more_chars_first() {
        let mut map = StatsByExtension::new();
        map.add(
            ".a",
            ExtStats {
                files: 1,
                chars: 10,
                bytes: 50,
                ..ExtStats::default()
            },
        );
        map.add(
            ".b",
            ExtStats {
                files: 1,
                chars: 40,
                bytes: 50,
                ..ExtStats::default()
            },
        );

        let table = render_table(&map, false);
        let first_row = table.lines().nth(2).unwrap();
        assert!(first_row.starts_with(".b"));
    }

    #[test]
    fn test_empty_table_has_totals() {
        let table = render_table(&StatsByExtension::new(), true);
        let last = table.lines().last().unwrap();
        assert!(last.starts_with("TOTAL"));
        assert_eq!(table.lines().collect::<Vec<_>>()[2], "");
        assert_eq!(table.lines().count(), 4);
    }

    #[test]
    fn test_skipped_summary_caps_preview() {
        let records: Vec<SkipRecord> = (0..25)
            .map(|i| SkipRecord::new(PathBuf::from(format!("bin/{}.dat", i)), SkipReason::Binary))
            .collect();

        let summary = render_skipped(&records);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], "Skipped files: 25 (showing up to 20)");
        assert_eq!(lines[1], "  - bin/0.dat [binary]");
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[21], "  ...");
    }

    #[test]
    fn test_skipped_summary_short_list() {
        let records = vec![SkipRecord::new(
            PathBuf::from("big.log"),
            SkipReason::TooLarge,
        )];

        assert_eq!(
            render_skipped(&records),
            "Skipped files: 1 (showing up to 20)\n  - big.log [too_large]\n"
        );
        assert_eq!(render_skipped(&[]), "");
    }
}
