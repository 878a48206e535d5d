//! JSON output: an array of per-extension objects in key order.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::data::{ExtStats, StatsByExtension};
use crate::Result;

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    ext: &'a str,
    files: u64,
    lines: u64,
    chars: u64,
    bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    blank: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u64>,
}

impl<'a> JsonRow<'a> {
    fn new(ext: &'a str, s: &ExtStats, show_loc: bool) -> Self {
        let loc = |value: u64| show_loc.then_some(value);
        Self {
            ext,
            files: s.files,
            lines: s.lines,
            chars: s.chars,
            bytes: s.bytes,
            blank: loc(s.blank),
            comment: loc(s.comment),
            code: loc(s.code),
        }
    }
}

/// Render stats as pretty-printed JSON.
pub fn render_json(stats: &StatsByExtension, show_loc: bool) -> Result<String> {
    let rows: Vec<JsonRow<'_>> = stats
        .iter()
        .map(|(ext, s)| JsonRow::new(ext, s, show_loc))
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Write [`render_json`] output to `path`.
pub fn write_json(path: impl AsRef<Path>, stats: &StatsByExtension, show_loc: bool) -> Result<()> {
    fs::write(path, render_json(stats, show_loc)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    fn sample() -> StatsByExtension {
        let mut map = StatsByExtension::new();
        map.add(
            ".zig",
            ExtStats {
                files: 1,
                lines: 4,
                chars: 40,
                bytes: 40,
                blank: 1,
                ..ExtStats::default()
            },
        );
        map.add(
            ".c",
            ExtStats {
                files: 3,
                lines: 100,
                chars: 2000,
                bytes: 2000,
                blank: 10,
                comment: 20,
                code: 70,
            },
        );
        map
    }

    #[test]
    fn test_json_sorted_by_key() {
        let json = render_json(&sample(), true).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        let rows = parsed.as_array().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["ext"], ".c");
        assert_eq!(rows[0]["code"], 70);
        assert_eq!(rows[1]["ext"], ".zig");
        assert_eq!(rows[1]["blank"], 1);
    }

    #[test]
    fn test_json_field_order_and_indent() {
        let mut map = StatsByExtension::new();
        map.add(".c", ExtStats::from_binary(3));
        let json = render_json(&map, true).unwrap();

        assert_eq!(
            json,
            "[\n  {\n    \"ext\": \".c\",\n    \"files\": 1,\n    \"lines\": 0,\n    \
             \"chars\": 3,\n    \"bytes\": 3,\n    \"blank\": 0,\n    \"comment\": 0,\n    \
             \"code\": 0\n  }\n]"
        );
    }

    #[test]
    fn test_json_without_breakdown_omits_fields() {
        let json = render_json(&sample(), false).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        let first = parsed[0].as_object().unwrap();

        assert_eq!(first.len(), 5);
        assert!(!first.contains_key("blank"));
        assert!(!first.contains_key("comment"));
        assert!(!first.contains_key("code"));
    }

    #[test]
    fn test_json_keeps_non_ascii() {
        let mut map = StatsByExtension::new();
        map.add(".ñ", ExtStats::from_binary(1));
        assert!(render_json(&map, false).unwrap().contains("\".ñ\""));
    }

    #[test]
    fn test_write_json() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("out.json");
        write_json(&path, &sample(), true).unwrap();

        let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }
}
