//! Core data structures for per-extension statistics.
//!
//! Each extension key owns one [`ExtStats`] record. Records are created
//! zero-initialized the first time a key is seen and only ever grow by
//! addition, so the order files are folded in never changes the totals.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::options::SuffixMode;

use super::scanner::ScanCounts;

/// Key used for files without a suffix.
pub const NO_EXTENSION: &str = "(no_ext)";

/// Counts accumulated for one extension key.
///
/// `blank + comment + code <= lines` always holds; it is an equality for
/// extensions selected for the breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtStats {
    /// Files contributing to this key
    pub files: u64,
    /// Lines (text files only)
    pub lines: u64,
    /// Decoded characters, or bytes for binaries counted as bytes
    pub chars: u64,
    /// On-disk size
    pub bytes: u64,
    /// Whitespace-only lines
    pub blank: u64,
    /// Lines starting with the comment prefix (breakdown only)
    pub comment: u64,
    /// Other non-blank lines (breakdown only)
    pub code: u64,
}

impl ExtStats {
    /// Create a new record with all zeros.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for one scanned text file.
    pub fn from_scan(counts: ScanCounts) -> Self {
        Self {
            files: 1,
            lines: counts.lines,
            chars: counts.chars,
            bytes: counts.bytes,
            blank: counts.blank,
            comment: counts.comment,
            code: counts.code,
        }
    }

    /// Record for one binary file counted by size.
    pub fn from_binary(size: u64) -> Self {
        Self {
            files: 1,
            chars: size,
            bytes: size,
            ..Self::default()
        }
    }

    /// Lines classified into the three breakdown buckets.
    pub fn classified(&self) -> u64 {
        self.blank + self.comment + self.code
    }
}

impl Add for ExtStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            files: self.files + other.files,
            lines: self.lines + other.lines,
            chars: self.chars + other.chars,
            bytes: self.bytes + other.bytes,
            blank: self.blank + other.blank,
            comment: self.comment + other.comment,
            code: self.code + other.code,
        }
    }
}

impl AddAssign for ExtStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.lines += other.lines;
        self.chars += other.chars;
        self.bytes += other.bytes;
        self.blank += other.blank;
        self.comment += other.comment;
        self.code += other.code;
    }
}

/// Per-extension records, keyed alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsByExtension {
    entries: BTreeMap<String, ExtStats>,
}

impl StatsByExtension {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `key`, created zero-initialized if absent.
    pub fn upsert(&mut self, key: &str) -> &mut ExtStats {
        self.entries.entry(key.to_string()).or_default()
    }

    /// Fold a file's counts into `key`'s record.
    pub fn add(&mut self, key: &str, stats: ExtStats) {
        *self.upsert(key) += stats;
    }

    /// Record for `key`, if any file produced it.
    pub fn get(&self, key: &str) -> Option<&ExtStats> {
        self.entries.get(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no file has been counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in alphabetical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtStats)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Records ordered largest first by `(bytes, chars, lines, files)`.
    ///
    /// Remaining ties keep alphabetical key order.
    pub fn sorted_by_size(&self) -> Vec<(&str, &ExtStats)> {
        let mut rows: Vec<(&str, &ExtStats)> = self.iter().collect();
        rows.sort_by(|(_, a), (_, b)| {
            (b.bytes, b.chars, b.lines, b.files).cmp(&(a.bytes, a.chars, a.lines, a.files))
        });
        rows
    }

    /// Sum of every record.
    pub fn total(&self) -> ExtStats {
        self.entries
            .values()
            .fold(ExtStats::new(), |acc, stats| acc + *stats)
    }
}

/// Last suffix of a file name, following the usual path conventions:
/// a leading dot does not start a suffix and a trailing dot yields none.
fn last_suffix(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 && i < name.len() - 1 => &name[i..],
        _ => "",
    }
}

/// Every suffix of a file name joined (`archive.tar.gz` → `.tar.gz`).
fn all_suffixes(name: &str) -> String {
    if name.ends_with('.') {
        return String::new();
    }
    let trimmed = name.trim_start_matches('.');
    match trimmed.find('.') {
        Some(i) => trimmed[i..].to_string(),
        None => String::new(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lower-cased last suffix of `path`, empty when there is none.
pub fn suffix_of(path: &Path) -> String {
    last_suffix(&file_name(path)).to_lowercase()
}

/// Extension key of `path` under `mode`.
///
/// Paths without a suffix map to [`NO_EXTENSION`] in both modes.
pub fn ext_key(path: &Path, mode: SuffixMode) -> String {
    let name = file_name(path);
    let suffix = match mode {
        SuffixMode::Last => last_suffix(&name).to_string(),
        SuffixMode::All => all_suffixes(&name),
    };
    if suffix.is_empty() {
        NO_EXTENSION.to_string()
    } else {
        suffix.to_lowercase()
    }
}

/// Why a file was left out of the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Looked binary and the policy is to skip binaries
    Binary,
    /// Larger than the byte ceiling
    TooLarge,
    /// Could not be stat'ed or read
    Unreadable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::Binary => "binary",
            SkipReason::TooLarge => "too_large",
            SkipReason::Unreadable => "unreadable",
        })
    }
}

/// A file excluded from counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRecord {
    /// Root-relative path
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: SkipReason,
}

impl SkipRecord {
    pub fn new(path: PathBuf, reason: SkipReason) -> Self {
        Self { path, reason }
    }
}
