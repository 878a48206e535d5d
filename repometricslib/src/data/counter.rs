//! High-level counting API.
//!
//! This module provides the main entry points for measuring a repository:
//! enumerate, classify each file, scan text files, and fold the results
//! into per-extension totals.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::options::{BinaryPolicy, CountOptions};
use crate::source::{select_enumerator, FileEnumerator, Strategy};
use crate::Result;

use super::classify::is_probably_binary;
use super::scanner::scan_file;
use super::stats::{ext_key, suffix_of, ExtStats, SkipReason, SkipRecord, StatsByExtension};

/// Result of measuring a repository.
#[derive(Debug, Clone, Serialize)]
pub struct CountResult {
    /// Root the counted paths are relative to
    pub root: PathBuf,
    /// Enumeration strategy that produced the file list
    pub strategy: Strategy,
    /// Per-extension totals
    pub stats: StatsByExtension,
    /// Files left out, in encounter order
    pub skipped: Vec<SkipRecord>,
    /// Whether the breakdown was computed
    pub show_loc: bool,
}

impl CountResult {
    /// Number of files that contributed to the totals.
    pub fn file_count(&self) -> u64 {
        self.stats.total().files
    }
}

/// What happened to one enumerated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Counted with these stats
    Counted(ExtStats),
    /// Excluded for this reason
    Skipped(SkipReason),
    /// No longer a regular file on disk
    Missing,
}

/// Measure one file at `root/rel`.
///
/// Per-file failures become [`FileOutcome::Skipped`]; this never errors.
pub fn measure_file(root: &Path, rel: &Path, options: &CountOptions) -> FileOutcome {
    let abs = root.join(rel);
    if !abs.is_file() {
        return FileOutcome::Missing;
    }

    if is_probably_binary(&abs, options.sample_size) {
        return match options.binary {
            BinaryPolicy::Skip => FileOutcome::Skipped(SkipReason::Binary),
            BinaryPolicy::Bytes => match abs.metadata() {
                Ok(meta) => FileOutcome::Counted(ExtStats::from_binary(meta.len())),
                Err(_) => FileOutcome::Skipped(SkipReason::Unreadable),
            },
        };
    }

    let breakdown = options.breakdown_for(&suffix_of(rel));
    let prefix = breakdown.then_some(options.comment_prefix.as_str());

    match scan_file(&abs, options.max_bytes, prefix) {
        Ok(counts) => FileOutcome::Counted(ExtStats::from_scan(counts)),
        Err(err) => FileOutcome::Skipped(err.skip_reason().unwrap_or(SkipReason::Unreadable)),
    }
}

/// Measure every file an enumerator lists.
///
/// Fails only if enumeration itself fails; per-file problems are recorded
/// in [`CountResult::skipped`].
pub fn count_with(enumerator: &dyn FileEnumerator, options: &CountOptions) -> Result<CountResult> {
    let root = enumerator.root().to_path_buf();
    let files = enumerator.list_files()?;

    debug!(
        strategy = %enumerator.strategy(),
        root = %root.display(),
        candidates = files.len(),
        filtered = !options.filter.is_empty(),
        "enumerated files"
    );

    let mut result = CountResult {
        root,
        strategy: enumerator.strategy(),
        stats: StatsByExtension::new(),
        skipped: Vec::new(),
        show_loc: options.show_loc,
    };

    for rel in files {
        if !options.filter.matches(&rel) {
            continue;
        }

        match measure_file(&result.root, &rel, options) {
            FileOutcome::Counted(stats) => {
                result.stats.add(&ext_key(&rel, options.suffix_mode), stats);
            }
            FileOutcome::Skipped(reason) => {
                debug!(path = %rel.display(), %reason, "skipped file");
                result.skipped.push(SkipRecord::new(rel, reason));
            }
            FileOutcome::Missing => {
                warn!(path = %rel.display(), "listed file is not a regular file");
            }
        }
    }

    info!(
        files = result.file_count(),
        extensions = result.stats.len(),
        skipped = result.skipped.len(),
        "count complete"
    );

    Ok(result)
}

/// Measure the repository at `path`.
///
/// The enumeration strategy comes from `options.mode`; with Git the root is
/// the work tree's top level even when `path` is a subdirectory.
///
/// # Example
///
/// ```rust
/// use repometricslib::{count_repository, CountOptions, EnumerationMode};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("app.js"), "// hi\nrun();\n").unwrap();
///
/// let result = count_repository(dir.path(), &CountOptions::new().mode(EnumerationMode::Walk)).unwrap();
/// assert_eq!(result.stats.get(".js").unwrap().comment, 1);
/// assert_eq!(result.file_count(), 1);
/// ```
pub fn count_repository(path: impl AsRef<Path>, options: &CountOptions) -> Result<CountResult> {
    let enumerator = select_enumerator(path, options.mode)?;
    count_with(enumerator.as_ref(), options)
}
