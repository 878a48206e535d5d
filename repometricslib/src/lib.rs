//! # repometricslib
//!
//! Measure the scale of a repository by file extension: how many files,
//! lines, characters and bytes each extension contributes, and for selected
//! extensions how those lines split into blank, comment and code.
//!
//! ## Overview
//!
//! Counting is a single pass over the repository:
//!
//! 1. **Source**: enumerate candidate files, either by asking Git for tracked
//!    plus untracked-but-not-ignored files, or by walking the filesystem and
//!    applying the root `.gitignore`
//! 2. **Data**: sniff each file for binary content, scan text files line by
//!    line, and fold the per-file counts into per-extension totals
//! 3. **Output**: render the totals as an aligned table, CSV or JSON
//!
//! Files that are too large or cannot be read are recorded as skips rather
//! than aborting the run.
//!
//! ## Example
//!
//! ```rust
//! use repometricslib::{count_repository, CountOptions, EnumerationMode};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("main.rs"), "// entry\nfn main() {}\n\n").unwrap();
//! fs::write(dir.path().join("README"), "hello\n").unwrap();
//!
//! let options = CountOptions::new().mode(EnumerationMode::Walk);
//! let result = count_repository(dir.path(), &options).unwrap();
//!
//! let rs = result.stats.get(".rs").unwrap();
//! assert_eq!(rs.lines, 3);
//! assert_eq!((rs.blank, rs.comment, rs.code), (1, 1, 1));
//! assert_eq!(result.stats.get("(no_ext)").unwrap().files, 1);
//! ```

pub mod concat;
pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod source;

pub use concat::{concat_directory, ConcatSummary};
pub use data::{
    count_repository, count_with, ext_key, is_probably_binary, scan_file, scan_reader,
    CountResult, ExtStats, ScanCounts, SkipReason, SkipRecord, StatsByExtension, NO_EXTENSION,
};
pub use error::RepoMetricsError;
pub use options::{parse_ext_set, BinaryPolicy, CountOptions, EnumerationMode, SuffixMode};
pub use output::{render_csv, render_json, render_skipped, render_table, write_csv, write_json};
pub use source::{
    select_enumerator, FileEnumerator, FilterConfig, GitEnumerator, Strategy, WalkEnumerator,
};

/// Result type for repometricslib operations
pub type Result<T> = std::result::Result<T, RepoMetricsError>;
