//! Data collection: classify, scan and aggregate files.
//!
//! This module handles the second stage of the pipeline - turning a list of
//! paths into per-extension statistics. It provides:
//!
//! - **Classification**: null-byte sniffing for binary files
//! - **Scanning**: line, character and byte counts with an optional
//!   blank/comment/code breakdown
//! - **Statistics**: per-extension records and skip records
//! - **Counting**: high-level API (`count_repository`, `count_with`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use repometricslib::data::{count_repository};
//! use repometricslib::CountOptions;
//!
//! let result = count_repository(".", &CountOptions::new())?;
//! println!("Total bytes: {}", result.stats.total().bytes);
//! ```

pub mod classify;
pub mod counter;
pub mod scanner;
pub mod stats;

pub use classify::is_probably_binary;
pub use counter::{count_repository, count_with, measure_file, CountResult, FileOutcome};
pub use scanner::{classify_line, decode_lossy, scan_file, scan_reader, LineKind, ScanCounts};
pub use stats::{
    ext_key, suffix_of, ExtStats, SkipReason, SkipRecord, StatsByExtension, NO_EXTENSION,
};
