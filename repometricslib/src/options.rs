//! Input options for repository measurement.
//!
//! This module contains all configuration types that control how files are
//! discovered, grouped and counted.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::source::FilterConfig;

/// Default byte ceiling for text scanning.
pub const DEFAULT_MAX_BYTES: u64 = 5_000_000;

/// Default number of leading bytes sniffed for binary detection.
pub const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Default extensions that get the blank/comment/code breakdown.
pub const DEFAULT_LOC_EXTS: &str = "rs,nepl,js";

/// Default line-comment prefix.
pub const DEFAULT_COMMENT_PREFIX: &str = "//";

/// How candidate files are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumerationMode {
    /// Use Git when the root is inside a work tree, else walk
    #[default]
    Auto,
    /// Require Git
    Git,
    /// Walk the filesystem, honoring only the root `.gitignore`
    Walk,
}

impl FromStr for EnumerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(EnumerationMode::Auto),
            "git" => Ok(EnumerationMode::Git),
            "walk" => Ok(EnumerationMode::Walk),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}

impl fmt::Display for EnumerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnumerationMode::Auto => "auto",
            EnumerationMode::Git => "git",
            EnumerationMode::Walk => "walk",
        })
    }
}

/// How a path's suffixes become an extension key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixMode {
    /// Last suffix only (`archive.tar.gz` → `.gz`)
    #[default]
    Last,
    /// All suffixes (`archive.tar.gz` → `.tar.gz`)
    All,
}

impl FromStr for SuffixMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last" => Ok(SuffixMode::Last),
            "all" => Ok(SuffixMode::All),
            _ => Err(format!("Unknown suffix mode: {}", s)),
        }
    }
}

impl fmt::Display for SuffixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SuffixMode::Last => "last",
            SuffixMode::All => "all",
        })
    }
}

/// What to do with files that look binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryPolicy {
    /// Record as skipped
    #[default]
    Skip,
    /// Count the file size as both bytes and chars, with zero lines
    Bytes,
}

impl FromStr for BinaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(BinaryPolicy::Skip),
            "bytes" => Ok(BinaryPolicy::Bytes),
            _ => Err(format!("Unknown binary policy: {}", s)),
        }
    }
}

impl fmt::Display for BinaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryPolicy::Skip => "skip",
            BinaryPolicy::Bytes => "bytes",
        })
    }
}

/// Parse a comma-separated extension list.
///
/// Accepts `rs,nepl,js` or `.rs,.nepl,.js` and normalizes both to
/// `{".js", ".nepl", ".rs"}`.
pub fn parse_ext_set(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let lower = item.to_lowercase();
            if lower.starts_with('.') {
                lower
            } else {
                format!(".{}", lower)
            }
        })
        .collect()
}

/// Options for counting a repository.
#[derive(Debug, Clone)]
pub struct CountOptions {
    /// Enumeration strategy
    pub mode: EnumerationMode,
    /// Extension key derivation
    pub suffix_mode: SuffixMode,
    /// Byte ceiling for text scanning (`None` = unlimited)
    pub max_bytes: Option<u64>,
    /// Binary file handling
    pub binary: BinaryPolicy,
    /// Extensions that get the blank/comment/code breakdown
    pub loc_exts: BTreeSet<String>,
    /// Prefix marking a comment line
    pub comment_prefix: String,
    /// Whether the breakdown is computed and reported at all
    pub show_loc: bool,
    /// Bytes sniffed for binary detection
    pub sample_size: usize,
    /// User include/exclude globs
    pub filter: FilterConfig,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            mode: EnumerationMode::Auto,
            suffix_mode: SuffixMode::Last,
            max_bytes: Some(DEFAULT_MAX_BYTES),
            binary: BinaryPolicy::Skip,
            loc_exts: parse_ext_set(DEFAULT_LOC_EXTS),
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
            show_loc: true,
            sample_size: DEFAULT_SAMPLE_SIZE,
            filter: FilterConfig::new(),
        }
    }
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enumeration mode.
    pub fn mode(mut self, mode: EnumerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the extension key derivation mode.
    pub fn suffix_mode(mut self, mode: SuffixMode) -> Self {
        self.suffix_mode = mode;
        self
    }

    /// Set the byte ceiling. `0` disables the ceiling.
    pub fn max_bytes(mut self, limit: u64) -> Self {
        self.max_bytes = if limit == 0 { None } else { Some(limit) };
        self
    }

    /// Set the binary file policy.
    pub fn binary(mut self, policy: BinaryPolicy) -> Self {
        self.binary = policy;
        self
    }

    /// Set the breakdown extensions from a comma-separated list.
    pub fn loc_exts(mut self, list: &str) -> Self {
        self.loc_exts = parse_ext_set(list);
        self
    }

    /// Set the comment prefix.
    pub fn comment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.comment_prefix = prefix.into();
        self
    }

    /// Enable or disable the breakdown.
    pub fn show_loc(mut self, show: bool) -> Self {
        self.show_loc = show;
        self
    }

    /// Set the binary detection sample size.
    pub fn sample_size(mut self, bytes: usize) -> Self {
        self.sample_size = bytes;
        self
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Whether the breakdown applies to a file whose last suffix is `suffix`.
    pub fn breakdown_for(&self, suffix: &str) -> bool {
        self.show_loc && self.loc_exts.contains(suffix)
    }
}
