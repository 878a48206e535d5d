//! User include/exclude filtering with glob pattern support.
//!
//! Applied to root-relative paths after enumeration, independent of the
//! strategy that produced them.

use std::path::Path;

use glob::Pattern;

use crate::error::RepoMetricsError;
use crate::Result;

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include everything)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes every file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// True when no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Check if a root-relative path passes the filter.
    ///
    /// A path matches if it matches no exclude pattern and at least one
    /// include pattern (or include is empty).
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| RepoMetricsError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FilterConfig::new();

        assert!(filter.is_empty());
        assert!(filter.matches(Path::new("src/main.rs")));
        assert!(filter.matches(Path::new("README")));
        assert!(filter.matches(Path::new("assets/logo.png")));
    }

    #[test]
    fn test_filter_with_include_pattern() {
        let filter = FilterConfig::new().include("src/**").unwrap();

        assert!(filter.matches(Path::new("src/main.rs")));
        assert!(filter.matches(Path::new("src/utils/helper.js")));
        assert!(!filter.matches(Path::new("docs/guide.md")));
    }

    #[test]
    fn test_filter_with_exclude_pattern() {
        let filter = FilterConfig::new().exclude("vendor/**").unwrap();

        assert!(filter.matches(Path::new("src/main.rs")));
        assert!(!filter.matches(Path::new("vendor/lib.js")));
        assert!(!filter.matches(Path::new("vendor/deep/lib.js")));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = FilterConfig::new()
            .include_many(&["src/**", "tests/**"])
            .unwrap()
            .exclude_many(&["src/generated/**"])
            .unwrap();

        assert!(filter.matches(Path::new("src/lib.rs")));
        assert!(filter.matches(Path::new("tests/cli.rs")));
        assert!(!filter.matches(Path::new("src/generated/schema.rs")));
        assert!(!filter.matches(Path::new("benches/bench.rs")));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = FilterConfig::new().include("[invalid");

        assert!(result.is_err());
        if let Err(RepoMetricsError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }
}
