//! Filesystem-walk enumeration.
//!
//! An approximation of Git's view of the tree: only the `.gitignore` at the
//! root is consulted. Ignore files in subdirectories, `.git/info/exclude` and
//! global excludes are not honored; use the Git strategy when exact
//! semantics matter.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::RepoMetricsError;
use crate::Result;

use super::enumerator::{FileEnumerator, Strategy};

/// Name of the VCS metadata directory, never descended into.
const VCS_DIR: &str = ".git";

/// Name of the ignore-pattern file consulted at the root.
pub const IGNORE_FILE: &str = ".gitignore";

/// Patterns loaded from the root ignore file.
#[derive(Debug, Clone)]
pub struct RootIgnore {
    #[cfg(feature = "gitignore")]
    matcher: ignore::gitignore::Gitignore,
}

impl RootIgnore {
    /// Load the root ignore file, if there is one.
    ///
    /// Invalid UTF-8 in the file is replaced rather than rejected.
    #[cfg(feature = "gitignore")]
    pub fn load(root: &Path) -> Result<Option<Self>> {
        use ignore::gitignore::GitignoreBuilder;

        let path = root.join(IGNORE_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);

        let mut builder = GitignoreBuilder::new(root);
        for line in text.lines() {
            builder
                .add_line(Some(path.clone()), line)
                .map_err(|e| invalid_pattern(&path, e))?;
        }
        let matcher = builder.build().map_err(|e| invalid_pattern(&path, e))?;

        debug!(patterns = matcher.num_ignores(), "loaded root ignore file");
        Ok(Some(Self { matcher }))
    }

    /// Without pattern support, a present ignore file is a configuration error.
    #[cfg(not(feature = "gitignore"))]
    pub fn load(root: &Path) -> Result<Option<Self>> {
        if root.join(IGNORE_FILE).is_file() {
            return Err(RepoMetricsError::Configuration(format!(
                "ignore-pattern matching is required for walk mode because {} exists; \
                 rebuild with the `gitignore` feature or use git mode",
                IGNORE_FILE
            )));
        }
        Ok(None)
    }

    /// Whether a root-relative file path is ignored, directly or via a parent.
    #[cfg(feature = "gitignore")]
    pub fn is_ignored(&self, rel: &Path) -> bool {
        self.matcher
            .matched_path_or_any_parents(rel, false)
            .is_ignore()
    }

    #[cfg(not(feature = "gitignore"))]
    pub fn is_ignored(&self, _rel: &Path) -> bool {
        false
    }
}

#[cfg(feature = "gitignore")]
fn invalid_pattern(path: &Path, err: ignore::Error) -> RepoMetricsError {
    RepoMetricsError::Configuration(format!("invalid pattern in {}: {}", path.display(), err))
}

/// Enumerates regular files under a root, minus the root ignore file's matches.
#[derive(Debug, Clone)]
pub struct WalkEnumerator {
    root: PathBuf,
    ignore: Option<RootIgnore>,
}

impl WalkEnumerator {
    /// Prepare a walk of `root`, loading its ignore file up front.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(RepoMetricsError::PathNotFound(root.to_path_buf()));
        }
        let ignore = RootIgnore::load(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            ignore,
        })
    }
}

impl FileEnumerator for WalkEnumerator {
    fn root(&self) -> &Path {
        &self.root
    }

    fn strategy(&self) -> Strategy {
        Strategy::Walk
    }

    fn list_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root).into_iter();
        for entry in walker.filter_entry(|e| e.depth() == 0 || e.file_name() != VCS_DIR) {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    debug!(error = %err, "skipping unwalkable entry");
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let rel = match path.strip_prefix(&self.root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };

            if let Some(ignore) = &self.ignore {
                if ignore.is_ignored(rel) {
                    continue;
                }
            }

            files.push(rel.to_path_buf());
        }

        files.sort();
        Ok(files)
    }
}
