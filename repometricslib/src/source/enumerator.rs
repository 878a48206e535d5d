//! The enumeration capability and strategy selection.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RepoMetricsError;
use crate::options::EnumerationMode;
use crate::Result;

use super::git::{is_git_repo, GitEnumerator};
use super::walk::WalkEnumerator;

/// The strategy an enumerator implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Git,
    Walk,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Git => "git",
            Strategy::Walk => "walk",
        })
    }
}

/// Produces the candidate files of a tree.
///
/// Paths are relative to [`root`](FileEnumerator::root). Their order is not
/// guaranteed to be stable across implementations.
pub trait FileEnumerator {
    /// Directory the listed paths are relative to.
    fn root(&self) -> &Path;

    /// Which strategy this is.
    fn strategy(&self) -> Strategy;

    /// List candidate files.
    fn list_files(&self) -> Result<Vec<PathBuf>>;
}

/// Pick an enumerator for `path` according to `mode`.
///
/// - `Auto` uses Git when `path` is inside a work tree, otherwise walks.
/// - `Git` fails with `Configuration` outside a work tree.
/// - `Walk` always walks.
///
/// With Git the root becomes the work tree's top level, wherever inside it
/// `path` points.
pub fn select_enumerator(
    path: impl AsRef<Path>,
    mode: EnumerationMode,
) -> Result<Box<dyn FileEnumerator>> {
    let path = path.as_ref();
    let root = path
        .canonicalize()
        .map_err(|_| RepoMetricsError::PathNotFound(path.to_path_buf()))?;

    let use_git = match mode {
        EnumerationMode::Walk => false,
        EnumerationMode::Auto => is_git_repo(&root),
        EnumerationMode::Git => {
            if !is_git_repo(&root) {
                return Err(RepoMetricsError::Configuration(
                    "--mode git but not inside a Git repository.".to_string(),
                ));
            }
            true
        }
    };

    debug!(%mode, use_git, root = %root.display(), "selecting enumerator");

    if use_git {
        Ok(Box::new(GitEnumerator::discover(&root)?))
    } else {
        Ok(Box::new(WalkEnumerator::new(&root)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::git::tests::{git_available, git_init};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_walk_mode_always_walks() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "a\n").unwrap();

        let enumerator = select_enumerator(temp.path(), EnumerationMode::Walk).unwrap();
        assert_eq!(enumerator.strategy(), Strategy::Walk);
        assert_eq!(enumerator.list_files().unwrap(), vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn test_auto_mode_falls_back_to_walk() {
        let temp = tempdir().unwrap();
        if is_git_repo(temp.path()) {
            return;
        }
        let enumerator = select_enumerator(temp.path(), EnumerationMode::Auto).unwrap();
        assert_eq!(enumerator.strategy(), Strategy::Walk);
    }

    #[test]
    fn test_git_mode_outside_repo_is_configuration_error() {
        let temp = tempdir().unwrap();
        if is_git_repo(temp.path()) {
            return;
        }
        let err = select_enumerator(temp.path(), EnumerationMode::Git)
            .err()
            .unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_auto_mode_prefers_git_and_resolves_top_level() {
        if !git_available() {
            return;
        }
        let temp = tempdir().unwrap();
        git_init(temp.path());
        fs::create_dir_all(temp.path().join("sub/dir")).unwrap();

        let enumerator =
            select_enumerator(temp.path().join("sub/dir"), EnumerationMode::Auto).unwrap();
        assert_eq!(enumerator.strategy(), Strategy::Git);
        assert_eq!(enumerator.root(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_path() {
        let err = select_enumerator("/nonexistent/path", EnumerationMode::Walk)
            .err()
            .unwrap();
        assert!(matches!(err, RepoMetricsError::PathNotFound(_)));
    }
}
