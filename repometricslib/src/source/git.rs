//! Git-backed enumeration.
//!
//! Defers entirely to Git's own exclusion semantics: every `.gitignore` in
//! the tree, `.git/info/exclude`, and the user's global excludes file.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::RepoMetricsError;
use crate::Result;

use super::enumerator::{FileEnumerator, Strategy};

/// Run `git` with `args` in `cwd`, returning stdout.
///
/// Fails with `ToolInvocation` if git cannot be spawned or exits non-zero;
/// the message is git's stderr.
fn run_git(args: &[&str], cwd: &Path) -> Result<Vec<u8>> {
    let command = format!("git {}", args.join(" "));

    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| RepoMetricsError::ToolInvocation {
            command: command.clone(),
            message: format!("failed to run {}: {}", command, e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("Command failed: {}", command)
        } else {
            stderr
        };
        return Err(RepoMetricsError::ToolInvocation { command, message });
    }

    Ok(output.stdout)
}

/// Check whether `path` is inside a Git work tree.
///
/// Any failure, including git not being installed, means "no".
pub fn is_git_repo(path: &Path) -> bool {
    run_git(&["rev-parse", "--is-inside-work-tree"], path).is_ok()
}

/// Resolve the top-level directory of the work tree containing `path`.
pub fn git_root(path: &Path) -> Result<PathBuf> {
    let out = run_git(&["rev-parse", "--show-toplevel"], path)?;
    let top = PathBuf::from(String::from_utf8_lossy(&out).trim());
    Ok(top.canonicalize().unwrap_or(top))
}

/// Split NUL-delimited `git ls-files -z` output into relative paths.
fn parse_null_delimited(out: &[u8]) -> Vec<PathBuf> {
    out.split(|&b| b == 0)
        .filter(|chunk| !chunk.is_empty())
        .map(path_from_bytes)
        .collect()
}

// Non-UTF-8 names survive on Unix; elsewhere git emits UTF-8.
#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Enumerates tracked files plus untracked files Git does not ignore.
#[derive(Debug, Clone)]
pub struct GitEnumerator {
    root: PathBuf,
}

impl GitEnumerator {
    /// Open the work tree containing `path`, rooted at its top level.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let root = git_root(path.as_ref())?;
        debug!(root = %root.display(), "resolved git top-level");
        Ok(Self { root })
    }
}

impl FileEnumerator for GitEnumerator {
    fn root(&self) -> &Path {
        &self.root
    }

    fn strategy(&self) -> Strategy {
        Strategy::Git
    }

    fn list_files(&self) -> Result<Vec<PathBuf>> {
        let out = run_git(
            &["ls-files", "-z", "--cached", "--others", "--exclude-standard"],
            &self.root,
        )?;
        Ok(parse_null_delimited(&out))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// Whether a usable git binary is on PATH.
    pub(crate) fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    pub(crate) fn git_init(dir: &Path) {
        let status = Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir)
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_parse_null_delimited() {
        let paths = parse_null_delimited(b"src/main.rs\0a b.txt\0\0README\0");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("src/main.rs"),
                PathBuf::from("a b.txt"),
                PathBuf::from("README"),
            ]
        );
        assert!(parse_null_delimited(b"").is_empty());
    }

    #[test]
    fn test_not_a_repo() {
        if !git_available() {
            return;
        }
        let temp = tempdir().unwrap();
        // A tempdir may itself live under a work tree on some machines.
        if is_git_repo(temp.path()) {
            return;
        }
        let err = GitEnumerator::discover(temp.path()).unwrap_err();
        assert!(matches!(err, RepoMetricsError::ToolInvocation { .. }));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_lists_tracked_and_unignored_from_subdir() {
        if !git_available() {
            return;
        }
        let temp = tempdir().unwrap();
        git_init(temp.path());
        fs::create_dir_all(temp.path().join("src/nested")).unwrap();
        fs::create_dir_all(temp.path().join("build")).unwrap();
        fs::write(temp.path().join(".gitignore"), "build/\n").unwrap();
        fs::write(temp.path().join("src/nested/.gitignore"), "*.log\n").unwrap();
        fs::write(temp.path().join("src/main.rs"), "fn main() {}\n").unwrap();
        fs::write(temp.path().join("src/nested/run.log"), "log\n").unwrap();
        fs::write(temp.path().join("src/nested/keep.js"), "x\n").unwrap();
        fs::write(temp.path().join("build/out.o"), "obj").unwrap();

        let enumerator = GitEnumerator::discover(temp.path().join("src")).unwrap();
        assert_eq!(enumerator.root(), temp.path().canonicalize().unwrap());
        assert_eq!(enumerator.strategy(), Strategy::Git);

        let mut files = enumerator.list_files().unwrap();
        files.sort();
        assert_eq!(
            files,
            vec![
                PathBuf::from(".gitignore"),
                PathBuf::from("src/main.rs"),
                PathBuf::from("src/nested/.gitignore"),
                PathBuf::from("src/nested/keep.js"),
            ]
        );
    }
}
