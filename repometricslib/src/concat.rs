//! Directory concatenation: dump every file under a directory into one text
//! file, each preceded by its path.
//!
//! The layout of the dump is:
//!
//! ```text
//! <path>
//! ---
//! <content>
//! ---
//!
//! ```
//!
//! Content line endings are normalized to `\n`. A file that is not valid
//! UTF-8 or cannot be read gets an inline `--- ERROR: ... ---` marker in
//! place of its content; the dump carries on.

use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::RepoMetricsError;
use crate::Result;

/// Separator written after the path and after the content.
const SEPARATOR: &str = "---";

/// Outcome of one concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatSummary {
    /// Directory that was dumped
    pub source: PathBuf,
    /// File written
    pub output: PathBuf,
    /// Files written into the dump, including those with error markers
    pub files: usize,
}

/// Files of a directory before its subdirectories, each group by name.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir
        .cmp(&b_dir)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Path as shown in the dump: relative to the working directory when
/// possible, without `.` components.
fn display_path(path: &Path, cwd: Option<&Path>) -> String {
    let relative = cwd
        .and_then(|cwd| path.strip_prefix(cwd).ok())
        .unwrap_or(path);
    let cleaned: PathBuf = relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    cleaned.display().to_string()
}

/// Rewrite `\r\n` and lone `\r` terminators as `\n`.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn write_entry<W: Write>(out: &mut W, path: &Path, shown: &str) -> std::io::Result<()> {
    write!(out, "{}\n{}\n", shown, SEPARATOR)?;
    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => out.write_all(normalize_newlines(&text).as_bytes())?,
            Err(_) => write!(
                out,
                "\n--- ERROR: file '{}' could not be decoded as UTF-8 (possibly a binary file) ---\n",
                shown
            )?,
        },
        Err(err) => write!(
            out,
            "\n--- ERROR: could not read file '{}': {} ---\n",
            shown, err
        )?,
    }
    write!(out, "\n{}\n\n", SEPARATOR)
}

/// Concatenate every file under `source` into `output`.
///
/// Directories are walked depth-first with files before subdirectories, each
/// in name order. Missing parent directories of `output` are created, and
/// `output` itself is skipped when it lies inside `source`.
pub fn concat_directory(
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<ConcatSummary> {
    let source = source.as_ref();
    let output = output.as_ref();

    if !source.is_dir() {
        return Err(RepoMetricsError::NotADirectory(source.to_path_buf()));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            info!(dir = %parent.display(), "created output directory");
        }
    }

    let mut writer = BufWriter::new(File::create(output)?);
    let output_abs = output.canonicalize()?;
    let cwd = std::env::current_dir().ok();

    let mut files = 0;
    let walker = WalkDir::new(source).sort_by(files_first);
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "skipping unwalkable entry");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if path.canonicalize().ok().as_deref() == Some(output_abs.as_path()) {
            continue;
        }

        let shown = display_path(path, cwd.as_deref());
        debug!(path = %shown, "appending file");
        write_entry(&mut writer, path, &shown)?;
        files += 1;
    }

    writer.flush()?;
    info!(
        source = %source.display(),
        output = %output.display(),
        files,
        "concatenation complete"
    );

    Ok(ConcatSummary {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_tree(dir: &Path) {
        fs::create_dir_all(dir.join("b_dir")).unwrap();
        fs::write(dir.join("z.txt"), "zed\n").unwrap();
        fs::write(dir.join("a.txt"), "alpha").unwrap();
        fs::write(dir.join("b_dir/inner.txt"), "inner\n").unwrap();
    }

    #[test]
    fn test_concat_orders_files_before_subdirs() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        create_tree(&src);
        let out = temp.path().join("tmp/out.txt");

        let summary = concat_directory(&src, &out).unwrap();
        assert_eq!(summary.files, 3);

        let dump = fs::read_to_string(&out).unwrap();
        let a = dump.find("a.txt\n---\nalpha\n---\n\n").unwrap();
        let z = dump.find("z.txt\n---\nzed\n\n---\n\n").unwrap();
        let inner = dump.find("inner.txt\n---\ninner\n\n---\n\n").unwrap();
        assert!(a < z);
        assert!(z < inner);
    }

    #[test]
    fn test_concat_creates_output_parent() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        create_tree(&src);
        let out = temp.path().join("deep/nested/out.txt");

        concat_directory(&src, &out).unwrap();
        assert!(out.is_file());
    }

    #[test]
    fn test_concat_skips_output_inside_source() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        create_tree(&src);
        let out = src.join("all.txt");

        let summary = concat_directory(&src, &out).unwrap();
        assert_eq!(summary.files, 3);
        assert!(!fs::read_to_string(&out).unwrap().contains("all.txt\n---"));
    }

    #[test]
    fn test_concat_marks_undecodable_files() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("blob.bin"), b"\xff\xfe\x00").unwrap();
        fs::write(src.join("ok.txt"), "fine").unwrap();
        let out = temp.path().join("out.txt");

        let summary = concat_directory(&src, &out).unwrap();
        assert_eq!(summary.files, 2);

        let dump = fs::read_to_string(&out).unwrap();
        assert!(dump.contains("--- ERROR: file '"));
        assert!(dump.contains("could not be decoded as UTF-8"));
        assert!(dump.contains("fine\n---\n\n"));
    }

    #[test]
    fn test_concat_normalizes_line_endings() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("mixed.md"), "# T\r\n\r\nx\ry").unwrap();
        let out = temp.path().join("out.txt");

        concat_directory(&src, &out).unwrap();

        let dump = fs::read_to_string(&out).unwrap();
        assert!(dump.contains("mixed.md\n---\n# T\n\nx\ny\n---\n\n"));
        assert!(!dump.contains('\r'));
    }

    #[test]
    fn test_concat_missing_source() {
        let temp = tempdir().unwrap();
        let err = concat_directory(temp.path().join("absent"), temp.path().join("out.txt"))
            .unwrap_err();
        assert!(matches!(err, RepoMetricsError::NotADirectory(_)));
        assert!(!temp.path().join("out.txt").exists());
    }

    #[test]
    fn test_display_path_strips_cwd_and_dot() {
        let cwd = Path::new("/work");
        assert_eq!(
            display_path(Path::new("/work/src/a.rs"), Some(cwd)),
            "src/a.rs"
        );
        assert_eq!(display_path(Path::new("./src/a.rs"), None), "src/a.rs");
        assert_eq!(
            display_path(Path::new("/elsewhere/a.rs"), Some(cwd)),
            "/elsewhere/a.rs"
        );
    }
}
