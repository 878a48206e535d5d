//! Line scanning for text files.
//!
//! Files are decoded as UTF-8 with invalid sequences replaced by U+FFFD, so
//! scanning never fails on malformed content. Lines end at `\n`, `\r\n` or a
//! lone `\r`, and the terminator counts toward the line's characters.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::RepoMetricsError;
use crate::Result;

/// Counts produced by scanning one text file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounts {
    pub lines: u64,
    pub chars: u64,
    pub bytes: u64,
    pub blank: u64,
    pub comment: u64,
    pub code: u64,
}

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Whitespace only
    Blank,
    /// Starts with the comment prefix after leading whitespace
    Comment,
    /// Any other non-blank line
    Code,
    /// Non-blank, but the breakdown is off for this file
    Unclassified,
}

/// Decode bytes as UTF-8, replacing invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Classify `line`.
///
/// With `comment_prefix` set, non-blank lines are comment or code; the prefix
/// is anchored at the first non-whitespace character, so a trailing comment
/// after code does not count. Without it, non-blank lines are unclassified.
pub fn classify_line(line: &str, comment_prefix: Option<&str>) -> LineKind {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    match comment_prefix {
        Some(prefix) if line.trim_start().starts_with(prefix) => LineKind::Comment,
        Some(_) => LineKind::Code,
        None => LineKind::Unclassified,
    }
}

impl ScanCounts {
    fn record_line(&mut self, line: &str, comment_prefix: Option<&str>) {
        self.lines += 1;
        self.chars += line.chars().count() as u64;
        match classify_line(line, comment_prefix) {
            LineKind::Blank => self.blank += 1,
            LineKind::Comment => self.comment += 1,
            LineKind::Code => self.code += 1,
            LineKind::Unclassified => {}
        }
    }
}

/// Split a `\n`-terminated chunk further at lone `\r` terminators.
fn split_lone_cr(chunk: &[u8]) -> Vec<&[u8]> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, &b) in chunk.iter().enumerate() {
        if b == b'\r' && chunk.get(i + 1) != Some(&b'\n') {
            pieces.push(&chunk[start..=i]);
            start = i + 1;
        }
    }
    if start < chunk.len() {
        pieces.push(&chunk[start..]);
    }
    pieces
}

/// Scan text from `reader`.
///
/// `bytes` in the result is the number of bytes consumed.
pub fn scan_reader<R: BufRead>(mut reader: R, comment_prefix: Option<&str>) -> io::Result<ScanCounts> {
    let mut counts = ScanCounts::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        counts.bytes += read as u64;

        for piece in split_lone_cr(&buf) {
            counts.record_line(&decode_lossy(piece), comment_prefix);
        }
    }

    Ok(counts)
}

/// Scan the text file at `path`.
///
/// Fails with `FileTooLarge` before reading when the on-disk size exceeds
/// `max_bytes` (`None` or `Some(0)` means no limit), and with
/// `UnreadableFile` when the file cannot be stat'ed, opened or read. `bytes`
/// in the result is the on-disk size.
pub fn scan_file(
    path: impl AsRef<Path>,
    max_bytes: Option<u64>,
    comment_prefix: Option<&str>,
) -> Result<ScanCounts> {
    let path = path.as_ref();
    let unreadable = |source: io::Error| RepoMetricsError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(unreadable)?.len();
    if let Some(limit) = max_bytes.filter(|&l| l > 0) {
        if size > limit {
            return Err(RepoMetricsError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
    }

    let file = File::open(path).map_err(unreadable)?;
    let mut counts = scan_reader(BufReader::new(file), comment_prefix).map_err(unreadable)?;
    counts.bytes = size;
    Ok(counts)
}
