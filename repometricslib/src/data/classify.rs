//! Binary detection by null-byte sniffing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Guess whether a file is binary from its first `sample_size` bytes.
///
/// A null byte anywhere in the sample means binary. A file that cannot be
/// opened or read is reported as binary so it is never scanned as text.
pub fn is_probably_binary(path: impl AsRef<Path>, sample_size: usize) -> bool {
    let file = match File::open(path.as_ref()) {
        Ok(f) => f,
        Err(_) => return true,
    };

    let mut sample = Vec::with_capacity(sample_size);
    match file.take(sample_size as u64).read_to_end(&mut sample) {
        Ok(_) => sample.contains(&0),
        Err(_) => true,
    }
}
