//! Source discovery: find files to measure.
//!
//! This module handles the first stage of the pipeline - discovering what
//! files to count. It provides:
//!
//! - **Enumeration**: the [`FileEnumerator`] capability with a Git-backed
//!   and a filesystem-walk implementation
//! - **Strategy selection**: [`select_enumerator`] picks one from an
//!   [`EnumerationMode`](crate::EnumerationMode)
//! - **File filtering**: user include/exclude glob patterns
//!
//! ## Example
//!
//! ```rust,ignore
//! use repometricslib::source::{select_enumerator, FileEnumerator};
//! use repometricslib::EnumerationMode;
//!
//! let enumerator = select_enumerator(".", EnumerationMode::Auto)?;
//! for rel in enumerator.list_files()? {
//!     println!("{}", rel.display());
//! }
//! ```

pub mod enumerator;
pub mod filter;
pub mod git;
pub mod walk;

pub use enumerator::{select_enumerator, FileEnumerator, Strategy};
pub use filter::FilterConfig;
pub use git::{git_root, is_git_repo, GitEnumerator};
pub use walk::{RootIgnore, WalkEnumerator};
