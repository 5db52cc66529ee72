//! Resource document formats understood by resxbundle.

pub mod resx;

use std::path::Path;

pub use resx::Format as ResxFormat;

/// Extension of the resource files the compiler accepts.
pub const RESX_EXTENSION: &str = "resx";

/// Returns `true` when `path` has a `.resx` extension (case-insensitive).
pub fn is_resx_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RESX_EXTENSION))
}
