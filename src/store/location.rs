//! Store location parsing and in-memory alias normalization.

use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical sentinel for a private in-memory store.
pub const MEMORY_SENTINEL: &str = ":memory:";

/// Where a store lives: a filesystem path, or process memory.
///
/// Normalization happens exactly once, in [`Location::parse`]; the parsed
/// value is what file deletion during a reset relies on. Mode detection on
/// a live connection is the engine's job, not this type's (see
/// [`Store::is_memory`](crate::Store::is_memory)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Private in-memory store; state vanishes when the handle closes.
    InMemory,
    /// File-backed store at the given path.
    File(PathBuf),
}

impl Location {
    /// Parse a raw location string, applying the in-memory aliasing rule.
    ///
    /// The literal `"file::memory:"`, and any string containing
    /// `"?mode=memory"`, normalize to the memory sentinel.
    pub fn parse(raw: &str) -> Self {
        if raw == MEMORY_SENTINEL || raw == "file::memory:" || raw.contains("?mode=memory") {
            Location::InMemory
        } else {
            Location::File(PathBuf::from(raw))
        }
    }

    /// The backing path, for file-backed locations.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::InMemory => None,
            Location::File(path) => Some(path),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::InMemory => f.write_str(MEMORY_SENTINEL),
            Location::File(path) => write!(f, "{}", path.display()),
        }
    }
}
