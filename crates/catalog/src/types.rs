//! Core value types shared across the catalog.
//!
//! Both types are thin newtypes: a [`CanonicalPath`] is the stable string
//! key for one file inside the collection, an [`ImageId`] is the
//! deterministic identifier derived from it. Keeping them distinct from
//! plain strings prevents a raw filesystem path from ever being used as a
//! registry or store key.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A root-relative, `/`-separated, case-preserving file path.
///
/// Two paths naming the same file on disk canonicalize to the identical
/// string; see [`crate::path::canonical_path`] for the construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// Wraps an already-normalized relative path string.
    ///
    /// Callers outside the canonicalizer should go through
    /// [`crate::path::canonical_path`] instead.
    pub(crate) fn new(path: String) -> Self {
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Deterministic identifier of one image in the collection.
///
/// Derived from the canonical path as a version-5 (namespace) UUID, so the
/// same path always yields the same identifier across process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(Uuid);

impl ImageId {
    /// Derives the identifier for a canonical path.
    pub fn from_path(path: &CanonicalPath) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, path.as_str().as_bytes()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_deterministic() {
        let path = CanonicalPath::new("sub/cat.png".to_string());
        assert_eq!(ImageId::from_path(&path), ImageId::from_path(&path));
    }

    #[test]
    fn distinct_paths_yield_distinct_ids() {
        let a = CanonicalPath::new("a.png".to_string());
        let b = CanonicalPath::new("b.png".to_string());
        assert_ne!(ImageId::from_path(&a), ImageId::from_path(&b));
    }

    #[test]
    fn canonical_path_displays_raw() {
        let path = CanonicalPath::new("sub/cat.png".to_string());
        assert_eq!(path.to_string(), "sub/cat.png");
    }
}
