//! Identifier registry - the canonical path ↔ identifier bijection.
//!
//! Identifiers are derived from the canonical path (version-5 UUID under
//! the URL namespace), so registration is reproducible across process runs
//! without persisting anything. The registry keeps both directions of the
//! mapping and guards the bijection: a freshly derived identifier that
//! already maps to a *different* path is a collision and the new path is
//! rejected, leaving the registry untouched.

use fnv::FnvHashMap;

use crate::error::{CatalogError, Result};
use crate::types::{CanonicalPath, ImageId};

/// Path ↔ identifier bijection for one collection.
///
/// Owned state, one instance per catalog; collaborators receive it by
/// reference.
#[derive(Debug, Default)]
pub struct ImageRegistry {
    by_path: FnvHashMap<CanonicalPath, ImageId>,
    by_id: FnvHashMap<ImageId, CanonicalPath>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` and returns its identifier.
    ///
    /// Idempotent per path: a registered path returns its existing
    /// identifier without minting a second one. Fails with
    /// [`CatalogError::IdentifierCollision`] if the derived identifier is
    /// already bound to a different path; the registry is left unchanged.
    pub fn generate(&mut self, path: &CanonicalPath) -> Result<ImageId> {
        if let Some(id) = self.by_path.get(path) {
            return Ok(*id);
        }

        let id = ImageId::from_path(path);
        if let Some(existing) = self.by_id.get(&id) {
            return Err(CatalogError::IdentifierCollision {
                id,
                existing: existing.clone(),
                candidate: path.clone(),
            });
        }

        self.by_path.insert(path.clone(), id);
        self.by_id.insert(id, path.clone());
        Ok(id)
    }

    /// Returns the identifier for `path`, if registered.
    pub fn lookup(&self, path: &CanonicalPath) -> Option<ImageId> {
        self.by_path.get(path).copied()
    }

    /// Returns the path bound to `id`, if registered.
    pub fn path_for(&self, id: &ImageId) -> Option<&CanonicalPath> {
        self.by_id.get(id)
    }

    /// Removes the bijection for `id`. No-op if absent.
    ///
    /// After release the identifier is free again; a later `generate` of a
    /// different path deriving the same identifier is still checked as a
    /// collision.
    pub fn release(&mut self, id: &ImageId) {
        if let Some(path) = self.by_id.remove(id) {
            self.by_path.remove(&path);
        }
    }

    /// Number of active bijections.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterates the registered identifiers in arbitrary order.
    pub fn ids(&self) -> impl Iterator<Item = &ImageId> {
        self.by_id.keys()
    }
}
