//! Path canonicalization.
//!
//! Every path entering the catalog, whether from a filesystem walk or from
//! a gallery file, is reduced to one canonical form: relative to the
//! collection root, `.`/`..` resolved, components joined with `/`. The
//! canonical form is the key everything else (registry, store, snapshots)
//! agrees on, so two spellings of the same file can never register twice.
//!
//! Resolution is purely lexical; no filesystem access and no symlink
//! traversal. A path that does not lie under the root after resolution is
//! rejected with [`CatalogError::PathOutsideRoot`].

use std::path::{Component, Path, PathBuf};

use crate::error::{CatalogError, Result};
use crate::types::CanonicalPath;

/// Canonicalizes `path` against the collection `root`.
///
/// Relative inputs are interpreted as relative to `root`. The result is
/// idempotent: feeding a canonical path back in yields the same value.
pub fn canonical_path(path: &Path, root: &Path) -> Result<CanonicalPath> {
    let root = resolve_dots(root);
    let absolute = if path.is_absolute() {
        resolve_dots(path)
    } else {
        resolve_dots(&root.join(path))
    };

    let relative = absolute
        .strip_prefix(&root)
        .map_err(|_| CatalogError::PathOutsideRoot {
            path: path.to_path_buf(),
        })?;

    // The root itself is not a file inside the collection.
    if relative.as_os_str().is_empty() {
        return Err(CatalogError::PathOutsideRoot {
            path: path.to_path_buf(),
        });
    }

    let joined = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Ok(CanonicalPath::new(joined))
}

/// Resolves a canonical path back to an absolute filesystem location.
pub fn resolve(root: &Path, path: &CanonicalPath) -> PathBuf {
    root.join(path.as_str())
}

/// Lexically resolves `.` and `..` components.
///
/// A `..` that would climb past the start of a relative path is kept; one
/// that would climb past a filesystem root is dropped.
fn resolve_dots(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push(Component::ParentDir);
                }
            }
        }
    }
    out
}
