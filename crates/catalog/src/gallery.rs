//! Ordered image galleries loaded from JSON files.
//!
//! A gallery file names images by their collection-relative paths:
//!
//! ```json
//! {
//!   "gallery_name": "Cyberpunk Cities",
//!   "description": "Collection of futuristic urban landscapes",
//!   "created_date": "2025-09-30",
//!   "images": ["city_001.png", "streets/urban_45.png"]
//! }
//! ```
//!
//! Loading resolves each entry through the canonicalizer and the registry;
//! an entry that does not resolve to a known identifier is skipped with a
//! warning, never an error. The gallery itself is a deque of identifiers,
//! so appending at the end and popping either end is O(1).

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::path::canonical_path;
use crate::registry::ImageRegistry;
use crate::types::ImageId;

/// On-disk gallery layout.
#[derive(Debug, Deserialize)]
struct GalleryFile {
    gallery_name: String,
    #[serde(default)]
    description: String,
    created_date: String,
    images: Vec<String>,
}

/// An ordered list of registered images.
#[derive(Debug, Clone)]
pub struct Gallery {
    name: String,
    description: String,
    created_date: NaiveDate,
    images: VecDeque<ImageId>,
}

impl Gallery {
    /// Loads a gallery file, resolving each entry against `registry`.
    ///
    /// Unresolvable entries (outside the root, or not registered) are
    /// skipped. A file that is not valid JSON, or whose `created_date` is
    /// not `YYYY-MM-DD`, fails with [`CatalogError::InvalidGallery`].
    pub fn load(file: &Path, root: &Path, registry: &ImageRegistry) -> Result<Self> {
        let raw = fs::read_to_string(file)?;
        let parsed: GalleryFile =
            serde_json::from_str(&raw).map_err(|error| CatalogError::InvalidGallery {
                path: file.to_path_buf(),
                reason: error.to_string(),
            })?;

        let created_date = NaiveDate::parse_from_str(&parsed.created_date, "%Y-%m-%d").map_err(
            |error| CatalogError::InvalidGallery {
                path: file.to_path_buf(),
                reason: format!("created_date {:?}: {error}", parsed.created_date),
            },
        )?;

        let mut images = VecDeque::with_capacity(parsed.images.len());
        for entry in &parsed.images {
            let Ok(canonical) = canonical_path(Path::new(entry), root) else {
                log::warn!("gallery {}: entry {entry:?} is outside the collection", parsed.gallery_name);
                continue;
            };
            let Some(id) = registry.lookup(&canonical) else {
                log::warn!("gallery {}: entry {entry:?} is not in the collection", parsed.gallery_name);
                continue;
            };
            images.push_back(id);
        }

        Ok(Self {
            name: parsed.gallery_name,
            description: parsed.description,
            created_date,
            images,
        })
    }

    /// Appends an image at the end of the gallery.
    pub fn push_back(&mut self, id: ImageId) {
        self.images.push_back(id);
    }

    /// Removes and returns the first image, if any.
    pub fn pop_front(&mut self) -> Option<ImageId> {
        self.images.pop_front()
    }

    /// Removes and returns the last image, if any.
    pub fn pop_back(&mut self) -> Option<ImageId> {
        self.images.pop_back()
    }

    /// The images in gallery order.
    pub fn ids(&self) -> impl Iterator<Item = &ImageId> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }
}
