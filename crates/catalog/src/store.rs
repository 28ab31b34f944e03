//! Identifier → metadata record store.
//!
//! Each registered image owns one [`ImageRecord`]: its canonical path, the
//! pixel dimensions, and the eight recognized generation fields. Records
//! are created empty by [`MetadataStore::add_image`] and filled (any number
//! of times) by [`MetadataStore::load_metadata`], which re-reads the PNG on
//! every call so a changed file can be refreshed.
//!
//! Getters never fail: an unknown identifier or an unset field yields
//! `None`, and `dimensions` yields `(0, 0)`. Records iterate in identifier
//! order, which is the stable order the search engine exposes.

pub mod fields;
pub mod png;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::path;
use crate::types::{CanonicalPath, ImageId};

pub use fields::{MetadataField, ALL_FIELDS};
use png::read_png_info;

/// Typed result of one [`MetadataStore::load_metadata`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The PNG was read and `fields` recognized fields were stored.
    Loaded { fields: usize },
    /// The PNG was read but carried no recognized metadata.
    Empty,
    /// The file is missing, unreadable, or not a PNG.
    Unreadable,
    /// The identifier is not in the store.
    UnknownImage,
}

/// One image's stored metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    path: CanonicalPath,
    width: u32,
    height: u32,
    fields: BTreeMap<MetadataField, Option<String>>,
}

impl ImageRecord {
    fn empty(path: CanonicalPath) -> Self {
        Self {
            path,
            width: 0,
            height: 0,
            // Every recognized field is always present, unset.
            fields: ALL_FIELDS.iter().map(|&field| (field, None)).collect(),
        }
    }

    fn clear_fields(&mut self) {
        for value in self.fields.values_mut() {
            *value = None;
        }
    }

    pub fn path(&self) -> &CanonicalPath {
        &self.path
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The stored value of `field`, or `None` if unset.
    pub fn field(&self, field: MetadataField) -> Option<&str> {
        self.fields.get(&field).and_then(Option::as_deref)
    }
}

/// The identifier-keyed record map for one collection.
#[derive(Debug, Default)]
pub struct MetadataStore {
    records: BTreeMap<ImageId, ImageRecord>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record for `id`.
    ///
    /// Fails with [`CatalogError::DuplicateImage`] if the identifier is
    /// already present; the existing record is preserved unchanged.
    pub fn add_image(&mut self, id: ImageId, path: CanonicalPath) -> Result<()> {
        if self.records.contains_key(&id) {
            return Err(CatalogError::DuplicateImage(id));
        }
        self.records.insert(id, ImageRecord::empty(path));
        Ok(())
    }

    /// Removes the record for `id`. No-op if absent.
    pub fn remove_image(&mut self, id: &ImageId) {
        self.records.remove(id);
    }

    /// Reads the image file under `root` and refreshes the record.
    ///
    /// Idempotent and safe to repeat; each call re-reads the whole file.
    /// Never panics or propagates parse failures; the outcome says what
    /// happened, and the degraded cases also log a warning.
    pub fn load_metadata(&mut self, root: &Path, id: &ImageId) -> LoadOutcome {
        let Some(record) = self.records.get_mut(id) else {
            log::warn!("load_metadata: unknown image {id}");
            return LoadOutcome::UnknownImage;
        };

        let absolute = path::resolve(root, &record.path);
        let Some(info) = read_png_info(&absolute) else {
            record.width = 0;
            record.height = 0;
            record.clear_fields();
            log::warn!("no metadata read from {}", absolute.display());
            return LoadOutcome::Unreadable;
        };

        record.width = info.width;
        record.height = info.height;
        record.clear_fields();
        for (keyword, value) in info.texts {
            if let Some(field) = MetadataField::from_keyword(&keyword) {
                record.fields.insert(field, Some(value));
            }
        }

        let recognized = record.fields.values().filter(|v| v.is_some()).count();
        if recognized == 0 {
            log::warn!("empty metadata in {}", absolute.display());
            return LoadOutcome::Empty;
        }
        LoadOutcome::Loaded { fields: recognized }
    }

    /// The stored value of `field` for `id`; `None` for an unknown
    /// identifier or an unset field.
    pub fn field(&self, id: &ImageId, field: MetadataField) -> Option<&str> {
        self.records.get(id).and_then(|record| record.field(field))
    }

    pub fn prompt(&self, id: &ImageId) -> Option<&str> {
        self.field(id, MetadataField::Prompt)
    }

    pub fn seed(&self, id: &ImageId) -> Option<&str> {
        self.field(id, MetadataField::Seed)
    }

    pub fn cfg_scale(&self, id: &ImageId) -> Option<&str> {
        self.field(id, MetadataField::CfgScale)
    }

    pub fn steps(&self, id: &ImageId) -> Option<&str> {
        self.field(id, MetadataField::Steps)
    }

    pub fn sampler(&self, id: &ImageId) -> Option<&str> {
        self.field(id, MetadataField::Sampler)
    }

    pub fn model(&self, id: &ImageId) -> Option<&str> {
        self.field(id, MetadataField::Model)
    }

    pub fn generated(&self, id: &ImageId) -> Option<&str> {
        self.field(id, MetadataField::Generated)
    }

    pub fn created_date(&self, id: &ImageId) -> Option<&str> {
        self.field(id, MetadataField::CreatedDate)
    }

    /// Pixel dimensions for `id`; `(0, 0)` for an unknown identifier.
    pub fn dimensions(&self, id: &ImageId) -> (u32, u32) {
        self.records
            .get(id)
            .map(ImageRecord::dimensions)
            .unwrap_or((0, 0))
    }

    pub fn path_for(&self, id: &ImageId) -> Option<&CanonicalPath> {
        self.records.get(id).map(ImageRecord::path)
    }

    pub fn contains(&self, id: &ImageId) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifiers in store (identifier) order.
    pub fn ids(&self) -> impl Iterator<Item = &ImageId> {
        self.records.keys()
    }

    /// Records in store order; the search engine iterates here.
    pub fn iter(&self) -> impl Iterator<Item = (&ImageId, &ImageRecord)> {
        self.records.iter()
    }
}
