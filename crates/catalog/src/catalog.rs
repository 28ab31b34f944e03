//! The catalog facade: scan → identify → enrich → query.
//!
//! `Catalog` owns one snapshotter, one registry and one metadata store and
//! keeps the latter two holding the same identifier set across rescans.
//! Per-item failures during a rescan or a batch metadata load are counted
//! and skipped; they never abort the batch.

use std::path::{Path, PathBuf};

use crate::config::CatalogConfig;
use crate::error::Result;
use crate::gallery::Gallery;
use crate::registry::ImageRegistry;
use crate::search::SearchEngine;
use crate::snapshot::Snapshotter;
use crate::store::{LoadOutcome, MetadataStore};
use crate::types::ImageId;

/// What one [`Catalog::rescan`] did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RescanSummary {
    /// Identifiers registered for files that appeared, in snapshot order.
    pub added: Vec<ImageId>,
    /// Identifiers released for files that disappeared, in snapshot order.
    pub removed: Vec<ImageId>,
    /// Appeared files skipped over a per-item failure.
    pub skipped: usize,
}

/// One image collection: root directory plus the component trio.
#[derive(Debug)]
pub struct Catalog {
    root: PathBuf,
    snapshotter: Snapshotter,
    registry: ImageRegistry,
    store: MetadataStore,
}

impl Catalog {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            root: config.root().to_path_buf(),
            snapshotter: Snapshotter::new(),
            registry: ImageRegistry::new(),
            store: MetadataStore::new(),
        }
    }

    /// Walks the collection root and folds the delta into the registry and
    /// the store.
    ///
    /// Added files are registered and given an empty record; removed files
    /// are released from both. A file whose registration fails (collision,
    /// duplicate) is skipped and counted, and the rest of the batch
    /// proceeds.
    pub fn rescan(&mut self) -> RescanSummary {
        self.snapshotter.reload(&self.root);
        let mut summary = RescanSummary::default();

        for path in self.snapshotter.files_added() {
            let id = match self.registry.generate(&path) {
                Ok(id) => id,
                Err(error) => {
                    log::warn!("rescan: skipping {path}: {error}");
                    summary.skipped += 1;
                    continue;
                }
            };
            match self.store.add_image(id, path) {
                Ok(()) => summary.added.push(id),
                Err(error) => {
                    log::warn!("rescan: skipping {id}: {error}");
                    summary.skipped += 1;
                }
            }
        }

        for path in self.snapshotter.files_removed() {
            // A path that never registered has nothing to release.
            let Some(id) = self.registry.lookup(&path) else {
                continue;
            };
            self.registry.release(&id);
            self.store.remove_image(&id);
            summary.removed.push(id);
        }

        log::debug!(
            "rescan: {} added, {} removed, {} skipped, {} total",
            summary.added.len(),
            summary.removed.len(),
            summary.skipped,
            self.store.len()
        );
        summary
    }

    /// Reads the embedded metadata of every catalogued image.
    ///
    /// Returns how many images were actually read (loaded or readable but
    /// empty); unreadable files are left at sentinel values and skipped.
    pub fn load_all_metadata(&mut self) -> usize {
        let ids: Vec<ImageId> = self.store.ids().copied().collect();
        let mut read = 0;
        for id in ids {
            match self.store.load_metadata(&self.root, &id) {
                LoadOutcome::Loaded { .. } | LoadOutcome::Empty => read += 1,
                LoadOutcome::Unreadable | LoadOutcome::UnknownImage => {}
            }
        }
        read
    }

    /// Refreshes the metadata of a single image.
    pub fn load_metadata(&mut self, id: &ImageId) -> LoadOutcome {
        self.store.load_metadata(&self.root, id)
    }

    /// A borrowing search engine over the current store.
    pub fn search(&self) -> SearchEngine<'_> {
        SearchEngine::new(&self.store)
    }

    /// Loads a gallery file against this catalog's registry.
    pub fn load_gallery(&self, file: &Path) -> Result<Gallery> {
        Gallery::load(file, &self.root, &self.registry)
    }

    pub fn registry(&self) -> &ImageRegistry {
        &self.registry
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of catalogued images.
    pub fn image_count(&self) -> usize {
        self.store.len()
    }
}
