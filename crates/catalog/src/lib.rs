//! Catalog of AI-generated PNG images.
//!
//! This crate indexes a directory tree of PNG files and exposes the
//! pipeline scan → identify → enrich → query:
//! - Canonical root-relative paths and deterministic identifiers
//! - Filesystem snapshots with added/removed deltas across rescans
//! - Embedded generation metadata read from PNG text chunks
//! - Case-sensitive substring search with AND/OR combinators
//!
//! [`Catalog`] wires the components together; each piece is also usable on
//! its own.

pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod path;
pub mod registry;
pub mod search;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export main types
pub use catalog::{Catalog, RescanSummary};
pub use config::{CatalogConfig, DisplayMode};
pub use error::{CatalogError, Result};
pub use gallery::Gallery;
pub use path::canonical_path;
pub use registry::ImageRegistry;
pub use search::{and_operator, or_operator, SearchEngine};
pub use snapshot::Snapshotter;
pub use store::{LoadOutcome, MetadataField, MetadataStore};
pub use types::{CanonicalPath, ImageId};
