use std::path::PathBuf;

use crate::types::{CanonicalPath, ImageId};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("path {path} does not lie under the collection root")]
    PathOutsideRoot { path: PathBuf },

    #[error("root path is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("identifier {id} for {candidate} already maps to {existing}")]
    IdentifierCollision {
        id: ImageId,
        existing: CanonicalPath,
        candidate: CanonicalPath,
    },

    #[error("image {0} is already registered")]
    DuplicateImage(ImageId),

    #[error("invalid gallery file {path}: {reason}")]
    InvalidGallery { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
