//! Bootstrap configuration: collection root and display mode.
//!
//! The display mode is carried for the viewer sitting on top of the
//! library; the catalog itself only consumes the root directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CatalogError, Result};

/// How a viewer should present an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "u8")]
pub enum DisplayMode {
    /// Print metadata only.
    MetadataOnly,
    /// Print metadata and show the image.
    #[default]
    MetadataAndImage,
    /// Show the image only.
    ImageOnly,
}

impl TryFrom<u8> for DisplayMode {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::MetadataOnly),
            1 => Ok(Self::MetadataAndImage),
            2 => Ok(Self::ImageOnly),
            other => Err(format!("unknown display mode {other}, expected 0, 1 or 2")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    root: PathBuf,
    #[serde(default)]
    display_mode: DisplayMode,
}

/// Validated bootstrap configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    root: PathBuf,
    display_mode: DisplayMode,
}

impl CatalogConfig {
    /// Builds a configuration for `root` with the default display mode.
    ///
    /// Fails with [`CatalogError::RootNotADirectory`] unless `root` is an
    /// existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CatalogError::RootNotADirectory(root));
        }
        Ok(Self {
            root,
            display_mode: DisplayMode::default(),
        })
    }

    /// Reads and validates a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let parsed: ConfigFile =
            serde_json::from_str(&raw).map_err(|error| CatalogError::InvalidConfig(error.to_string()))?;
        let mut config = Self::new(parsed.root)?;
        config.display_mode = parsed.display_mode;
        Ok(config)
    }

    pub fn with_display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn new_requires_an_existing_directory() {
        let temp = TempDir::new().unwrap();
        assert!(CatalogConfig::new(temp.path()).is_ok());

        let result = CatalogConfig::new(temp.path().join("missing"));
        assert!(matches!(result, Err(CatalogError::RootNotADirectory(_))));
    }

    #[test]
    fn load_parses_root_and_mode() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.json");
        fs::write(
            &file,
            format!(
                r#"{{"root": {}, "display_mode": 2}}"#,
                serde_json::to_string(temp.path()).unwrap()
            ),
        )
        .unwrap();

        let config = CatalogConfig::load(&file).unwrap();
        assert_eq!(config.root(), temp.path());
        assert_eq!(config.display_mode(), DisplayMode::ImageOnly);
    }

    #[test]
    fn display_mode_defaults_when_omitted() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.json");
        fs::write(
            &file,
            format!(r#"{{"root": {}}}"#, serde_json::to_string(temp.path()).unwrap()),
        )
        .unwrap();

        let config = CatalogConfig::load(&file).unwrap();
        assert_eq!(config.display_mode(), DisplayMode::MetadataAndImage);
    }

    #[test]
    fn unknown_display_mode_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.json");
        fs::write(
            &file,
            format!(
                r#"{{"root": {}, "display_mode": 7}}"#,
                serde_json::to_string(temp.path()).unwrap()
            ),
        )
        .unwrap();

        let result = CatalogConfig::load(&file);
        assert!(matches!(result, Err(CatalogError::InvalidConfig(_))));
    }
}
