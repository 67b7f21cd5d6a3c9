//! `maki.toml` configuration.
//!
//! Every key is optional. A site without a config file renders with the
//! defaults below.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Error, Result};

/// File name looked up in the site root when no explicit config is given.
pub const CONFIG_FILE: &str = "maki.toml";

/// Nearest directory at or above `start` that holds a `maki.toml`.
#[must_use]
pub fn find_site_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file())
        .map(Path::to_path_buf)
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Value of the `lang` attribute on generated pages.
    pub lang: String,
    /// Extension of source documents, without the dot.
    pub extension: String,
    /// Site index file name, relative to the site root.
    pub index_file: String,
    /// Heading and title of the site index.
    pub index_title: String,
    /// Caption printed above each flushed footnote list.
    pub footnote_title: String,
    /// Badge text of `.. link::` boxes.
    pub link_label: String,
    /// Persisted category index, relative to the site root.
    pub categories_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang: "ja".to_string(),
            extension: "maki".to_string(),
            index_file: "index.maki.html".to_string(),
            index_title: "Maki Main Menu".to_string(),
            footnote_title: "Footnotes".to_string(),
            link_label: "Inner Link".to_string(),
            categories_file: "tmp_category.txt".to_string(),
        }
    }
}

impl Config {
    /// Load config from an explicit TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `maki.toml` from `root`, or return defaults if there is none.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            log::debug!("Using config from: {}", path.display());
            Self::load(&path)
        } else {
            log::debug!("Using default config");
            Ok(Self::default())
        }
    }

    /// Path of the site index inside `root`.
    #[must_use]
    pub fn index_path(&self, root: &Path) -> PathBuf {
        root.join(&self.index_file)
    }

    /// Path of the persisted category index inside `root`.
    #[must_use]
    pub fn categories_path(&self, root: &Path) -> PathBuf {
        root.join(&self.categories_file)
    }

    /// Whether `path` carries the configured source extension.
    #[must_use]
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.extension.as_str())
    }
}
