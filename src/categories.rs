//! Category tags across a site.
//!
//! Each conversion reports the tags of its own page. A [`CategoryIndex`]
//! merges those reports into a tag → pages map and persists it as plain
//! text, one `tag;path1,path2` line per tag.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    tags: BTreeMap<String, Vec<PathBuf>>,
}

impl CategoryIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index holding only `page` under each of `tags`.
    #[must_use]
    pub fn for_page(page: &Path, tags: &[String]) -> Self {
        let mut index = Self::new();
        for tag in tags {
            index.record(tag, page);
        }
        index
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Pages recorded under `tag`, in insertion order.
    #[must_use]
    pub fn pages(&self, tag: &str) -> &[PathBuf] {
        self.tags.get(tag).map_or(&[], Vec::as_slice)
    }

    /// Tags in natural order with their pages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.tags
            .iter()
            .map(|(tag, pages)| (tag.as_str(), pages.as_slice()))
    }

    /// Record `page` under `tag` unless it is already there.
    pub fn record(&mut self, tag: &str, page: &Path) {
        let pages = self.tags.entry(tag.to_string()).or_default();
        if !pages.iter().any(|p| p == page) {
            pages.push(page.to_path_buf());
        }
    }

    /// Forget `page` under every tag, dropping tags left empty.
    pub fn remove_page(&mut self, page: &Path) {
        self.tags.retain(|_, pages| {
            pages.retain(|p| p != page);
            !pages.is_empty()
        });
    }

    /// Replace the tags of `page`. Returns whether the index changed.
    pub fn replace_page(&mut self, page: &Path, tags: &[String]) -> bool {
        let before = self.clone();
        self.remove_page(page);
        self.merge(Self::for_page(page, tags));
        *self != before
    }

    /// Fold every entry of `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        for (tag, pages) in other.tags {
            for page in pages {
                self.record(&tag, &page);
            }
        }
    }

    /// Serialise as one `tag;path1,path2` line per tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use maki::categories::CategoryIndex;
    ///
    /// let mut index = CategoryIndex::new();
    /// index.record("rust", Path::new("a.maki"));
    /// index.record("rust", Path::new("b.maki"));
    /// assert_eq!(index.to_text(), "rust;a.maki,b.maki\n");
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (tag, pages) in &self.tags {
            let joined: Vec<String> = pages.iter().map(|p| p.display().to_string()).collect();
            out.push_str(&format!("{tag};{}\n", joined.join(",")));
        }
        out
    }

    /// Parse the text form. Lines without a `;` or without pages are
    /// skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut index = Self::new();
        for line in text.lines() {
            let Some((tag, pages)) = line.split_once(';') else {
                continue;
            };
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            for page in pages.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                index.record(tag, Path::new(page));
            }
        }
        index
    }

    /// Load a persisted index. A missing file is an empty index.
    ///
    /// # Errors
    /// Returns [`Error::Read`] if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!("no category index at {}", path.display());
                Ok(Self::new())
            }
            Err(source) => Err(Error::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write the index to `path`.
    ///
    /// # Errors
    /// Returns [`Error::Write`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
