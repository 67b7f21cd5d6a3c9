//! Page annotations.
//!
//! Lines beginning with `@` carry metadata rather than content:
//! `@page_title:`, `@page_outline:` and `@category:`. The first two are read
//! from *other* documents by `.. link::` boxes and the site index, through
//! the [`MetadataSource`] seam.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::buffer::escape_html;

const TITLE_KEY: &str = "@page_title";
const OUTLINE_KEY: &str = "@page_outline";
const CATEGORY_KEY: &str = "@category";

/// A recognised `@` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaLine {
    Title(String),
    Outline(String),
    Categories(Vec<String>),
}

/// Value after the first `:` of `line`, trimmed.
fn value_of(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, value)| value.trim())
}

/// Parse one `@` metadata line. Unknown keys yield `None`.
///
/// # Examples
///
/// ```
/// use maki::metadata::{MetaLine, parse_meta_line};
///
/// assert_eq!(
///     parse_meta_line("@category: rust, tools ,"),
///     Some(MetaLine::Categories(vec!["rust".into(), "tools".into()]))
/// );
/// ```
#[must_use]
pub fn parse_meta_line(line: &str) -> Option<MetaLine> {
    let key = line.split(':').next().unwrap_or_default().trim_end();
    match key {
        TITLE_KEY => Some(MetaLine::Title(value_of(line).to_string())),
        OUTLINE_KEY => Some(MetaLine::Outline(value_of(line).to_string())),
        CATEGORY_KEY => Some(MetaLine::Categories(
            value_of(line)
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        _ => None,
    }
}

/// Title and outline annotations of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub outline: Option<String>,
}

impl PageMeta {
    /// Collect annotations from a document's text. Later lines win.
    #[must_use]
    pub fn scan(text: &str) -> Self {
        let mut meta = Self::default();
        for line in text.lines() {
            match parse_meta_line(line) {
                Some(MetaLine::Title(title)) if !title.is_empty() => {
                    meta.title = Some(escape_html(&title).into_owned());
                }
                Some(MetaLine::Outline(outline)) if !outline.is_empty() => {
                    meta.outline = Some(escape_html(&outline).into_owned());
                }
                _ => {}
            }
        }
        meta
    }
}

/// Look up the annotations of another page.
pub trait MetadataSource {
    /// `None` when the page cannot be read.
    fn page_meta(&self, path: &Path) -> Option<PageMeta>;
}

/// Reads annotations straight from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMetadata;

impl MetadataSource for FsMetadata {
    fn page_meta(&self, path: &Path) -> Option<PageMeta> {
        match fs::read_to_string(path) {
            Ok(text) => Some(PageMeta::scan(&text)),
            Err(err) => {
                debug!("cannot read metadata from {}: {err}", path.display());
                None
            }
        }
    }
}

impl MetadataSource for HashMap<PathBuf, PageMeta> {
    fn page_meta(&self, path: &Path) -> Option<PageMeta> {
        self.get(path).cloned()
    }
}
