//! Build every document under a directory.
//!
//! Documents convert independently on the rayon pool. Each conversion
//! yields a [`CategoryIndex`] of its own page; these are merged on the
//! calling thread once all pages are done.

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::{
    categories::CategoryIndex,
    config::Config,
    document::Context,
    error::{Error, Result},
    io::{convert_file, output_path},
};

/// Outcome of a tree build.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Sources converted, in walk order.
    pub converted: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, Error)>,
    /// Tags of every converted page, keyed by path relative to the root.
    pub categories: CategoryIndex,
}

impl BatchReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Path of `page` relative to `root`, or `page` itself when it lies
/// outside.
#[must_use]
pub fn site_relative(root: &Path, page: &Path) -> PathBuf {
    page.strip_prefix(root).unwrap_or(page).to_path_buf()
}

/// Every source file under `root`, sorted by name within each directory.
///
/// # Errors
/// Returns [`Error::Walk`] if `root` itself cannot be read. Unreadable
/// entries further down are logged and skipped.
pub fn collect_sources(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && config.is_source(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(source) if source.depth() == 0 => {
                return Err(Error::Walk {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(err) => warn!("skipping unreadable entry: {err}"),
        }
    }
    debug!("found {} sources under {}", files.len(), root.display());
    Ok(files)
}

/// Convert every source under `root` next to itself.
///
/// A failing document is logged and recorded in the report; the rest of
/// the tree still converts.
///
/// # Errors
/// Returns an error only if `root` cannot be walked.
pub fn build_tree(root: &Path, ctx: &Context<'_>) -> Result<BatchReport> {
    let sources = collect_sources(root, ctx.config)?;
    let results: Vec<_> = sources
        .into_par_iter()
        .map(|source| {
            let result = convert_file(&source, &output_path(&source), ctx).map(|conversion| {
                CategoryIndex::for_page(&site_relative(root, &source), &conversion.categories)
            });
            (source, result)
        })
        .collect();

    let mut report = BatchReport::default();
    for (source, result) in results {
        match result {
            Ok(categories) => {
                report.categories.merge(categories);
                report.converted.push(source);
            }
            Err(err) => {
                error!("{err}");
                report.failures.push((source, err));
            }
        }
    }
    info!(
        "built {} documents under {} ({} failed)",
        report.converted.len(),
        root.display(),
        report.failures.len()
    );
    Ok(report)
}
