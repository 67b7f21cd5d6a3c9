//! Convert Maki markup into styled HTML pages.
//!
//! A document is buffered whole, outlined into a table of contents, and
//! rendered line by line by the [`process::Dispatcher`]. The [`batch`] and
//! [`site`] modules build on single-document conversion to render a whole
//! directory tree and its index page.

#[macro_use]
mod macros;

#[cfg(test)]
#[macro_use]
mod test_utils;

pub mod batch;
pub mod block;
pub mod buffer;
pub mod categories;
pub mod config;
pub mod directives;
pub mod document;
pub mod error;
pub mod footnotes;
pub mod headings;
pub mod highlight;
pub mod inline;
pub mod io;
pub mod lists;
pub mod metadata;
pub mod process;
pub mod site;
pub mod table;
pub mod toc;

pub use batch::{BatchReport, build_tree};
pub use categories::CategoryIndex;
pub use config::Config;
pub use document::{Context, Conversion, convert, format_timestamp};
pub use error::{Error, Result};
pub use io::{convert_file, output_path};
pub use metadata::{FsMetadata, MetadataSource, PageMeta};
pub use site::write_index;
