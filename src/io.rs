//! File helpers for converting documents on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    buffer::escape_html,
    document::{Context, Conversion, convert},
    error::{Error, Result},
};

/// Where the HTML for `input` is written by default: the same path with an
/// `.html` extension.
#[must_use]
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

/// Convert `input` and write the page to `output`.
///
/// The page title is the input's file name. When `output` lies under the
/// site root, site links on the page are written relative to it.
///
/// # Errors
/// Returns an error if reading `input` or writing `output` fails.
pub fn convert_file(input: &Path, output: &Path, ctx: &Context<'_>) -> Result<Conversion> {
    debug!("converting {} -> {}", input.display(), output.display());
    let source = fs::read_to_string(input).map_err(|source| Error::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let conversion = match output.strip_prefix(ctx.site_root) {
        Ok(page) => convert(&source, &escape_html(&name), &ctx.for_page(page)),
        Err(_) => convert(&source, &escape_html(&name), ctx),
    };
    fs::write(output, &conversion.html).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(conversion)
}
