//! The site index page.
//!
//! Lists the directory tree under the site root, one entry per level-1
//! heading of each page, followed by one collapsible list per category.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use walkdir::WalkDir;

use crate::{
    batch::site_relative,
    buffer::{LineBuffer, SectionLevel},
    categories::CategoryIndex,
    document::{Context, epilogue, prologue},
    error::{Error, Result},
    metadata::PageMeta,
    toc::outline,
};

/// Link from the index page to the output of `page`, a source path
/// relative to the site root.
fn href_for(ctx: &Context<'_>, page: &Path) -> String {
    ctx.site_href(&page.with_extension("html"))
}

fn write_page(out: &mut String, path: &Path, ctx: &Context<'_>, pad: &str) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("skipping {} in site index: {err}", path.display());
            return;
        }
    };
    let meta = PageMeta::scan(&text);
    let outline_text = meta.outline.unwrap_or_default();
    let href = href_for(ctx, &site_relative(ctx.site_root, path));
    let buffer = LineBuffer::from_source(&text);
    for entry in outline(&buffer)
        .into_iter()
        .filter(|entry| entry.level == SectionLevel::One)
    {
        out.push_str(&format!(
            "{pad}<li><a href=\"{href}#{}\">{}</a>&nbsp; {outline_text}</li>\n",
            entry.id, entry.caption
        ));
    }
}

fn write_dir(out: &mut String, dir: &Path, ctx: &Context<'_>, depth: usize) -> Result<()> {
    let pad = "  ".repeat(depth * 2 + 1);
    let name = if depth == 0 {
        ctx.site_root.display().to_string()
    } else {
        dir.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    };
    out.push_str(&format!(
        "{pad}<li><details>\n{pad}  <summary><span class=\"tocHeader\">{name}</span></summary>\n{pad}  <ul>\n"
    ));
    let inner = format!("{pad}    ");
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if depth == 0 && source.depth() == 0 => {
                return Err(Error::Walk {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            write_dir(out, entry.path(), ctx, depth + 1)?;
        } else if ctx.config.is_source(entry.path()) {
            write_page(out, entry.path(), ctx, &inner);
        }
    }
    out.push_str(&format!("{pad}  </ul>\n{pad}</details></li>\n"));
    Ok(())
}

fn write_categories(out: &mut String, categories: &CategoryIndex, ctx: &Context<'_>) {
    for (tag, pages) in categories.iter() {
        out.push_str(&format!(
            "  <li><details>\n    <summary><span class=\"tocHeader\">#{tag}</span></summary>\n    <ul>\n"
        ));
        for page in pages {
            let meta = ctx
                .metadata
                .page_meta(&ctx.site_root.join(page))
                .unwrap_or_default();
            let title = meta
                .title
                .unwrap_or_else(|| page.display().to_string());
            let outline_text = meta.outline.unwrap_or_default();
            out.push_str(&format!(
                "      <li><a href=\"{}\">{title}</a>&nbsp; {outline_text}</li>\n",
                href_for(ctx, page)
            ));
        }
        out.push_str("    </ul>\n  </details></li>\n");
    }
}

/// Render the index page for the site rooted at `ctx.site_root`.
///
/// # Errors
/// Returns [`Error::Walk`] if the root cannot be read.
pub fn render_index(ctx: &Context<'_>, categories: &CategoryIndex) -> Result<String> {
    let index_page = PathBuf::from(&ctx.config.index_file);
    let ctx = &ctx.for_page(&index_page);
    let title = &ctx.config.index_title;
    let mut html = prologue(title, &ctx.config.lang);
    html.push_str(&format!("<h1 id=\"h1_0\">{title}</h1>\n<ul class=\"toc\">\n"));
    write_dir(&mut html, ctx.site_root, ctx, 0)?;
    write_categories(&mut html, categories, ctx);
    html.push_str("</ul>\n");
    html.push_str(&epilogue(ctx.generated_at));
    Ok(html)
}

/// Render the index page and write it to its configured location.
///
/// # Errors
/// Returns an error if the root cannot be walked or the page not written.
pub fn write_index(ctx: &Context<'_>, categories: &CategoryIndex) -> Result<PathBuf> {
    let html = render_index(ctx, categories)?;
    let path = ctx.config.index_path(ctx.site_root);
    fs::write(&path, html).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    info!("wrote site index {}", path.display());
    Ok(path)
}
