//! `.. name::` directives.
//!
//! The kind is recognised by substring, in the order code-block, quote,
//! image, note, link. Image and link arguments are read from the original
//! line so paths are never touched by inline markup; quote citations and
//! notes are read from the edited line.

use std::path::PathBuf;

use log::warn;

use crate::{document::Context, metadata::PageMeta};

const MISSING_TITLE: &str = "Linked page annotation(@page_title) is not set.";
const MISSING_OUTLINE: &str = "Linked page annotation(@page_outline) is not set.";

/// Placement of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// No alignment given.
    Default,
    Left,
    Right,
    Center,
    /// An alignment word that is not recognised.
    Other,
}

impl Alignment {
    fn parse(word: Option<&str>) -> Self {
        match word.map(str::trim) {
            None | Some("") => Self::Default,
            Some("left") => Self::Left,
            Some("right") => Self::Right,
            Some("center") => Self::Center,
            Some(_) => Self::Other,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Default => "image_block",
            Self::Left => "image_left",
            Self::Right => "image_right",
            Self::Center => "image_center",
            Self::Other => "image_plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    pub path: String,
    pub width: Option<String>,
    pub align: Alignment,
}

impl ImageSpec {
    fn parse(args: &str) -> Self {
        let mut parts = args.split(',');
        let path = parts.next().unwrap_or_default().trim().to_string();
        let width = parts
            .next()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string);
        let align = Alignment::parse(parts.next());
        Self { path, width, align }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    CodeBlock,
    Quote { cite: String },
    Image(ImageSpec),
    Note { title: String, body: String },
    Link { target: String },
}

/// Text after `marker` in `line`, trimmed.
fn argument<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|at| line[at + marker.len()..].trim())
}

/// Recognise a directive. Lines naming no known directive yield `None`.
///
/// # Examples
///
/// ```
/// use maki::directives::{Directive, parse_directive};
///
/// let line = ".. note:: Tip, read this";
/// assert_eq!(
///     parse_directive(line, line),
///     Some(Directive::Note { title: "Tip".into(), body: "read this".into() })
/// );
/// ```
#[must_use]
pub fn parse_directive(transformed: &str, original: &str) -> Option<Directive> {
    if transformed.contains("code-block::") {
        return Some(Directive::CodeBlock);
    }
    if let Some(cite) = argument(transformed, "quote::") {
        return Some(Directive::Quote {
            cite: cite.to_string(),
        });
    }
    if let Some(args) = argument(original, "image::") {
        return Some(Directive::Image(ImageSpec::parse(args)));
    }
    if let Some(args) = argument(transformed, "note::") {
        let (title, body) = args.split_once(',').unwrap_or((args, ""));
        return Some(Directive::Note {
            title: title.trim().to_string(),
            body: body.trim().to_string(),
        });
    }
    argument(original, "link::").map(|target| Directive::Link {
        target: target.to_string(),
    })
}

#[must_use]
pub fn render_image(spec: &ImageSpec) -> String {
    let path = &spec.path;
    let img = match &spec.width {
        Some(width) => format!("<img src=\"{path}\" width=\"{width}\"/>"),
        None => format!("<img src=\"{path}\"/>"),
    };
    format!(
        "<div class=\"{}\">\n<a href=\"{path}\">{img}</a></div>\n",
        spec.align.class()
    )
}

#[must_use]
pub fn render_note(title: &str, body: &str) -> String {
    format!(
        "<br>\n<div class=\"box27\">\n    <span class=\"box-title\">{title}</span>\n    <p>{body}</p>\n</div>\n"
    )
}

/// A `.. link::` target as a path relative to the site root.
///
/// A leading `.` is dropped, so `./a/b.maki` and `/a/b.maki` name the same
/// page.
fn link_target(target: &str) -> PathBuf {
    let relative = target.strip_prefix('.').unwrap_or(target);
    PathBuf::from(relative.trim_start_matches(['/', '\\']))
}

/// Render a cross-reference box for another page of the site.
///
/// An unreadable target still renders, with placeholder annotations.
#[must_use]
pub fn render_link(target: &str, ctx: &Context<'_>) -> String {
    let relative = link_target(target);
    let source = ctx.site_root.join(&relative);
    let meta = ctx.metadata.page_meta(&source).unwrap_or_else(|| {
        warn!("linked page {} could not be read", source.display());
        PageMeta::default()
    });
    let href = if ctx.config.is_source(&relative) {
        ctx.site_href(&relative.with_extension("html"))
    } else {
        ctx.site_href(&relative)
    };
    let title = meta.title.as_deref().unwrap_or(MISSING_TITLE);
    let outline = meta.outline.as_deref().unwrap_or(MISSING_OUTLINE);
    format!(
        "<div class=\"inner-link-box\">\n  <span class=\"link-badge\">{label}</span><a href=\"{href}\" target=\"_blank\"><b>{title}</b></a><br>\n  <div class=\"inner-link-outline\">{outline}</div>\n</div>\n",
        label = ctx.config.link_label,
    )
}
