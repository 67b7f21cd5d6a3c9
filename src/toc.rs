//! Table of contents pre-pass.
//!
//! Walks the line buffer once, before the main pass, and links every
//! underline to the anchor id the dispatcher will give it. The same caption
//! rule and counter order are applied here so the ids line up.

use crate::{
    buffer::{LineBuffer, SectionLevel},
    footnotes::FootnoteRegister,
    headings::{HeadingCounters, caption_eligible},
    inline::{FootnoteMode, edit_line},
    lists::ListBuilder,
};

/// Caption the dispatcher will use for the underline at `idx`.
///
/// Footnotes in the caption are rendered in preview mode against a scratch
/// register, so nothing is recorded.
fn caption_for(buffer: &LineBuffer, idx: usize, scratch: &mut FootnoteRegister) -> String {
    let Some(prev) = idx.checked_sub(1).and_then(|i| buffer.get(i)) else {
        return String::new();
    };
    let rendered = edit_line(prev, scratch, FootnoteMode::Preview);
    if caption_eligible(&rendered) {
        rendered
    } else {
        String::new()
    }
}

/// One heading as the main pass will emit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutlineEntry {
    pub level: SectionLevel,
    pub id: String,
    pub caption: String,
}

/// Every heading of `buffer`, in document order.
pub(crate) fn outline(buffer: &LineBuffer) -> Vec<OutlineEntry> {
    let mut counters = HeadingCounters::new();
    let mut scratch = FootnoteRegister::new();
    buffer
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let level = SectionLevel::of_line(line)?;
            Some(OutlineEntry {
                level,
                id: counters.next_id(level),
                caption: caption_for(buffer, idx, &mut scratch),
            })
        })
        .collect()
}

/// Render the table of contents block for `buffer`.
///
/// `index_href` is the target of the "top" link back to the site index.
#[must_use]
pub fn build_toc(buffer: &LineBuffer, index_href: &str) -> String {
    let mut list = ListBuilder::new();
    for entry in outline(buffer) {
        list.push_outline(
            entry.level.index(),
            format!("<a href=\"#{}\">{}</a>", entry.id, entry.caption),
        );
    }
    let mut out = format!(
        "<u>Table of Contents.</u> &nbsp; <span class=\"toc\"><a href=\"{index_href}\">top</a></span>\n"
    );
    out.push_str(&list.flush_as("toc"));
    out
}
