//! Inline footnote extraction.
//!
//! A footnote is written inline between `$` markers. An optional `{label}`
//! inside the body becomes a bold lead-in on the footnote entry.

use std::sync::LazyLock;

use regex::Regex;

use super::FootnoteRegister;
use crate::inline::FootnoteMode;

const MARKER: char = '$';

static LABEL_RE: LazyLock<Regex> = lazy_regex!(r"\{[^}]*\}", "footnote label pattern");

/// Separate the first `{label}` group from a footnote body.
fn split_label(segment: &str) -> (Option<String>, String) {
    let Some(whole) = LABEL_RE.find(segment) else {
        return (None, segment.trim().to_string());
    };
    let label = whole
        .as_str()
        .strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or_default()
        .trim();
    let mut body = String::with_capacity(segment.len());
    body.push_str(&segment[..whole.start()]);
    body.push_str(&segment[whole.end()..]);
    (
        Some(label.to_string()).filter(|l| !l.is_empty()),
        body.trim().to_string(),
    )
}

fn reference(n: usize, tooltip: &str) -> String {
    format!(
        "<span class=\"supText\" id=\"o{n}\"><a href=\"#f{n}\" title=\"{tooltip}\">*{n}</a></span>"
    )
}

/// Replace each `$...$` span in `line` with a superscript reference.
///
/// In [`FootnoteMode::Commit`] the body is recorded in `register` and the
/// reference carries the new number. In [`FootnoteMode::Preview`] the
/// register is left untouched and the reference shows the current count.
/// An empty or unterminated span is written back literally.
pub(crate) fn extract_footnotes(
    line: &str,
    register: &mut FootnoteRegister,
    mode: FootnoteMode,
) -> String {
    if !line.contains(MARKER) {
        return line.to_string();
    }
    let segments: Vec<&str> = line.split(MARKER).collect();
    let last = segments.len() - 1;
    let mut out = String::with_capacity(line.len() * 2);

    for (idx, segment) in segments.iter().enumerate() {
        if idx % 2 == 0 {
            out.push_str(segment);
            continue;
        }
        if idx == last || segment.trim().is_empty() {
            out.push(MARKER);
            out.push_str(segment);
            if idx != last {
                out.push(MARKER);
            }
            continue;
        }

        let (label, body) = split_label(segment);
        let tooltip = body.replace('"', "");
        let n = match mode {
            FootnoteMode::Commit => register.commit(label.as_deref(), &body),
            FootnoteMode::Preview => register.count(),
        };

        if !out.is_empty() && !out.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        out.push_str(&reference(n, &tooltip));
        let next = segments.get(idx + 1).copied().unwrap_or_default();
        if !next.is_empty() && !next.starts_with(char::is_whitespace) {
            out.push(' ');
        }
    }
    out
}
