//! The inline editor.
//!
//! Rewrites a single line in three fixed steps: delimiter pairs, footnotes,
//! then inline links. Only the footnote step touches document state, and
//! only in [`FootnoteMode::Commit`].

use crate::footnotes::{FootnoteRegister, extract_footnotes};

/// Whether footnotes found on a line are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootnoteMode {
    /// Record bodies and advance the counter.
    Commit,
    /// Render references with the current count and record nothing.
    Preview,
}

struct DelimiterPair {
    token: &'static str,
    open: &'static str,
    close: &'static str,
}

const DELIMITER_PAIRS: [DelimiterPair; 6] = [
    DelimiterPair {
        token: "``",
        open: "<code class=\"inline_code\">",
        close: "</code>",
    },
    DelimiterPair {
        token: "##",
        open: "<span class=\"marker_yellow_hoso\">",
        close: "</span>",
    },
    DelimiterPair {
        token: "@@",
        open: "<span class=\"important_sentence\">",
        close: "</span>",
    },
    DelimiterPair {
        token: "&&",
        open: "<span class=\"bold_sentence\">",
        close: "</span>",
    },
    DelimiterPair {
        token: "%%",
        open: "<span class=\"text_strike\">",
        close: "</span>",
    },
    DelimiterPair {
        token: "__",
        open: "<span class=\"strong_impact\">",
        close: "</span>",
    },
];

const LINK_MARKER: char = '!';

/// Wrap every closed `token ... token` span of `line` in `open`/`close`.
///
/// Segments alternate between literal and delimited text. When the token
/// occurs an odd number of times the trailing fragment is left unwrapped and
/// the unmatched token is kept as written.
fn wrap_delimited(line: &str, token: &str, open: &str, close: &str) -> String {
    if !line.contains(token) {
        return line.to_string();
    }
    let segments: Vec<&str> = line.split(token).collect();
    let last = segments.len() - 1;
    let mut out = String::with_capacity(line.len() + segments.len() * open.len());
    for (idx, segment) in segments.into_iter().enumerate() {
        if idx % 2 == 0 {
            out.push_str(segment);
        } else if idx == last {
            out.push_str(token);
            out.push_str(segment);
        } else {
            out.push_str(open);
            out.push_str(segment);
            out.push_str(close);
        }
    }
    out
}

/// Split a `label,url` link body into exactly two non-empty tokens.
fn parse_link(segment: &str) -> Option<(&str, &str)> {
    let mut tokens = segment.split(',').map(str::trim).filter(|t| !t.is_empty());
    let label = tokens.next()?;
    let url = tokens.next()?;
    tokens.next().is_none().then_some((label, url))
}

/// Render `!label,url!` spans as a badge and anchor.
fn insert_links(line: &str) -> String {
    if !line.contains(LINK_MARKER) {
        return line.to_string();
    }
    let segments: Vec<&str> = line.split(LINK_MARKER).collect();
    let last = segments.len() - 1;
    let mut out = String::with_capacity(line.len() * 2);
    for (idx, segment) in segments.into_iter().enumerate() {
        if idx % 2 == 0 {
            out.push_str(segment);
            continue;
        }
        match parse_link(segment) {
            Some((label, url)) if idx != last => {
                out.push_str(&format!(
                    "<span class=\"sankou-badge\">Link</span><a href=\"{url}\" target=\"_blank\">{label}</a>"
                ));
            }
            _ => {
                out.push(LINK_MARKER);
                out.push_str(segment);
                if idx != last {
                    out.push(LINK_MARKER);
                }
            }
        }
    }
    out
}

/// Apply every inline substitution to `line`.
///
/// # Examples
///
/// ```
/// use maki::{footnotes::FootnoteRegister, inline::{FootnoteMode, edit_line}};
///
/// let mut register = FootnoteRegister::new();
/// let html = edit_line("a %%b%% c", &mut register, FootnoteMode::Commit);
/// assert_eq!(html, "a <span class=\"text_strike\">b</span> c");
/// ```
#[must_use]
pub fn edit_line(line: &str, footnotes: &mut FootnoteRegister, mode: FootnoteMode) -> String {
    let mut work = line.to_string();
    for pair in &DELIMITER_PAIRS {
        work = wrap_delimited(&work, pair.token, pair.open, pair.close);
    }
    let work = extract_footnotes(&work, footnotes, mode);
    insert_links(&work)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn commit(line: &str) -> String {
        edit_line(line, &mut FootnoteRegister::new(), FootnoteMode::Commit)
    }

    #[rstest]
    #[case("a ``b`` c", "a <code class=\"inline_code\">b</code> c")]
    #[case("##hi##", "<span class=\"marker_yellow_hoso\">hi</span>")]
    #[case("@@x@@ and @@y@@", "<span class=\"important_sentence\">x</span> and <span class=\"important_sentence\">y</span>")]
    #[case("&&b&&", "<span class=\"bold_sentence\">b</span>")]
    #[case("__big__!", "<span class=\"strong_impact\">big</span>!")]
    fn wraps_delimiter_pairs(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(commit(input), expected);
    }

    #[rstest]
    #[case("a ``b", "a ``b")]
    #[case("``a`` b ``c", "<code class=\"inline_code\">a</code> b ``c")]
    #[case("trailing %%", "trailing %%")]
    fn leaves_odd_trailing_fragment_unwrapped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(commit(input), expected);
    }

    #[test]
    fn nests_different_pairs() {
        assert_eq!(
            commit("&&##both##&&"),
            "<span class=\"bold_sentence\"><span class=\"marker_yellow_hoso\">both</span></span>"
        );
    }

    #[test]
    fn renders_inline_link() {
        assert_eq!(
            commit("see !Docs,https://example.com! now"),
            "see <span class=\"sankou-badge\">Link</span><a href=\"https://example.com\" target=\"_blank\">Docs</a> now"
        );
    }

    #[test]
    fn link_at_line_start() {
        assert!(commit("!Docs,https://example.com!").starts_with("<span class=\"sankou-badge\">"));
    }

    #[rstest]
    #[case("Wow! great! ok")]
    #[case("Hello!")]
    #[case("!a,b,c! three tokens")]
    fn non_link_exclamations_pass_through(#[case] line: &str) {
        assert_eq!(commit(line), line);
    }

    #[test]
    fn footnote_and_code_on_one_line() {
        let mut register = FootnoteRegister::new();
        let out = edit_line("``x`` then $note$", &mut register, FootnoteMode::Commit);
        assert!(out.starts_with("<code class=\"inline_code\">x</code> then "));
        assert!(out.contains("id=\"o1\""));
        assert_eq!(register.count(), 1);
    }
}
