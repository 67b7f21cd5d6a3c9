//! Page-scoped footnotes.
//!
//! Footnote bodies are lifted out of running text by the inline editor and
//! parked in a [`FootnoteRegister`] until the next heading or the end of the
//! document, where the register is flushed as a list. The counter is never
//! reset within a document, so anchors stay unique across flushes.

mod inline;

pub(crate) use inline::extract_footnotes;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FootnoteRegister {
    entries: Vec<String>,
    count: usize,
}

impl FootnoteRegister {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of footnotes committed so far in this document.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Rendered entries waiting for the next flush.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a footnote and return its number.
    pub(crate) fn commit(&mut self, label: Option<&str>, body: &str) -> usize {
        self.count += 1;
        let n = self.count;
        let entry = match label {
            Some(label) => format!(
                "<span id=\"f{n}\"><a href=\"#o{n}\">[{n}]</a></span>: <b><u>{label}</u></b>: {body}"
            ),
            None => format!("<span id=\"f{n}\"><a href=\"#o{n}\">[{n}]</a></span>: {body}"),
        };
        self.entries.push(entry);
        n
    }

    /// Render pending entries under `title` and clear them.
    ///
    /// Returns an empty string when nothing is pending. The counter keeps
    /// its value.
    pub fn flush(&mut self, title: &str) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let mut out = String::from("<hr>\n");
        out.push_str(&format!("<div class=\"footnote_title\">{title}</div>\n"));
        out.push_str("<ul style=\"list-style:none\">\n");
        for entry in self.entries.drain(..) {
            out.push_str(&format!("<li><span class=\"footnote\">{entry}</span></li>\n"));
        }
        out.push_str("</ul>\n<br>\n");
        out
    }
}
