//! Code and quote block capture.
//!
//! A block is opened by a `.. code-block::` or `.. quote::` directive and
//! collects raw lines until the dispatcher flushes it. Blank first and last
//! lines are dropped; blank lines in between are kept.

use crate::highlight::highlight_keywords;

/// What an open block renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockFlavor {
    Code,
    Quote { cite: String },
}

#[derive(Debug, Default)]
pub struct BlockBuilder {
    flavor: Option<BlockFlavor>,
    lines: Vec<String>,
}

impl BlockBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a block zone is active.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.flavor.is_some()
    }

    pub fn open_code(&mut self) {
        self.flavor = Some(BlockFlavor::Code);
        self.lines.clear();
    }

    pub fn open_quote(&mut self, cite: &str) {
        self.flavor = Some(BlockFlavor::Quote {
            cite: cite.trim().to_string(),
        });
        self.lines.clear();
    }

    /// Append a raw line to the open block.
    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Render the block and close the zone.
    ///
    /// Returns an empty string when no block is open or nothing but blank
    /// lines was captured.
    pub fn flush(&mut self) -> String {
        let Some(flavor) = self.flavor.take() else {
            return String::new();
        };
        let lines = std::mem::take(&mut self.lines);
        let body = trim_blank_ends(&lines);
        if body.is_empty() {
            return String::new();
        }
        match flavor {
            BlockFlavor::Code => {
                let mut out = String::from("<pre class=\"code-box deco\"><code>");
                for line in body {
                    out.push_str(&highlight_keywords(line));
                    out.push('\n');
                }
                out.push_str("</code></pre>\n");
                out
            }
            BlockFlavor::Quote { cite } => {
                let mut out = String::from("<blockquote><p><br>\n");
                for line in body {
                    out.push_str(line);
                    out.push_str("<br>\n");
                }
                out.push_str(&format!("<cite>{cite}</cite></p></blockquote>\n"));
                out
            }
        }
    }
}

fn trim_blank_ends(lines: &[String]) -> &[String] {
    let mut body = lines;
    if let [first, rest @ ..] = body
        && first.is_empty()
    {
        body = rest;
    }
    if let [rest @ .., last] = body
        && last.is_empty()
    {
        body = rest;
    }
    body
}
