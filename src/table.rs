//! Table accumulation.
//!
//! A table is framed by `+` border lines. The row between the first two
//! borders is the header; rows after the second border are data. A third
//! border closes the table visually but changes nothing.

use log::warn;

/// Where the builder is within a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableState {
    #[default]
    None,
    Header,
    Data,
}

fn next_is_pipe(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    chars.peek() == Some(&'|')
}

/// Split a `|`-delimited row into trimmed cells.
///
/// One leading and one trailing pipe are ignored; `\|` is a literal pipe.
///
/// # Examples
///
/// ```
/// use maki::table::split_cells;
///
/// assert_eq!(split_cells("| a |b\\|c| d |"), vec!["a", "b|c", "d"]);
/// ```
#[must_use]
pub fn split_cells(line: &str) -> Vec<String> {
    let mut s = line.trim();
    if let Some(stripped) = s.strip_prefix('|') {
        s = stripped;
    }
    if let Some(stripped) = s.strip_suffix('|') {
        s = stripped;
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if next_is_pipe(&mut chars) => {
                chars.next();
                current.push('|');
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

#[derive(Debug, Default)]
pub struct TableBuilder {
    state: TableState,
    header: Option<String>,
    rows: Vec<String>,
}

impl TableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> TableState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != TableState::None
    }

    /// Handle a `+` border line.
    pub fn border(&mut self) {
        self.state = match self.state {
            TableState::None => TableState::Header,
            TableState::Header | TableState::Data => TableState::Data,
        };
    }

    /// Record a `|` row. Returns `false` when no table is open and the row
    /// was dropped.
    pub fn row(&mut self, line: &str) -> bool {
        match self.state {
            TableState::None => {
                warn!("table row outside a table: {line}");
                false
            }
            TableState::Header => {
                self.header = Some(line.to_string());
                true
            }
            TableState::Data => {
                self.rows.push(line.to_string());
                true
            }
        }
    }

    /// Render the table and reset to [`TableState::None`].
    ///
    /// A table with neither a header nor data rows renders as nothing.
    pub fn flush(&mut self) -> String {
        self.state = TableState::None;
        let header = self.header.take();
        let rows = std::mem::take(&mut self.rows);
        if header.is_none() && rows.is_empty() {
            return String::new();
        }
        let mut out = String::from("<table class=\"type01\">\n");
        if let Some(header) = header {
            push_row(&mut out, &header, "th");
        }
        for row in &rows {
            push_row(&mut out, row, "td");
        }
        out.push_str("</table>\n");
        out
    }
}

fn push_row(out: &mut String, line: &str, tag: &str) {
    out.push_str("  <tr>\n");
    for cell in split_cells(line) {
        out.push_str(&format!("    <{tag}>{cell}</{tag}>\n"));
    }
    out.push_str("  </tr>\n");
}
