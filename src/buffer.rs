//! The ordered, immutable line buffer every pass reads from.
//!
//! Documents are ingested whole. Each line is HTML-escaped once and stored
//! in order; after that the buffer never changes. Both the outline pass and
//! the dispatcher index into it, looking one line ahead for heading
//! underlines and arbitrarily far back for the section a paragraph sits in.

use std::borrow::Cow;

/// Heading level introduced by an underline line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionLevel {
    /// `=` underline.
    One,
    /// `-` underline.
    Two,
    /// `~` underline.
    Three,
}

impl SectionLevel {
    /// Map a line-initial character to the level it underlines.
    #[must_use]
    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            '=' => Some(Self::One),
            '-' => Some(Self::Two),
            '~' => Some(Self::Three),
            _ => None,
        }
    }

    /// Level of `line` if it starts with a section prefix.
    #[must_use]
    pub fn of_line(line: &str) -> Option<Self> {
        line.chars().next().and_then(Self::from_marker)
    }

    /// 1, 2 or 3.
    #[must_use]
    pub fn depth(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.depth() - 1
    }
}

/// Replace `<` and `>` with entity codes.
///
/// Ampersands are left alone: `&&` is itself an inline marker.
#[must_use]
pub fn escape_html(line: &str) -> Cow<'_, str> {
    if line.contains(['<', '>']) {
        Cow::Owned(line.replace('<', "&lt;").replace('>', "&gt;"))
    } else {
        Cow::Borrowed(line)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Split `source` into lines and escape each of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use maki::buffer::LineBuffer;
    ///
    /// let buffer = LineBuffer::from_source("a <b>\r\nc\n");
    /// assert_eq!(buffer.len(), 2);
    /// assert_eq!(buffer.line(0), "a &lt;b&gt;");
    /// ```
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        Self::from_lines(source.lines())
    }

    /// Build a buffer from already split lines, escaping each one.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|line| escape_html(line.as_ref()).into_owned())
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Line `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    #[must_use]
    pub fn line(&self, idx: usize) -> &str {
        &self.lines[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Whether line `idx` is the caption of a heading, i.e. the next raw
    /// line starts with a section prefix.
    #[must_use]
    pub fn is_heading_caption(&self, idx: usize) -> bool {
        self.get(idx + 1).and_then(SectionLevel::of_line).is_some()
    }

    /// Level of the nearest underline at or before line `idx`.
    ///
    /// Returns `None` for text that precedes every heading.
    #[must_use]
    pub fn enclosing_level(&self, idx: usize) -> Option<SectionLevel> {
        let end = idx.min(self.lines.len().saturating_sub(1));
        self.lines
            .get(..=end)?
            .iter()
            .rev()
            .filter(|line| !line.is_empty())
            .find_map(|line| SectionLevel::of_line(line))
    }
}
