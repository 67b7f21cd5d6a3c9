//! Heading anchors and caption capture.
//!
//! A heading is written as a caption line followed by an underline of `=`,
//! `-` or `~`. The caption is parked in a [`PendingCaption`] while the
//! underline is still ahead; the underline then emits the heading with an
//! id drawn from [`HeadingCounters`].

use crate::buffer::SectionLevel;

/// Link emitted before every heading and at the end of a document.
pub const PAGE_TOP: &str = "<div class=\"page_top\"><a href=\"#\">^page top</a></div>\n";

/// Per-level counters producing `h1_0`, `h1_1`, `h2_0`, ...
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeadingCounters {
    counts: [usize; 3],
}

impl HeadingCounters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for the next heading at `level` and advance its counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use maki::{buffer::SectionLevel, headings::HeadingCounters};
    ///
    /// let mut counters = HeadingCounters::new();
    /// assert_eq!(counters.next_id(SectionLevel::One), "h1_0");
    /// assert_eq!(counters.next_id(SectionLevel::Two), "h2_0");
    /// assert_eq!(counters.next_id(SectionLevel::One), "h1_1");
    /// ```
    pub fn next_id(&mut self, level: SectionLevel) -> String {
        let slot = &mut self.counts[level.index()];
        let id = format!("h{}_{}", level.depth(), *slot);
        *slot += 1;
        id
    }

    /// Headings emitted so far across all levels.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Single-slot holder for a caption awaiting its underline.
#[derive(Debug, Default)]
pub struct PendingCaption {
    slot: Option<String>,
}

impl PendingCaption {
    pub fn hold(&mut self, caption: String) {
        self.slot = Some(caption);
    }

    /// Consume the held caption. An underline without one gets an empty
    /// caption.
    pub fn take(&mut self) -> String {
        self.slot.take().unwrap_or_default()
    }
}

/// Whether `line` could serve as a heading caption.
///
/// Lines opening with a structural marker are dispatched elsewhere and
/// never become captions.
#[must_use]
pub fn caption_eligible(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|ch| !matches!(ch, '=' | '-' | '~' | '@' | '*' | '.' | '+' | '|' | ' '))
}

/// Render a heading preceded by the page-top link.
#[must_use]
pub fn render_heading(level: SectionLevel, id: &str, caption: &str) -> String {
    let n = level.depth();
    format!("{PAGE_TOP}<h{n} id=\"{id}\">{caption}</h{n}>\n")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn counters_are_independent_per_level() {
        let mut counters = HeadingCounters::new();
        let ids: Vec<String> = [
            SectionLevel::One,
            SectionLevel::Three,
            SectionLevel::One,
            SectionLevel::Three,
            SectionLevel::Two,
        ]
        .into_iter()
        .map(|level| counters.next_id(level))
        .collect();
        assert_eq!(ids, ["h1_0", "h3_0", "h1_1", "h3_1", "h2_0"]);
        assert_eq!(counters.total(), 5);
    }

    #[test]
    fn caption_slot_holds_one_value() {
        let mut caption = PendingCaption::default();
        assert_eq!(caption.take(), "");
        caption.hold("first".into());
        caption.hold("second".into());
        assert_eq!(caption.take(), "second");
        assert_eq!(caption.take(), "");
    }

    #[rstest]
    #[case("Title", true)]
    #[case("&&bold&& title", true)]
    #[case("", false)]
    #[case("* item", false)]
    #[case(".. note:: a,b", false)]
    #[case("|cell|", false)]
    #[case("  indented", false)]
    #[case("@page_title: x", false)]
    fn eligibility(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(caption_eligible(line), expected);
    }

    #[test]
    fn heading_markup() {
        insta::assert_snapshot!(render_heading(SectionLevel::Two, "h2_3", "Setup"), @r##"
        <div class="page_top"><a href="#">^page top</a></div>
        <h2 id="h2_3">Setup</h2>
        "##);
    }
}
