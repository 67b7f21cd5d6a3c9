//! Bullet list accumulation.
//!
//! Items arrive one line at a time and are grafted onto a forest of
//! [`ListNode`]s. A `Branch` always holds the children of the node before
//! it, so the forest renders as properly nested `<ul>` elements.

use log::warn;

/// One entry of the list forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListNode {
    Leaf(String),
    Branch(Vec<ListNode>),
}

/// Nesting level of a bullet item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLevel {
    /// `* item`
    One,
    /// `  * item`
    Two,
    /// `    * item`
    Three,
}

impl ListLevel {
    fn depth(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
        }
    }
}

/// Recognise a bullet line and return its level and caption.
///
/// Indentation of zero spaces is level one, two or three spaces level two
/// and four or more level three. A single space is not a list indent.
///
/// # Examples
///
/// ```
/// use maki::lists::{ListLevel, parse_item};
///
/// assert_eq!(parse_item("  * child"), Some((ListLevel::Two, "child")));
/// assert_eq!(parse_item("plain"), None);
/// ```
#[must_use]
pub fn parse_item(line: &str) -> Option<(ListLevel, &str)> {
    let body = line.trim_start_matches(' ');
    let level = match line.len() - body.len() {
        0 => ListLevel::One,
        1 => return None,
        2 | 3 => ListLevel::Two,
        _ => ListLevel::Three,
    };
    let caption = body.strip_prefix('*')?;
    let caption = caption.strip_prefix(' ').unwrap_or(caption);
    Some((level, caption.trim_end()))
}

/// Append `caption` at `depth` below the last node of `nodes`, opening
/// intermediate branches where none exist yet.
fn graft(nodes: &mut Vec<ListNode>, depth: usize, caption: String) {
    if depth == 0 {
        nodes.push(ListNode::Leaf(caption));
        return;
    }
    if !matches!(nodes.last(), Some(ListNode::Branch(_))) {
        nodes.push(ListNode::Branch(Vec::new()));
    }
    if let Some(ListNode::Branch(children)) = nodes.last_mut() {
        graft(children, depth - 1, caption);
    }
}

#[derive(Debug, Default)]
pub struct ListBuilder {
    roots: Vec<ListNode>,
}

impl ListBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.roots.is_empty()
    }

    /// Accumulated forest, in document order.
    #[must_use]
    pub fn nodes(&self) -> &[ListNode] {
        &self.roots
    }

    /// Add a bullet item.
    ///
    /// A level-three item with no open level-two branch is absorbed as a
    /// level-two item.
    pub fn push(&mut self, level: ListLevel, caption: &str) {
        let level = match level {
            ListLevel::Three if !matches!(self.roots.last(), Some(ListNode::Branch(_))) => {
                warn!("level-3 list item without a level-2 parent: {caption}");
                ListLevel::Two
            }
            other => other,
        };
        graft(&mut self.roots, level.depth(), caption.to_string());
    }

    /// Add an entry at an arbitrary depth, opening any missing levels.
    pub(crate) fn push_outline(&mut self, depth: usize, caption: String) {
        graft(&mut self.roots, depth, caption);
    }

    /// Render the accumulated items and reset the builder.
    pub fn flush(&mut self) -> String {
        self.flush_as("left_indent")
    }

    pub(crate) fn flush_as(&mut self, class: &str) -> String {
        if self.roots.is_empty() {
            return String::new();
        }
        let nodes = std::mem::take(&mut self.roots);
        render_forest(&nodes, class)
    }
}

/// Render `nodes` as a nested list whose outermost `<ul>` carries `class`.
pub(crate) fn render_forest(nodes: &[ListNode], class: &str) -> String {
    let mut out = String::new();
    write_list(&mut out, nodes, Some(class), 0);
    out
}

fn write_list(out: &mut String, nodes: &[ListNode], class: Option<&str>, depth: usize) {
    let pad = "    ".repeat(depth);
    let item_pad = format!("{pad}  ");
    match class {
        Some(class) => out.push_str(&format!("{pad}<ul class=\"{class}\">\n")),
        None => out.push_str(&format!("{pad}<ul>\n")),
    }
    let mut iter = nodes.iter().peekable();
    while let Some(node) = iter.next() {
        match node {
            ListNode::Leaf(caption) => {
                if let Some(ListNode::Branch(children)) = iter.peek() {
                    out.push_str(&format!("{item_pad}<li>{caption}\n"));
                    write_list(out, children, None, depth + 1);
                    out.push_str(&format!("{item_pad}</li>\n"));
                    iter.next();
                } else {
                    out.push_str(&format!("{item_pad}<li>{caption}</li>\n"));
                }
            }
            ListNode::Branch(children) => {
                out.push_str(&format!("{item_pad}<li>\n"));
                write_list(out, children, None, depth + 1);
                out.push_str(&format!("{item_pad}</li>\n"));
            }
        }
    }
    out.push_str(&format!("{pad}</ul>\n"));
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("* top", Some((ListLevel::One, "top")))]
    #[case("*tight", Some((ListLevel::One, "tight")))]
    #[case("  * two", Some((ListLevel::Two, "two")))]
    #[case("   * two", Some((ListLevel::Two, "two")))]
    #[case("    * three", Some((ListLevel::Three, "three")))]
    #[case("      * deep", Some((ListLevel::Three, "deep")))]
    #[case(" * one space", None)]
    #[case("  text", None)]
    fn parses_items(#[case] line: &str, #[case] expected: Option<(ListLevel, &str)>) {
        assert_eq!(parse_item(line), expected);
    }

    #[test]
    fn grandchild_nesting() {
        let mut builder = ListBuilder::new();
        builder.push(ListLevel::One, "A");
        builder.push(ListLevel::Two, "B");
        builder.push(ListLevel::Three, "C");
        assert_eq!(
            builder.nodes(),
            [
                ListNode::Leaf("A".into()),
                ListNode::Branch(vec![
                    ListNode::Leaf("B".into()),
                    ListNode::Branch(vec![ListNode::Leaf("C".into())]),
                ]),
            ]
        );
        insta::assert_snapshot!(builder.flush(), @r#"
        <ul class="left_indent">
          <li>A
            <ul>
              <li>B
                <ul>
                  <li>C</li>
                </ul>
              </li>
            </ul>
          </li>
        </ul>
        "#);
        assert!(!builder.is_open());
    }

    #[test]
    fn siblings_share_a_branch() {
        let mut builder = ListBuilder::new();
        builder.push(ListLevel::One, "A");
        builder.push(ListLevel::Two, "a1");
        builder.push(ListLevel::Two, "a2");
        builder.push(ListLevel::One, "B");
        assert_eq!(builder.nodes().len(), 3);
        let html = builder.flush();
        assert!(html.contains("<li>a1</li>\n      <li>a2</li>"));
        assert!(html.ends_with("  <li>B</li>\n</ul>\n"));
    }

    #[test]
    fn orphan_level_three_becomes_level_two() {
        let mut builder = ListBuilder::new();
        builder.push(ListLevel::One, "A");
        builder.push(ListLevel::Three, "C");
        assert_eq!(
            builder.nodes(),
            [
                ListNode::Leaf("A".into()),
                ListNode::Branch(vec![ListNode::Leaf("C".into())]),
            ]
        );
    }

    #[test]
    fn level_two_without_parent_opens_root_branch() {
        let mut builder = ListBuilder::new();
        builder.push(ListLevel::Two, "b");
        insta::assert_snapshot!(builder.flush(), @r#"
        <ul class="left_indent">
          <li>
            <ul>
              <li>b</li>
            </ul>
          </li>
        </ul>
        "#);
    }

    #[test]
    fn outline_opens_intermediate_levels() {
        let mut builder = ListBuilder::new();
        builder.push_outline(0, "one".into());
        builder.push_outline(2, "three".into());
        let html = builder.flush_as("toc");
        assert!(html.starts_with("<ul class=\"toc\">\n  <li>one\n    <ul>\n      <li>\n"));
        assert_eq!(html.matches("<ul").count(), 3);
        assert_eq!(html.matches("</ul>").count(), 3);
    }

    #[test]
    fn empty_flush_emits_nothing() {
        assert_eq!(ListBuilder::new().flush(), "");
    }
}
