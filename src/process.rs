//! The main pass: classify each buffered line and emit HTML.
//!
//! Every line goes through the inline editor, then is routed on its first
//! character. Lists, tables and blocks accumulate across lines and are
//! flushed whenever an incompatible line arrives, so at most one of them is
//! open at any time.

use log::debug;

use crate::{
    block::BlockBuilder,
    buffer::{LineBuffer, SectionLevel},
    directives::{Directive, parse_directive, render_image, render_link, render_note},
    document::Context,
    footnotes::FootnoteRegister,
    headings::{HeadingCounters, PendingCaption, render_heading},
    inline::{FootnoteMode, edit_line},
    lists::{ListBuilder, ListLevel, parse_item},
    metadata::{MetaLine, parse_meta_line},
    table::TableBuilder,
};

/// Output of the main pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub html: String,
    /// Tags from `@category:` lines, in document order.
    pub categories: Vec<String>,
    pub footnotes: usize,
    pub headings: usize,
}

pub struct Dispatcher<'a> {
    buffer: &'a LineBuffer,
    ctx: &'a Context<'a>,
    out: String,
    lists: ListBuilder,
    table: TableBuilder,
    block: BlockBuilder,
    footnotes: FootnoteRegister,
    counters: HeadingCounters,
    caption: PendingCaption,
    categories: Vec<String>,
}

impl<'a> Dispatcher<'a> {
    #[must_use]
    pub fn new(buffer: &'a LineBuffer, ctx: &'a Context<'a>) -> Self {
        Self {
            buffer,
            ctx,
            out: String::new(),
            lists: ListBuilder::new(),
            table: TableBuilder::new(),
            block: BlockBuilder::new(),
            footnotes: FootnoteRegister::new(),
            counters: HeadingCounters::new(),
            caption: PendingCaption::default(),
            categories: Vec::new(),
        }
    }

    /// Dispatch every line, then flush whatever is still open.
    #[must_use]
    pub fn run(mut self) -> Body {
        for idx in 0..self.buffer.len() {
            self.dispatch(idx);
        }
        self.flush_list();
        self.flush_table();
        self.flush_block();
        self.flush_footnotes();
        debug!(
            "main pass: {} lines, {} headings, {} footnotes",
            self.buffer.len(),
            self.counters.total(),
            self.footnotes.count()
        );
        Body {
            html: self.out,
            categories: self.categories,
            footnotes: self.footnotes.count(),
            headings: self.counters.total(),
        }
    }

    fn dispatch(&mut self, idx: usize) {
        let buffer = self.buffer;
        let original = buffer.line(idx);
        if self.block.is_open() {
            if original.is_empty() || original.starts_with(' ') {
                self.block.push(original);
                return;
            }
            self.flush_block();
        }
        if original.is_empty() {
            return;
        }

        let transformed = edit_line(original, &mut self.footnotes, FootnoteMode::Commit);
        let Some(first) = transformed.chars().next() else {
            return;
        };
        if let Some(level) = SectionLevel::from_marker(first) {
            self.heading(level);
            return;
        }
        match first {
            '@' => self.metadata(original),
            '*' => {
                self.flush_block();
                self.flush_table();
                if let Some((level, caption)) = parse_item(&transformed) {
                    self.lists.push(level, caption);
                }
            }
            '.' => self.directive(idx, &transformed, original),
            '+' => {
                self.flush_list();
                self.flush_block();
                self.table.border();
            }
            '|' => {
                self.flush_list();
                self.flush_block();
                self.table.row(&transformed);
            }
            ' ' => self.indented(idx, &transformed),
            _ => self.text(idx, &transformed),
        }
    }

    fn heading(&mut self, level: SectionLevel) {
        self.flush_list();
        self.flush_table();
        self.flush_block();
        self.flush_footnotes();
        let id = self.counters.next_id(level);
        let caption = self.caption.take();
        self.out.push_str(&render_heading(level, &id, &caption));
    }

    fn metadata(&mut self, original: &str) {
        if let Some(MetaLine::Categories(tags)) = parse_meta_line(original) {
            self.categories.extend(tags);
        }
    }

    fn directive(&mut self, idx: usize, transformed: &str, original: &str) {
        self.flush_list();
        self.flush_table();
        self.flush_block();
        match parse_directive(transformed, original) {
            Some(Directive::CodeBlock) => self.block.open_code(),
            Some(Directive::Quote { cite }) => self.block.open_quote(&cite),
            Some(Directive::Image(spec)) => self.out.push_str(&render_image(&spec)),
            Some(Directive::Note { title, body }) => {
                self.out.push_str(&render_note(&title, &body));
            }
            Some(Directive::Link { target }) => {
                self.out.push_str(&render_link(&target, self.ctx));
            }
            None => self.paragraph(idx, transformed),
        }
    }

    /// Indented lines outside a block are nested list items; anything else
    /// is body text.
    fn indented(&mut self, idx: usize, transformed: &str) {
        match parse_item(transformed) {
            Some((level @ (ListLevel::Two | ListLevel::Three), caption)) => {
                self.lists.push(level, caption);
            }
            _ => self.paragraph(idx, transformed.trim_start()),
        }
    }

    fn text(&mut self, idx: usize, transformed: &str) {
        if self.buffer.is_heading_caption(idx) {
            self.caption.hold(transformed.to_string());
        } else {
            self.paragraph(idx, transformed);
        }
        self.flush_block();
        self.flush_table();
    }

    fn paragraph(&mut self, idx: usize, text: &str) {
        self.flush_list();
        self.flush_block();
        self.flush_table();
        match self.buffer.enclosing_level(idx) {
            Some(level) => self.out.push_str(&format!(
                "<p class=\"heading_lv{}\">{text}</p>\n",
                level.depth()
            )),
            None => self.out.push_str(&format!("<p>{text}</p>\n")),
        }
    }

    fn flush_list(&mut self) {
        let html = self.lists.flush();
        self.out.push_str(&html);
    }

    fn flush_table(&mut self) {
        let html = self.table.flush();
        self.out.push_str(&html);
    }

    fn flush_block(&mut self) {
        let html = self.block.flush();
        self.out.push_str(&html);
    }

    fn flush_footnotes(&mut self) {
        let html = self.footnotes.flush(&self.ctx.config.footnote_title);
        self.out.push_str(&html);
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::Path};

    use super::*;
    use crate::{config::Config, metadata::PageMeta};

    fn run(buffer: &LineBuffer) -> Body {
        let config = Config::default();
        let pages: HashMap<std::path::PathBuf, PageMeta> = HashMap::new();
        let ctx = Context {
            config: &config,
            site_root: Path::new("."),
            generated_at: "2024-01-01 00:00:00",
            metadata: &pages,
            page: None,
        };
        Dispatcher::new(buffer, &ctx).run()
    }

    #[test]
    fn heading_consumes_pending_caption() {
        let body = run(&buffer!["Title", "=", "Title", "="]);
        assert!(body.html.contains("<h1 id=\"h1_0\">Title</h1>"));
        assert!(body.html.contains("<h1 id=\"h1_1\">Title</h1>"));
        assert!(!body.html.contains("<p>"));
        assert_eq!(body.headings, 2);
    }

    #[test]
    fn paragraph_class_follows_enclosing_heading() {
        let body = run(&buffer!["before", "Sec", "-", "", "after"]);
        assert!(body.html.starts_with("<p>before</p>\n"));
        assert!(body.html.ends_with("<p class=\"heading_lv2\">after</p>\n"));
    }

    #[test]
    fn table_is_flushed_by_following_paragraph() {
        let body = run(&buffer!["+---+", "|a|b|", "+---+", "|1|2|", "+---+", "text"]);
        let table_at = body.html.find("<table").expect("table emitted");
        let para_at = body.html.find("<p>text</p>").expect("paragraph emitted");
        assert!(table_at < para_at);
        assert_eq!(body.html.matches("<td>").count(), 2);
    }

    #[test]
    fn code_block_keeps_literal_markup() {
        let body = run(&buffer![".. code-block::", "", "    a $b$ ##c## !d,e!", "", "after"]);
        assert!(body.html.contains("    a $b$ ##c## !d,e!\n</code></pre>"));
        assert_eq!(body.footnotes, 0);
        assert!(body.html.ends_with("<p>after</p>\n"));
    }

    #[test]
    fn quote_block_uses_cite() {
        let body = run(&buffer![".. quote:: Somebody", "  words"]);
        assert!(body.html.contains("  words<br>\n<cite>Somebody</cite>"));
    }

    #[test]
    fn footnotes_flush_before_next_heading() {
        let body = run(&buffer!["A", "=", "x $one$", "B", "=", "y $two$"]);
        let first_list = body.html.find("[1]").expect("first footnote");
        let second_heading = body.html.find("id=\"h1_1\"").expect("second heading");
        let second_list = body.html.find("[2]").expect("second footnote");
        assert!(first_list < second_heading && second_heading < second_list);
        assert_eq!(body.footnotes, 2);
    }

    #[test]
    fn categories_are_collected() {
        let body = run(&buffer!["@category: a, b", "@page_title: T", "@category: c"]);
        assert_eq!(body.categories, ["a", "b", "c"]);
        assert_eq!(body.html, "");
    }

    #[test]
    fn list_closed_by_paragraph() {
        let body = run(&buffer!["* one", "  * two", "text"]);
        assert!(body.html.starts_with("<ul class=\"left_indent\">"));
        assert!(body.html.ends_with("</ul>\n<p>text</p>\n"));
    }

    #[test]
    fn non_directive_dot_line_is_text() {
        let body = run(&buffer!["...and so on"]);
        assert_eq!(body.html, "<p>...and so on</p>\n");
    }

    #[test]
    fn indented_text_outside_block_is_a_paragraph() {
        let body = run(&buffer!["   loose"]);
        assert_eq!(body.html, "<p>loose</p>\n");
    }

    #[test]
    fn underline_without_caption() {
        let body = run(&buffer!["=", "x"]);
        assert!(body.html.contains("<h1 id=\"h1_0\"></h1>"));
    }

    #[test]
    fn image_and_note_directives() {
        let body = run(&buffer![".. image:: a.png", ".. note:: T, B"]);
        assert!(body.html.contains("<img src=\"a.png\"/>"));
        assert!(body.html.contains("<span class=\"box-title\">T</span>"));
    }
}
