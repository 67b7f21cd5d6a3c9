//! Utility helpers shared across integration tests.
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::{
    fs,
    path::{Path, PathBuf},
};

use html5ever::{driver::ParseOpts, parse_document, tendril::TendrilSink};
use maki::{Config, Context, MetadataSource, PageMeta};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Build a `Vec<String>` from a list of string slices.
///
/// Used to spell out documents line by line.
macro_rules! lines_vec {
    ($($line:expr),* $(,)?) => {
        vec![$($line.to_string()),*]
    };
}

/// Join document lines with newlines, ending with one.
pub fn source(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Linked pages are never found.
pub struct NoPages;

impl MetadataSource for NoPages {
    fn page_meta(&self, _path: &Path) -> Option<PageMeta> {
        None
    }
}

pub const GENERATED_AT: &str = "2024-01-02 03:04:05";

/// Convert `lines` with default settings and a fixed timestamp.
pub fn render(lines: &[String]) -> String {
    let config = Config::default();
    let ctx = Context {
        config: &config,
        site_root: Path::new("site"),
        generated_at: GENERATED_AT,
        metadata: &NoPages,
        page: None,
    };
    maki::convert(&source(lines), "test.maki", &ctx).html
}

/// Write `files` (relative path, content) under `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(rel, content)| {
            let path = root.join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("failed to create directory");
            }
            fs::write(&path, content).expect("failed to write file");
            path
        })
        .collect()
}

/// Text content of a DOM node, whitespace collapsed to single spaces.
fn node_text(handle: &Handle) -> String {
    let mut out = String::new();
    let mut last_space = false;
    collect_text(handle, &mut out, &mut last_space);
    out.trim().to_string()
}

fn collect_text(handle: &Handle, out: &mut String, last_space: &mut bool) {
    match &handle.data {
        NodeData::Text { contents } => {
            for ch in contents.borrow().chars() {
                if ch.is_whitespace() {
                    *last_space = true;
                } else {
                    if *last_space && !out.is_empty() {
                        out.push(' ');
                    }
                    out.push(ch);
                    *last_space = false;
                }
            }
        }
        NodeData::Element { .. } | NodeData::Document => {
            for child in handle.children.borrow().iter() {
                collect_text(child, out, last_space);
            }
        }
        _ => {}
    }
}

fn collect_elements(handle: &Handle, tag: &str, found: &mut Vec<Handle>) {
    if let NodeData::Element { name, .. } = &handle.data
        && name.local.as_ref().eq_ignore_ascii_case(tag)
    {
        found.push(handle.clone());
    }
    for child in handle.children.borrow().iter() {
        collect_elements(child, tag, found);
    }
}

/// Text of every `tag` element in `html`, in document order.
pub fn element_texts(html: &str, tag: &str) -> Vec<String> {
    let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let mut found = Vec::new();
    collect_elements(&dom.document, tag, &mut found);
    found.iter().map(node_text).collect()
}
