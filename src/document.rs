//! Whole-document conversion.
//!
//! The source is buffered first, the table of contents is built from the
//! buffer, then the main pass renders the body. The result is wrapped in a
//! fixed page shell with an embedded stylesheet and a generation footer.

use std::{
    path::{Component, Path},
    time::{SystemTime, UNIX_EPOCH},
};

use log::debug;

use crate::{
    buffer::LineBuffer,
    config::Config,
    headings::PAGE_TOP,
    metadata::MetadataSource,
    process::Dispatcher,
    toc::build_toc,
};

const STYLE: &str = include_str!("style.css");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const HELP: &str = "<div class=\"help\"><code>[``]: code</code>&nbsp;&nbsp;&nbsp;<code>[##]: marker</code>&nbsp;&nbsp;&nbsp;<code>[@@]: alert</code>&nbsp;&nbsp;&nbsp;<code>[&amp;&amp;]: bold + underline</code>&nbsp;&nbsp;&nbsp;<code>[%%]: strike</code>&nbsp;&nbsp;&nbsp;<code>[__]: strong big</code></div>\n";

/// Everything a conversion needs from outside the document itself.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a Config,
    /// Directory `.. link::` targets and the site index are resolved against.
    pub site_root: &'a Path,
    /// Footer timestamp, see [`format_timestamp`].
    pub generated_at: &'a str,
    pub metadata: &'a (dyn MetadataSource + Sync),
    /// Output page being written, relative to `site_root`. When `None`,
    /// site links are written as `site_root`-joined paths.
    pub page: Option<&'a Path>,
}

impl<'a> Context<'a> {
    /// The same context, writing links for the output page `page`.
    #[must_use]
    pub fn for_page<'b>(&self, page: &'b Path) -> Context<'b>
    where
        'a: 'b,
    {
        Context {
            page: Some(page),
            ..*self
        }
    }

    /// Prefix leading from the output page back to the site root.
    #[must_use]
    pub fn root_href(&self) -> String {
        match self.page {
            Some(page) => {
                let depth = page.parent().map_or(0, |dir| {
                    dir.components()
                        .filter(|part| matches!(part, Component::Normal(_)))
                        .count()
                });
                "../".repeat(depth)
            }
            None => {
                let mut root = self.site_root.to_string_lossy().replace('\\', "/");
                if !root.is_empty() && !root.ends_with('/') {
                    root.push('/');
                }
                root
            }
        }
    }

    /// Link from the output page to `target`, a path relative to the site
    /// root.
    #[must_use]
    pub fn site_href(&self, target: &Path) -> String {
        format!(
            "{}{}",
            self.root_href(),
            target.to_string_lossy().replace('\\', "/")
        )
    }

    /// Target of the "top" link in the table of contents.
    #[must_use]
    pub fn index_href(&self) -> String {
        self.site_href(Path::new(&self.config.index_file))
    }
}

/// A rendered page and what it reported about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub html: String,
    pub categories: Vec<String>,
}

/// Convert one document.
///
/// `title` goes into `<title>` verbatim, so callers escape it.
#[must_use]
pub fn convert(source: &str, title: &str, ctx: &Context<'_>) -> Conversion {
    let buffer = LineBuffer::from_source(source);
    let toc = build_toc(&buffer, &ctx.index_href());
    let body = Dispatcher::new(&buffer, ctx).run();
    debug!(
        "converted {title}: {} headings, {} footnotes",
        body.headings, body.footnotes
    );

    let mut html = prologue(title, &ctx.config.lang);
    html.push_str(&toc);
    html.push_str(&body.html);
    html.push_str(&epilogue(ctx.generated_at));
    Conversion {
        html,
        categories: body.categories,
    }
}

pub(crate) fn prologue(title: &str, lang: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n  <meta charset=\"UTF-8\"/>\n  <title>{title}</title>\n  <link rel=\"stylesheet\" type=\"text/css\" href=\"https://fonts.googleapis.com/css?family=Lato\" />\n  <style type=\"text/css\">\n{STYLE}  </style>\n</head>\n<body>\n"
    )
}

pub(crate) fn epilogue(generated_at: &str) -> String {
    format!(
        "<br>\n{PAGE_TOP}<div class=\"footer\">Last Generated:{generated_at}／Generated by Maki {VERSION}&nbsp;</div>\n{HELP}</body>\n</html>\n"
    )
}

/// Format `time` as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
/// use maki::document::format_timestamp;
///
/// let t = UNIX_EPOCH + Duration::from_secs(951_782_400 + 3_723);
/// assert_eq!(format_timestamp(t), "2000-02-29 01:02:03");
/// ```
#[must_use]
pub fn format_timestamp(time: SystemTime) -> String {
    let secs = time.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
    let (year, month, day) = civil_from_days(secs / 86_400);
    let rem = secs % 86_400;
    format!(
        "{year:04}-{month:02}-{day:02} {:02}:{:02}:{:02}",
        rem / 3600,
        rem % 3600 / 60,
        rem % 60
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian date.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf, time::Duration};

    use rstest::rstest;

    use super::*;
    use crate::metadata::PageMeta;

    #[rstest]
    #[case(0, "1970-01-01 00:00:00")]
    #[case(951_782_400, "2000-02-29 00:00:00")]
    #[case(1_700_000_000, "2023-11-14 22:13:20")]
    fn formats_utc(#[case] secs: u64, #[case] expected: &str) {
        assert_eq!(
            format_timestamp(UNIX_EPOCH + Duration::from_secs(secs)),
            expected
        );
    }

    #[test]
    fn shell_wraps_toc_and_body() {
        let config = Config::default();
        let pages: HashMap<PathBuf, PageMeta> = HashMap::new();
        let ctx = Context {
            config: &config,
            site_root: Path::new("site"),
            generated_at: "2024-05-06 07:08:09",
            metadata: &pages,
            page: None,
        };
        let page = convert("Hello\n=\nworld\n", "hello.maki", &ctx);
        let html = &page.html;
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"ja\">\n"));
        assert!(html.contains("<title>hello.maki</title>"));
        let toc = html.find("Table of Contents.").expect("toc");
        let heading = html.find("<h1 id=\"h1_0\">Hello</h1>").expect("heading");
        let footer = html
            .find("Last Generated:2024-05-06 07:08:09／Generated by Maki ")
            .expect("footer");
        assert!(toc < heading && heading < footer);
        assert!(html.contains("<a href=\"site/index.maki.html\">top</a>"));
        assert!(html.ends_with("</body>\n</html>\n"));
    }

    #[rstest]
    #[case(None, "site/index.maki.html")]
    #[case(Some("a.html"), "index.maki.html")]
    #[case(Some("posts/a.html"), "../index.maki.html")]
    #[case(Some("posts/2024/a.html"), "../../index.maki.html")]
    fn links_climb_back_to_the_root(#[case] page: Option<&str>, #[case] expected: &str) {
        let config = Config::default();
        let pages: HashMap<PathBuf, PageMeta> = HashMap::new();
        let ctx = Context {
            config: &config,
            site_root: Path::new("site"),
            generated_at: "",
            metadata: &pages,
            page: page.map(Path::new),
        };
        assert_eq!(ctx.index_href(), expected);
    }
}
