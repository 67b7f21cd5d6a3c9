//! Keyword highlighting for code blocks.
//!
//! Only Java is recognised. Keywords are wrapped in a single pass so the
//! inserted markup is never matched again.

use std::sync::LazyLock;

use regex::Regex;

static KEYWORD_RE: LazyLock<Regex> = lazy_regex!(
    r"@param\b|@return\b|@author\b|@version\b|\b(?:public|private|protected|void|return|final|this|super|if|else|for|while|switch|try|catch|new|finally|null|static|class|true|false|instanceof|int|double|float|short|long|break|continue|throws|throw|boolean|package|import)\b",
    "keyword pattern"
);

/// Wrap every Java keyword and javadoc tag in `line`.
///
/// # Examples
///
/// ```
/// use maki::highlight::highlight_keywords;
///
/// assert_eq!(
///     highlight_keywords("return x;"),
///     "<span class=\"keyword\">return</span> x;"
/// );
/// ```
#[must_use]
pub fn highlight_keywords(line: &str) -> String {
    KEYWORD_RE
        .replace_all(line, "<span class=\"keyword\">$0</span>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("int x = 0;", "<span class=\"keyword\">int</span> x = 0;")]
    #[case(
        " * @param name",
        " * <span class=\"keyword\">@param</span> name"
    )]
    #[case("interface Foo", "interface Foo")]
    #[case("printf(x)", "printf(x)")]
    fn highlights_whole_words(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(highlight_keywords(line), expected);
    }

    #[test]
    fn adjacent_keywords() {
        assert_eq!(
            highlight_keywords("public static void"),
            "<span class=\"keyword\">public</span> <span class=\"keyword\">static</span> <span class=\"keyword\">void</span>"
        );
    }

    #[test]
    fn inserted_class_attribute_is_not_rehighlighted() {
        let once = highlight_keywords("class A");
        assert_eq!(once.matches("keyword").count(), 1);
    }
}
