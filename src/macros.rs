//! Helper macros used across the crate.

/// Lazily compile a [`Regex`](regex::Regex) with a custom panic message.
///
/// The expansion names `LazyLock` and `Regex` by their full paths, so call
/// sites only need the static's type in scope.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
/// static RE: LazyLock<Regex> = maki::lazy_regex!(r"^\.\. \w+::", "directive");
/// assert!(RE.is_match(".. note:: Title,Body"));
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        ::std::sync::LazyLock::new(|| ::regex::Regex::new($pattern).expect($msg))
    };
}
