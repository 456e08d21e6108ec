//! Shared string helpers for the conversion passes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("invalid blank run regex"));

/// Escape the HTML metacharacters `&`, `<` and `>`.
///
/// Quotes are left alone: the result is used as element text, and attribute
/// values go through [`escape_attr`] on top of this.
///
/// # Examples
///
/// ```
/// use jm_markup::escape_html;
///
/// assert_eq!(escape_html("a < b && c"), "a &lt; b &amp;&amp; c");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Make already-escaped text safe inside a double-quoted attribute.
#[must_use]
pub(crate) fn escape_attr(s: &str) -> String {
    s.replace('"', "&quot;")
}

/// Collapse runs of blank lines to a single newline and trim outer newlines.
pub(crate) fn regularize_eols(text: &str) -> String {
    BLANK_RUN
        .replace_all(text, "\n")
        .trim_matches('\n')
        .to_owned()
}

/// `Regex::replace_all` with a fallible replacement closure.
///
/// Stops at the first error so that a limit hit deep inside a recursive
/// rewriter aborts the whole conversion.
pub(crate) fn try_replace_all<E>(
    re: &Regex,
    text: &str,
    mut replace: impl FnMut(&Captures<'_>) -> Result<String, E>,
) -> Result<String, E> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always participates");
        output.push_str(&text[last..whole.start()]);
        output.push_str(&replace(&caps)?);
        last = whole.end();
    }
    output.push_str(&text[last..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_metacharacters() {
        assert_eq!(escape_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn test_escape_html_keeps_quotes() {
        assert_eq!(escape_html(r#"say "hi" it's"#), r#"say "hi" it's"#);
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a"b"#), "a&quot;b");
    }

    #[test]
    fn test_regularize_eols() {
        assert_eq!(
            regularize_eols("\n\n<p>a</p>\n\n\n<p>b</p>\n"),
            "<p>a</p>\n<p>b</p>"
        );
    }

    #[test]
    fn test_try_replace_all_ok() {
        let re = Regex::new(r"\d").unwrap();
        let out: Result<String, ()> =
            try_replace_all(&re, "a1b2", |caps| Ok(format!("[{}]", &caps[0])));
        assert_eq!(out.unwrap(), "a[1]b[2]");
    }

    #[test]
    fn test_try_replace_all_stops_on_error() {
        let re = Regex::new(r"\d").unwrap();
        let out = try_replace_all(&re, "a1b2", |caps| {
            if &caps[0] == "2" {
                Err("two")
            } else {
                Ok(String::new())
            }
        });
        assert_eq!(out, Err("two"));
    }
}
