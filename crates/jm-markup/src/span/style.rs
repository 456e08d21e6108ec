//! Inline text styles and hard line breaks.

use std::sync::LazyLock;

use regex::Regex;

/// Delimiter pairs and the HTML each one produces, in application order.
///
/// The enclosed text must start and end with a non-whitespace character and
/// stay on one line.
static STYLES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\*(\S(?:.*?\S)??)\*", "<strong>${1}</strong>"),
        (r"\+(\S(?:.*?\S)??)\+", "<em>${1}</em>"),
        (r"_(\S(?:.*?\S)??)_", r#"<span class="underline">${1}</span>"#),
        (r"\^(\S(?:.*?\S)??)\^", "<sup>${1}</sup>"),
        (r"~(\S(?:.*?\S)??)~", "<sub>${1}</sub>"),
        (r"--(\S(?:.*?\S)??)--", "<strike>${1}</strike>"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("invalid style regex"),
            replacement,
        )
    })
    .collect()
});

/// Two or more spaces before a newline.
static HARD_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}\n").expect("invalid hard break regex"));

/// Apply every inline style to `text`.
pub(crate) fn apply(text: &str) -> String {
    let mut text = text.to_owned();
    for (re, replacement) in STYLES.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    text
}

/// Turn trailing double spaces into a paragraph-internal blank line.
pub(crate) fn hard_breaks(text: &str) -> String {
    HARD_BREAK.replace_all(text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold() {
        assert_eq!(apply("*some text*"), "<strong>some text</strong>");
    }

    #[test]
    fn test_italics() {
        assert_eq!(apply("+some text+"), "<em>some text</em>");
    }

    #[test]
    fn test_underline() {
        assert_eq!(
            apply("_some text_"),
            r#"<span class="underline">some text</span>"#
        );
    }

    #[test]
    fn test_superscript() {
        assert_eq!(apply("e = mc^2^"), "e = mc<sup>2</sup>");
    }

    #[test]
    fn test_subscript() {
        assert_eq!(apply("e~1~"), "e<sub>1</sub>");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(apply("--A--"), "<strike>A</strike>");
    }

    #[test]
    fn test_single_character_span() {
        assert_eq!(apply("*a*"), "<strong>a</strong>");
    }

    #[test]
    fn test_delimiters_next_to_whitespace_are_literal() {
        assert_eq!(apply("a * b * c"), "a * b * c");
        assert_eq!(apply("x -- y -- z"), "x -- y -- z");
    }

    #[test]
    fn test_styles_do_not_span_lines() {
        assert_eq!(apply("*one\ntwo*"), "*one\ntwo*");
    }

    #[test]
    fn test_nested_styles() {
        assert_eq!(apply("*+both+*"), "<strong><em>both</em></strong>");
    }

    #[test]
    fn test_shortest_span_wins() {
        assert_eq!(
            apply("*a* and *b*"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_hard_breaks() {
        assert_eq!(hard_breaks("one  \ntwo\nthree"), "one\n\ntwo\nthree");
        assert_eq!(hard_breaks("one \ntwo"), "one \ntwo");
    }
}
