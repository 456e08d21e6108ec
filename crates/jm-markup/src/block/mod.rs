//! Block-level rewriters.
//!
//! Each rewriter turns one construct into HTML, stores it in the block arena
//! and leaves a placeholder on a paragraph of its own. The order of the passes
//! matters: a later pass only ever sees placeholders where an earlier pass
//! produced HTML.

mod list;
mod quote;

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::converter::ConversionState;
use crate::error::ConvertError;
use crate::span;

/// `h1. Title` through `h6. Title`.
static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^h([1-6])\.[ \t]*(.+?)\n+").expect("invalid header regex"));

static HORIZONTAL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^-{5,}\n").expect("invalid rule regex"));

/// `{code}...{code}` or `{code:lang}...{code}`.
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{code(?::\w+)?\}(.*?)\{code\}").expect("invalid code block regex")
});

/// Run every block rewriter over `text` in order.
pub(crate) fn rewrite(state: &mut ConversionState<'_>, text: &str) -> Result<String, ConvertError> {
    let text = headers(state, text);
    let text = horizontal_rules(state, &text);
    let text = list::rewrite(state, &text)?;
    let text = code_blocks(state, &text);
    quote::rewrite(state, &text)
}

fn headers(state: &mut ConversionState<'_>, text: &str) -> String {
    HEADER
        .replace_all(text, |caps: &Captures<'_>| {
            let level = &caps[1];
            let html = format!("<h{level}>{}</h{level}>", span::render(&caps[2]));
            state.hashed(&html)
        })
        .into_owned()
}

fn horizontal_rules(state: &mut ConversionState<'_>, text: &str) -> String {
    HORIZONTAL_RULE
        .replace_all(text, |_: &Captures<'_>| state.hashed("<hr/>"))
        .into_owned()
}

/// Code bodies are emitted verbatim: no span rendering.
fn code_blocks(state: &mut ConversionState<'_>, text: &str) -> String {
    CODE_BLOCK
        .replace_all(text, |caps: &Captures<'_>| {
            let body = caps[1].trim_matches('\n');
            state.hashed(&format!("<pre><code>{body}</code></pre>"))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvertOptions;

    fn rewrite_resolved(text: &str) -> String {
        let options = ConvertOptions::default();
        let mut state = ConversionState::new(&options);
        let text = rewrite(&mut state, text).unwrap();
        state.blocks.resolve_all(&text)
    }

    #[test]
    fn test_header_levels() {
        for level in 1..=6 {
            let html = rewrite_resolved(&format!("h{level}. Title\n"));
            assert_eq!(html, format!("\n\n<h{level}>Title</h{level}>\n\n"));
        }
    }

    #[test]
    fn test_header_needs_known_level() {
        assert_eq!(rewrite_resolved("h7. Title\n"), "h7. Title\n");
    }

    #[test]
    fn test_header_text_is_span_rendered() {
        assert_eq!(
            rewrite_resolved("h2. *Bold* title\n"),
            "\n\n<h2><strong>Bold</strong> title</h2>\n\n"
        );
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(rewrite_resolved("-----\n"), "\n\n<hr/>\n\n");
        assert_eq!(rewrite_resolved("----\n"), "----\n");
    }

    #[test]
    fn test_code_block_is_literal() {
        assert_eq!(
            rewrite_resolved("{code}*not bold* [x|y]{code}"),
            "\n\n<pre><code>*not bold* [x|y]</code></pre>\n\n"
        );
    }

    #[test]
    fn test_code_block_language_tag_is_dropped() {
        assert_eq!(
            rewrite_resolved("{code:python}\nprint(1)\n{code}"),
            "\n\n<pre><code>print(1)</code></pre>\n\n"
        );
    }

    #[test]
    fn test_unclosed_code_block_is_text() {
        assert_eq!(rewrite_resolved("{code}open"), "{code}open");
    }
}
