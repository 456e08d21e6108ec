//! Input normalization ahead of the block pass.
//!
//! Produces text the block rewriters can match with simple line-oriented
//! patterns: escaped metacharacters, `\n` line endings, no tabs, no
//! whitespace-only lines and a trailing blank line.

use std::sync::LazyLock;

use regex::Regex;

use crate::blocks::RESERVED;
use crate::util::escape_html;

/// Trailing "Edited by: ..." annotation left by the old forum.
static EDITED_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\s*Edited by:[^\n]*(?:\n|$)").expect("invalid edited-by regex")
});

static LINE_ENDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r").expect("invalid line ending regex"));

static WHITESPACE_ONLY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]+$").expect("invalid blank line regex"));

/// Normalize raw markup for the block pass.
pub(crate) fn normalize(text: &str, tab_width: usize) -> String {
    let text: String = text.chars().filter(|c| !RESERVED.contains(c)).collect();
    let text = escape_html(&text);
    let text = EDITED_BY.replace_all(&text, "\n");
    let text = LINE_ENDING.replace_all(&text, "\n");
    let text = detab(&text, tab_width);
    let mut text = WHITESPACE_ONLY_LINE.replace_all(&text, "").into_owned();
    text.push_str("\n\n");
    text
}

/// Expand tabs to spaces, advancing each tab to the next multiple of
/// `tab_width` counted from the start of its line.
pub(crate) fn detab(text: &str, tab_width: usize) -> String {
    if !text.contains('\t') {
        return text.to_owned();
    }

    let mut output = String::with_capacity(text.len() + tab_width * 4);
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = tab_width - column % tab_width;
                output.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
            }
            '\n' => {
                output.push(c);
                column = 0;
            }
            _ => {
                output.push(c);
                column += 1;
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detab_leading_tab() {
        assert_eq!(detab("\tfoo", 4), "    foo");
    }

    #[test]
    fn test_detab_tab_after_spaces() {
        assert_eq!(detab("  \tfoo", 4), "    foo");
    }

    #[test]
    fn test_detab_tab_then_spaces() {
        assert_eq!(detab("\t  foo", 4), "      foo");
    }

    #[test]
    fn test_detab_without_tabs() {
        assert_eq!(detab("  foo", 4), "  foo");
    }

    #[test]
    fn test_detab_column_resets_per_line() {
        assert_eq!(detab("  foo\n\tbar\tblam", 4), "  foo\n    bar blam");
    }

    #[test]
    fn test_normalize_escapes_metacharacters() {
        assert_eq!(normalize("a < b & c > d", 4), "a &lt; b &amp; c &gt; d\n\n");
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize("a\r\nb\rc", 4), "a\nb\nc\n\n");
    }

    #[test]
    fn test_normalize_blanks_whitespace_only_lines() {
        assert_eq!(normalize("a\n   \t\nb", 4), "a\n\nb\n\n");
    }

    #[test]
    fn test_normalize_drops_edited_by_line() {
        assert_eq!(
            normalize("text\n\nEdited by: admin on 2010/01/01\nmore", 4),
            "text\nmore\n\n"
        );
    }

    #[test]
    fn test_normalize_strips_reserved_code_points() {
        assert_eq!(normalize("a\u{E000}0\u{E001}b\u{E002}", 4), "a0b\n\n");
    }
}
