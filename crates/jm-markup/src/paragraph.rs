//! Paragraph assembly.
//!
//! Text left over after the block pass is a mix of prose and block
//! placeholders separated by blank lines. Each chunk that is not a placeholder
//! becomes one `<p>` element.

use std::sync::LazyLock;

use regex::Regex;

use crate::blocks::Fragments;
use crate::span;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("invalid paragraph break regex"));

/// Split `text` on blank lines and wrap every prose chunk in `<p>`.
///
/// Block placeholders are passed through for the finalizer to resolve.
pub(crate) fn assemble(blocks: &Fragments, text: &str) -> String {
    PARAGRAPH_BREAK
        .split(text.trim_matches('\n'))
        .filter_map(|chunk| {
            let trimmed = chunk.trim();
            if trimmed.is_empty() {
                None
            } else if blocks.resolve(trimmed).is_some() {
                Some(trimmed.to_owned())
            } else {
                Some(paragraph(trimmed))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn paragraph(chunk: &str) -> String {
    let html = span::render(chunk);
    let lines: Vec<String> = html.split('\n').map(preserve_leading_blanks).collect();
    format!("<p>{}</p>", lines.join("<br/>\n"))
}

/// Replace the leading whitespace of a line with as many `&nbsp;`.
fn preserve_leading_blanks(line: &str) -> String {
    let text = line.trim_start();
    let blanks = line[..line.len() - text.len()].chars().count();
    format!("{}{text}", "&nbsp;".repeat(blanks))
}
