//! Ordered and unordered lists.
//!
//! A list line starts with one or more `*`/`#` markers followed by
//! whitespace. Consecutive list lines sharing their first marker form one
//! list; `*` gives `<ul>` and `#` gives `<ol>`. Lines with a single marker
//! are items. A run of lines with two or more markers is a nested list: one
//! marker is removed from each line and the run is rendered recursively
//! inside its own `<li>`.

use crate::converter::ConversionState;
use crate::error::ConvertError;
use crate::span;

/// Replace every top-level list in `text` with a block placeholder.
pub(super) fn rewrite(state: &mut ConversionState<'_>, text: &str) -> Result<String, ConvertError> {
    let mut output = String::with_capacity(text.len());
    let mut run: Vec<&str> = Vec::new();

    for line in text.split_inclusive('\n') {
        match line.strip_suffix('\n').filter(|body| is_list_line(body)) {
            Some(body) if run.first().is_none_or(|first| same_marker(first, body)) => {
                run.push(body);
            }
            Some(body) => {
                flush(state, &mut run, &mut output)?;
                run.push(body);
            }
            None => {
                flush(state, &mut run, &mut output)?;
                output.push_str(line);
            }
        }
    }
    flush(state, &mut run, &mut output)?;
    Ok(output)
}

fn flush(
    state: &mut ConversionState<'_>,
    run: &mut Vec<&str>,
    output: &mut String,
) -> Result<(), ConvertError> {
    if run.is_empty() {
        return Ok(());
    }
    let html = render_list(state, run)?;
    output.push_str(&state.hashed(&html));
    run.clear();
    Ok(())
}

/// Render one run of lines sharing their first marker.
fn render_list(state: &mut ConversionState<'_>, lines: &[&str]) -> Result<String, ConvertError> {
    state.enter_list()?;
    let items = render_items(state, lines);
    state.leave_list();

    let tag = if lines[0].starts_with('*') { "ul" } else { "ol" };
    Ok(format!("<{tag}>\n{}</{tag}>", items?))
}

fn render_items(state: &mut ConversionState<'_>, lines: &[&str]) -> Result<String, ConvertError> {
    let mut items = String::new();
    let mut nested: Vec<&str> = Vec::new();

    for line in lines {
        if marker_count(line) == 1 {
            render_nested(state, &mut nested, &mut items)?;
            let content = line[1..].trim_start();
            items.push_str(&format!("<li>{}</li>\n", span::render(content)));
        } else {
            nested.push(&line[1..]);
        }
    }
    render_nested(state, &mut nested, &mut items)?;
    Ok(items)
}

/// Render a run of deeper lines, already stripped of one marker, as one item.
fn render_nested(
    state: &mut ConversionState<'_>,
    nested: &mut Vec<&str>,
    items: &mut String,
) -> Result<(), ConvertError> {
    if nested.is_empty() {
        return Ok(());
    }

    let mut lists = Vec::new();
    for run in nested.chunk_by(|a, b| same_marker(a, b)) {
        lists.push(render_list(state, run)?);
    }
    items.push_str(&format!("<li>\n{}\n</li>\n", lists.join("\n")));
    nested.clear();
    Ok(())
}

fn marker_count(line: &str) -> usize {
    line.bytes().take_while(|b| matches!(b, b'*' | b'#')).count()
}

fn is_list_line(line: &str) -> bool {
    let markers = marker_count(line);
    markers > 0 && line[markers..].starts_with([' ', '\t'])
}

fn same_marker(a: &str, b: &str) -> bool {
    a.as_bytes().first() == b.as_bytes().first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvertOptions;

    fn rewrite_with(options: &ConvertOptions, text: &str) -> Result<String, ConvertError> {
        let mut state = ConversionState::new(options);
        let text = rewrite(&mut state, text)?;
        Ok(state.blocks.resolve_all(&text))
    }

    fn rewrite_resolved(text: &str) -> String {
        rewrite_with(&ConvertOptions::default(), text).unwrap()
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            rewrite_resolved("* one\n* two\n"),
            "\n\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n\n"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            rewrite_resolved("# one\n# two\n"),
            "\n\n<ol>\n<li>one</li>\n<li>two</li>\n</ol>\n\n"
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            rewrite_resolved("* one\n** two\n* three\n"),
            "\n\n<ul>\n<li>one</li>\n<li>\n<ul>\n<li>two</li>\n</ul>\n</li>\n<li>three</li>\n</ul>\n\n"
        );
    }

    #[test]
    fn test_nested_ordered_inside_unordered() {
        assert_eq!(
            rewrite_resolved("* one\n*# a\n*# b\n"),
            "\n\n<ul>\n<li>one</li>\n<li>\n<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n</li>\n</ul>\n\n"
        );
    }

    #[test]
    fn test_list_items_are_span_rendered() {
        assert_eq!(
            rewrite_resolved("* *bold* item\n"),
            "\n\n<ul>\n<li><strong>bold</strong> item</li>\n</ul>\n\n"
        );
    }

    #[test]
    fn test_changing_marker_starts_new_list() {
        assert_eq!(
            rewrite_resolved("* a\n# b\n"),
            "\n\n<ul>\n<li>a</li>\n</ul>\n\n\n\n<ol>\n<li>b</li>\n</ol>\n\n"
        );
    }

    #[test]
    fn test_marker_without_space_is_not_a_list() {
        assert_eq!(rewrite_resolved("*bold*\n"), "*bold*\n");
        assert_eq!(rewrite_resolved("#hashtag\n"), "#hashtag\n");
    }

    #[test]
    fn test_line_without_newline_is_not_a_list() {
        assert_eq!(rewrite_resolved("* tail"), "* tail");
    }

    #[test]
    fn test_surrounding_text_is_kept() {
        assert_eq!(
            rewrite_resolved("intro\n* a\noutro\n"),
            "intro\n\n\n<ul>\n<li>a</li>\n</ul>\n\noutro\n"
        );
    }

    #[test]
    fn test_nesting_limit() {
        let options = ConvertOptions::default().with_max_nesting_depth(2);
        assert!(rewrite_with(&options, "* a\n** b\n").is_ok());
        assert_eq!(
            rewrite_with(&options, "* a\n** b\n*** c\n"),
            Err(ConvertError::NestingTooDeep { limit: 2 })
        );
    }
}
