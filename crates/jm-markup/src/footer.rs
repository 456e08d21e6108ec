//! Footer appended to posts imported from the old forum.

/// Markup pointing readers at the original thread on the old forum.
///
/// The result starts with a blank line so it can be appended directly to a
/// post body, and renders as a block quote containing a link.
///
/// # Example
///
/// ```
/// let footer = jm_markup::legacy_link_footer("https://forum.example.com", 42);
/// assert!(footer.ends_with(
///     "[available here|https://forum.example.com/thread.jspa?threadID=42]{quote}"
/// ));
/// ```
#[must_use]
pub fn legacy_link_footer(jive_url: &str, thread_id: u64) -> String {
    let jive_url = jive_url.trim_end_matches('/');
    format!(
        "\n\n{{quote}}This thread was imported from the previous forum.\n\
         For your reference, the original is \
         [available here|{jive_url}/thread.jspa?threadID={thread_id}]{{quote}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;

    #[test]
    fn test_footer_markup() {
        assert_eq!(
            legacy_link_footer("http://old.example.com", 7),
            "\n\n{quote}This thread was imported from the previous forum.\n\
             For your reference, the original is \
             [available here|http://old.example.com/thread.jspa?threadID=7]{quote}"
        );
    }

    #[test]
    fn test_footer_trailing_slash() {
        assert!(
            legacy_link_footer("http://old.example.com/", 7)
                .contains("|http://old.example.com/thread.jspa?threadID=7]")
        );
    }

    #[test]
    fn test_footer_renders_as_quote() {
        let markup = format!("Question body{}", legacy_link_footer("https://old.example.com", 42));
        assert_eq!(
            convert(&markup).unwrap(),
            "<p>Question body</p>\n\
             <blockquote><p>This thread was imported from the previous forum.<br/>\n\
             For your reference, the original is \
             <a href=\"https://old.example.com/thread.jspa?threadID=42\">available here</a>\
             </p></blockquote>"
        );
    }
}
