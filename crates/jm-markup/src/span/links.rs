//! Anchors and images.
//!
//! Every anchor or image produced here is moved into the span stash so the
//! styling pass cannot rewrite characters inside `href`/`src` attributes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::blocks::Fragments;
use crate::util::escape_attr;

use super::style;

/// Protocol-qualified URL as it appears in escaped markup.
const URL_PATTERN: &str = concat!(
    r"(?:https?|ftp)://",
    r"(?:[a-zA-Z0-9.\-]+(?::[a-zA-Z0-9.&%$\-]+)*@)*",
    r"(?:localhost|\d{1,3}(?:\.\d{1,3}){3}|(?:[a-zA-Z0-9\-]+\.)*[a-zA-Z0-9\-]+\.[a-zA-Z]{2,})",
    r"(?::[0-9]+)*",
    r"(?:/[a-zA-Z0-9.,?'\\+&%$#=~_;\-]*)*",
);

/// `[url]http://...[/url]`
static URL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[url\]({URL_PATTERN})\[/url\]")).expect("invalid url tag regex")
});

/// `[text|href|title]`, `[text|href]`, `[href]`
static BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("invalid bracket link regex"));

/// `!src!`, never spanning a rendered link placeholder.
static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!([^\s!\x{E002}\x{E003}]+)!").expect("invalid image regex")
});

static AUTOLINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("invalid autolink regex"));

/// Targets a single-argument bracket link may point at.
static LINK_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:https?|ftp)://|\.{0,2}/|[#?])\S*$").expect("invalid link target regex")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[-.\w]+@[-\w]+(?:\.[-\w]+)*\.[a-z]+$").expect("invalid email regex")
});

/// Rewrite every link form in `text`, leaving placeholders from `stash`.
pub(super) fn render(text: &str, stash: &mut Fragments) -> String {
    let text = URL_TAG.replace_all(text, "$1");
    let text = BRACKET.replace_all(&text, |caps: &Captures<'_>| bracket_link(caps, stash));
    let text = IMAGE.replace_all(&text, |caps: &Captures<'_>| {
        stash.hash(&format!(r#"<img src="{}"/>"#, escape_attr(&caps[1])))
    });
    AUTOLINK
        .replace_all(&text, |caps: &Captures<'_>| {
            let url = &caps[0];
            stash.hash(&format!(r#"<a href="{}">{url}</a>"#, escape_attr(url)))
        })
        .into_owned()
}

fn bracket_link(caps: &Captures<'_>, stash: &mut Fragments) -> String {
    let bits: Vec<&str> = caps[1].split('|').collect();
    let html = match bits.as_slice() {
        [email] if is_email(email) => {
            format!(r#"<a href="mailto:{}">{email}</a>"#, escape_attr(email))
        }
        [target] if is_link_target(target) => {
            format!(r#"<a href="{}">{target}</a>"#, escape_attr(target))
        }
        [text, href] => format!(
            r#"<a href="{}">{}</a>"#,
            escape_attr(href),
            style::apply(text)
        ),
        [text, href, title] => format!(
            r#"<a href="{}" title="{}">{}</a>"#,
            escape_attr(href),
            escape_attr(title),
            style::apply(text)
        ),
        _ => return caps[0].to_owned(),
    };
    stash.hash(&html)
}

/// Whether a bare bracketed token should become an anchor.
///
/// Protocol URLs and site paths (`/x`, `./x`, `../x`, `#x`, `?x`) qualify.
/// An unmatched `[/url]` closer is not a path.
fn is_link_target(s: &str) -> bool {
    s != "/url" && LINK_TARGET.is_match(s)
}

fn is_email(s: &str) -> bool {
    s.contains('@') && EMAIL.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_resolved(text: &str) -> String {
        let mut stash = Fragments::spans();
        let text = render(text, &mut stash);
        stash.resolve_all(&text)
    }

    #[test]
    fn test_url_tag_becomes_autolink() {
        assert_eq!(
            render_resolved("[url]http://example.com/2[/url] blah"),
            r#"<a href="http://example.com/2">http://example.com/2</a> blah"#
        );
    }

    #[test]
    fn test_link_with_title() {
        assert_eq!(
            render_resolved("[link text|http://example.com/3|tooltip text]"),
            r#"<a href="http://example.com/3" title="tooltip text">link text</a>"#
        );
    }

    #[test]
    fn test_link_with_text() {
        assert_eq!(
            render_resolved("[Example site|http://www.example.com]"),
            r#"<a href="http://www.example.com">Example site</a>"#
        );
    }

    #[test]
    fn test_link_text_is_styled() {
        assert_eq!(
            render_resolved("[*bold* link|http://example.com]"),
            r#"<a href="http://example.com"><strong>bold</strong> link</a>"#
        );
    }

    #[test]
    fn test_bare_url_in_brackets() {
        assert_eq!(
            render_resolved("[http://www.example.com]"),
            r#"<a href="http://www.example.com">http://www.example.com</a>"#
        );
    }

    #[test]
    fn test_site_path_in_brackets() {
        assert_eq!(
            render_resolved("[/some/file/]"),
            r#"<a href="/some/file/">/some/file/</a>"#
        );
    }

    #[test]
    fn test_email_in_brackets() {
        assert_eq!(
            render_resolved("[email@example.com]"),
            r#"<a href="mailto:email@example.com">email@example.com</a>"#
        );
    }

    #[test]
    fn test_plain_words_in_brackets_are_kept() {
        assert_eq!(render_resolved("see [note] here"), "see [note] here");
        assert_eq!(render_resolved("[]"), "[]");
    }

    #[test]
    fn test_too_many_parts_are_kept() {
        assert_eq!(render_resolved("[a|b|c|d]"), "[a|b|c|d]");
    }

    #[test]
    fn test_image() {
        assert_eq!(
            render_resolved("!http://example.com/img.png!"),
            r#"<img src="http://example.com/img.png"/>"#
        );
    }

    #[test]
    fn test_exclamations_in_prose_are_not_images() {
        assert_eq!(render_resolved("Wow! That works!"), "Wow! That works!");
    }

    #[test]
    fn test_image_does_not_wrap_rendered_link() {
        assert_eq!(
            render_resolved("![http://a.com]!"),
            r#"!<a href="http://a.com">http://a.com</a>!"#
        );
    }

    #[test]
    fn test_url_tag_around_text_is_kept() {
        assert_eq!(
            render_resolved("text [url]not a url[/url]"),
            "text [url]not a url[/url]"
        );
    }

    #[test]
    fn test_autolink() {
        assert_eq!(
            render_resolved("go to https://example.org/a?b=1&amp;c=2 now"),
            r#"go to <a href="https://example.org/a?b=1&amp;c=2">https://example.org/a?b=1&amp;c=2</a> now"#
        );
    }

    #[test]
    fn test_link_href_is_not_autolinked_again() {
        assert_eq!(
            render_resolved("[site|http://example.com]"),
            r#"<a href="http://example.com">site</a>"#
        );
    }

    #[test]
    fn test_href_quotes_are_escaped() {
        assert_eq!(
            render_resolved(r#"[x|/a"b]"#),
            r#"<a href="/a&quot;b">x</a>"#
        );
    }
}
