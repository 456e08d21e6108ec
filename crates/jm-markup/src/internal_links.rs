//! Rewriting of links that point into the old Jive forum.
//!
//! Imported posts reference each other with URLs such as
//! `/message.jspa?messageID=8477` or `/thread.jspa?threadID=1888&amp;tstart=210`.
//! Once the posts have new homes, those links are swapped for the new URLs
//! before the markup is converted.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `/message.jspa?messageID=1`, `/thread.jspa?threadID=2&amp;tstart=-30`, ...
///
/// The page name is ignored; the kind comes from the id parameter.
static INTERNAL_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"/?(?:message|thread)\.jspa\?(message|thread)ID=(\d+)(?:(?:&amp;)?#\d+|&amp;tstart=-?\d+)?",
    )
    .expect("invalid internal link regex")
});

/// What an internal link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// A single post (`messageID=`).
    Message,
    /// A whole thread (`threadID=`).
    Thread,
}

impl LinkKind {
    /// Parameter prefix used by the forum, `"message"` or `"thread"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Thread => "thread",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link into the old forum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternalLink {
    pub kind: LinkKind,
    pub id: u64,
}

/// Maps old forum links to their new URLs.
pub trait LinkResolver {
    /// New URL for `link`, or `None` when the target was not imported.
    fn resolve(&self, link: &InternalLink) -> Option<String>;
}

impl<F> LinkResolver for F
where
    F: Fn(&InternalLink) -> Option<String>,
{
    fn resolve(&self, link: &InternalLink) -> Option<String> {
        self(link)
    }
}

impl<S: BuildHasher> LinkResolver for HashMap<InternalLink, String, S> {
    fn resolve(&self, link: &InternalLink) -> Option<String> {
        self.get(link).cloned()
    }
}

/// Find every internal link in `text` with its byte range.
///
/// Links whose id does not fit in a `u64` are skipped.
///
/// # Example
///
/// ```
/// use jm_markup::{find_internal_links, InternalLink, LinkKind};
///
/// let links = find_internal_links("see /thread.jspa?threadID=1888&amp;tstart=210");
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].0, 4..45);
/// assert_eq!(links[0].1, InternalLink { kind: LinkKind::Thread, id: 1888 });
/// ```
#[must_use]
pub fn find_internal_links(text: &str) -> Vec<(Range<usize>, InternalLink)> {
    INTERNAL_LINK
        .captures_iter(text)
        .filter_map(|caps| {
            let kind = match &caps[1] {
                "message" => LinkKind::Message,
                _ => LinkKind::Thread,
            };
            let id = caps[2].parse().ok()?;
            let range = caps.get(0)?.range();
            Some((range, InternalLink { kind, id }))
        })
        .collect()
}

/// Replace internal links in `text` with URLs from `resolver`.
///
/// Every occurrence of `base_url` is removed first, turning absolute links to
/// the old forum into site-relative ones. A link standing on its own is
/// wrapped in brackets so the converter renders it as an anchor; a link that
/// is already the target of `[...]` or `[...|...]` markup is replaced as is.
/// Links the resolver does not know are removed.
#[must_use]
pub fn rewrite_internal_links(
    text: &str,
    base_url: Option<&str>,
    resolver: &impl LinkResolver,
) -> String {
    let text = match base_url {
        Some(base) if !base.is_empty() => Cow::Owned(text.replace(base, "")),
        _ => Cow::Borrowed(text),
    };

    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for (range, link) in find_internal_links(&text) {
        output.push_str(&text[last..range.start]);
        match resolver.resolve(&link) {
            Some(url) if is_naked(&text, range.start) => {
                output.push('[');
                output.push_str(&url);
                output.push(']');
            }
            Some(url) => output.push_str(&url),
            None => tracing::debug!(kind = %link.kind, id = link.id, "Dropping unresolved link"),
        }
        last = range.end;
    }
    output.push_str(&text[last..]);
    output
}

/// Whether the link starting at `start` is outside of link markup.
fn is_naked(text: &str, start: usize) -> bool {
    !matches!(text.as_bytes().get(start.wrapping_sub(1)), Some(b'[' | b'|'))
}
