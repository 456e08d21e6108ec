//! Block quotes.
//!
//! Three forms are recognized, in this order:
//!
//! ```text
//! bq. single line
//!
//! {quote}body{quote}        [quote=author]body{quote}
//!
//! &gt; {quote:title=author wrote:}{quote}
//! &gt; body
//! &gt;
//! &gt; more body
//! ```
//!
//! Multi-line bodies go through the whole block pass again, so quotes may
//! contain headers, lists, code and further quotes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::converter::ConversionState;
use crate::error::ConvertError;
use crate::span;
use crate::util::try_replace_all;

static SINGLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^bq\. (.*)\n").expect("invalid bq regex"));

static BRACED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^\{quote\}(.*?)\{quote\}").expect("invalid quote regex")
});

static AUTHORED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^\[quote=([^\]]+)\](.*?)\{quote\}").expect("invalid authored quote regex")
});

/// Title line followed by one or more `&gt;`-prefixed lines.
static REPLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^&gt; \{quote:title=(.+?):\}\{quote\}\n((?:&gt;(?: .*)?\n)+)")
        .expect("invalid reply quote regex")
});

static REPLY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^&gt; ?").expect("invalid reply prefix regex"));

/// Replace every block quote in `text` with a block placeholder.
pub(super) fn rewrite(state: &mut ConversionState<'_>, text: &str) -> Result<String, ConvertError> {
    let text = SINGLE_LINE.replace_all(text, |caps: &Captures<'_>| {
        let html = format!("<blockquote><p>{}</p></blockquote>", span::render(&caps[1]));
        state.hashed(&html)
    });
    let text = try_replace_all(&BRACED, &text, |caps| quote(state, None, &caps[1]))?;
    let text = try_replace_all(&AUTHORED, &text, |caps| {
        let header = format!("{} wrote", &caps[1]);
        quote(state, Some(&header), &caps[2])
    })?;
    try_replace_all(&REPLY, &text, |caps| {
        let body = REPLY_PREFIX.replace_all(&caps[2], "");
        quote(state, Some(&caps[1]), &body)
    })
}

fn quote(
    state: &mut ConversionState<'_>,
    header: Option<&str>,
    body: &str,
) -> Result<String, ConvertError> {
    let mut html = String::from("<blockquote>");
    if let Some(header) = header {
        html.push_str(&format!(
            "<span class=\"quote-header\">{header}:</span><br/>\n\n"
        ));
    }

    state.enter_quote()?;
    let body = state.render_blocks(&format!("{body}\n"));
    state.leave_quote();

    html.push_str(&body?);
    html.push_str("</blockquote>");
    Ok(state.hashed(&html))
}
