//! Placeholder arena for rendered HTML fragments.
//!
//! Finished HTML is moved out of the working text and replaced with an opaque
//! placeholder so that later passes neither re-match nor re-escape it. A
//! placeholder is an index into the arena wrapped in a pair of private-use
//! code points. The normalizer deletes those code points from user input, so a
//! placeholder can never be forged by the document being converted.

/// Delimiters for block-level placeholders.
pub(crate) const BLOCK_OPEN: char = '\u{E000}';
pub(crate) const BLOCK_CLOSE: char = '\u{E001}';

/// Delimiters for span-level placeholders.
pub(crate) const SPAN_OPEN: char = '\u{E002}';
pub(crate) const SPAN_CLOSE: char = '\u{E003}';

/// Every code point reserved for placeholders.
pub(crate) const RESERVED: [char; 4] = [BLOCK_OPEN, BLOCK_CLOSE, SPAN_OPEN, SPAN_CLOSE];

/// Per-conversion store of rendered fragments addressed by placeholder.
///
/// Fragments are appended in insertion order and never deduplicated: two
/// identical fragments get two distinct placeholders.
///
/// Stored fragments never contain placeholders of the same arena, so
/// [`resolve_all`](Self::resolve_all) needs a single pass.
#[derive(Debug)]
pub(crate) struct Fragments {
    open: char,
    close: char,
    items: Vec<String>,
}

impl Fragments {
    /// Arena for block-level HTML (headers, lists, code, quotes, rules).
    pub(crate) fn blocks() -> Self {
        Self::with_delimiters(BLOCK_OPEN, BLOCK_CLOSE)
    }

    /// Arena for inline HTML (anchors, images) inside one span pass.
    pub(crate) fn spans() -> Self {
        Self::with_delimiters(SPAN_OPEN, SPAN_CLOSE)
    }

    fn with_delimiters(open: char, close: char) -> Self {
        Self {
            open,
            close,
            items: Vec::new(),
        }
    }

    /// Store a fragment and return its placeholder.
    ///
    /// Placeholders embedded in `html` are resolved first, so a stored
    /// fragment is always final HTML.
    pub(crate) fn hash(&mut self, html: &str) -> String {
        let html = self.resolve_all(html);
        let index = self.items.len();
        self.items.push(html);
        format!("{}{index}{}", self.open, self.close)
    }

    /// Look up the fragment for a text that is exactly one placeholder.
    pub(crate) fn resolve(&self, token: &str) -> Option<&str> {
        let index = token
            .strip_prefix(self.open)?
            .strip_suffix(self.close)?
            .parse::<usize>()
            .ok()?;
        self.items.get(index).map(String::as_str)
    }

    /// Replace every placeholder in `text` with its fragment.
    ///
    /// Placeholders with an unknown index and stray opening delimiters are
    /// removed.
    pub(crate) fn resolve_all(&self, text: &str) -> String {
        if !text.contains(self.open) {
            return text.to_owned();
        }

        let mut output = String::with_capacity(text.len() + self.total_len());
        let mut rest = text;
        while let Some(start) = rest.find(self.open) {
            output.push_str(&rest[..start]);
            let after = &rest[start + self.open.len_utf8()..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            let closed = after[digits..].starts_with(self.close);
            let fragment = after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.items.get(index));

            if closed {
                if let Some(fragment) = fragment {
                    output.push_str(fragment);
                }
                rest = &after[digits + self.close.len_utf8()..];
            } else {
                rest = after;
            }
        }
        output.push_str(rest);
        output
    }

    /// Number of stored fragments.
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    fn total_len(&self) -> usize {
        self.items.iter().map(String::len).sum()
    }
}
