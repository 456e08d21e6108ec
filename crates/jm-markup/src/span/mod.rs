//! Inline (span-level) rendering.
//!
//! Runs on the text of a single header, list item, quote line or paragraph.
//! Links and images are rendered first and parked in a span-local
//! [`Fragments`] stash, then inline styles are applied to the remaining
//! text, then the stash is restored.

mod links;
mod style;

use crate::blocks::Fragments;

/// Render inline markup in `text`.
pub(crate) fn render(text: &str) -> String {
    let mut stash = Fragments::spans();
    let text = links::render(text, &mut stash);
    let text = style::apply(&text);
    let text = stash.resolve_all(&text);
    style::hard_breaks(&text)
}
