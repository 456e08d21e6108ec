//! Jive wiki markup to HTML converter.
//!
//! Converts the markup used by Jive forums (headers, lists, block quotes,
//! code blocks, links, images and inline styles) to HTML.
//!
//! # Architecture
//!
//! Conversion is a fixed sequence of passes over the text:
//!
//! 1. Normalization: HTML metacharacters are escaped, line endings unified,
//!    tabs expanded and whitespace-only lines blanked.
//! 2. Block pass: headers, rules, lists, code blocks and quotes are rendered
//!    and replaced with opaque placeholders so later passes leave them alone.
//! 3. Paragraph assembly: remaining prose is split on blank lines, rendered
//!    inline (links, images, styles) and wrapped in `<p>`.
//! 4. Finalization: placeholders are swapped back for their HTML.
//!
//! The output is not sanitized beyond the initial escaping and is meant to
//! go through an HTML allow-list before being shown to users.
//!
//! # Example
//!
//! ```
//! let html = jm_markup::convert("h1. Hello\n\n*Bold* text").unwrap();
//! assert_eq!(html, "<h1>Hello</h1>\n<p><strong>Bold</strong> text</p>");
//! ```

mod block;
mod blocks;
mod converter;
mod error;
mod footer;
mod internal_links;
mod normalize;
mod paragraph;
mod span;
mod util;

pub use converter::{
    ConvertOptions, Converter, DEFAULT_MAX_INPUT_BYTES, DEFAULT_MAX_NESTING_DEPTH, convert,
};
pub use error::ConvertError;
pub use footer::legacy_link_footer;
pub use internal_links::{
    InternalLink, LinkKind, LinkResolver, find_internal_links, rewrite_internal_links,
};
pub use util::escape_html;
