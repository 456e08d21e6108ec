//! Error types for markup conversion.

/// Error returned when a conversion is refused.
///
/// Markup itself is never rejected: unrecognized constructs fall through to
/// plain text. Only inputs that exceed the configured resource limits fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// Input is larger than [`ConvertOptions::max_input_bytes`](crate::ConvertOptions).
    #[error("input is {size} bytes, limit is {limit} bytes")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Nested lists or quotes go deeper than
    /// [`ConvertOptions::max_nesting_depth`](crate::ConvertOptions).
    #[error("nesting exceeds maximum depth of {limit}")]
    NestingTooDeep {
        /// Configured depth limit.
        limit: usize,
    },
}
