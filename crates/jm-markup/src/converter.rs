//! Conversion entry points and per-call state.

use crate::blocks::Fragments;
use crate::error::ConvertError;
use crate::normalize::normalize;
use crate::util::regularize_eols;
use crate::{block, paragraph};

/// Default cap on input size: 1 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Default cap on list and quote nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 16;

const TAB_WIDTH: usize = 4;

/// Resource limits applied to a conversion.
///
/// # Example
///
/// ```
/// use jm_markup::{ConvertOptions, Converter};
///
/// let options = ConvertOptions::default()
///     .with_max_input_bytes(64 * 1024)
///     .with_max_nesting_depth(8);
/// let converter = Converter::with_options(options);
/// assert_eq!(converter.convert("h2. Notes").unwrap(), "<h2>Notes</h2>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Inputs longer than this many bytes are rejected.
    pub max_input_bytes: usize,
    /// Deepest allowed list nesting or quote recursion.
    pub max_nesting_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ConvertOptions {
    /// Set the maximum input size in bytes.
    #[must_use]
    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    /// Set the maximum nesting depth for lists and quotes.
    #[must_use]
    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}

/// Jive markup to HTML converter.
///
/// A converter only holds its options. Every call to [`convert`](Self::convert)
/// builds fresh working state, so one converter can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom limits.
    #[must_use]
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Limits used by this converter.
    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert markup to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InputTooLarge`] before doing any work when
    /// `text` exceeds the input limit, and [`ConvertError::NestingTooDeep`]
    /// when lists or quotes nest deeper than allowed.
    pub fn convert(&self, text: &str) -> Result<String, ConvertError> {
        self.check_size(text.len())?;
        self.convert_unchecked(text)
    }

    /// Convert markup given as raw bytes.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD before conversion.
    ///
    /// # Errors
    ///
    /// Same as [`convert`](Self::convert). The size limit applies to the
    /// byte length of `bytes`.
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<String, ConvertError> {
        self.check_size(bytes.len())?;
        self.convert_unchecked(&String::from_utf8_lossy(bytes))
    }

    fn check_size(&self, size: usize) -> Result<(), ConvertError> {
        let limit = self.options.max_input_bytes;
        if size > limit {
            tracing::warn!(size, limit, "Input exceeds size limit");
            return Err(ConvertError::InputTooLarge { size, limit });
        }
        Ok(())
    }

    fn convert_unchecked(&self, text: &str) -> Result<String, ConvertError> {
        let mut state = ConversionState::new(&self.options);
        let normalized = normalize(text, state.tab_width);
        let assembled = state.render_blocks(&normalized)?;
        let html = regularize_eols(&state.blocks.resolve_all(&assembled));

        tracing::debug!(
            input_bytes = text.len(),
            output_bytes = html.len(),
            blocks = state.blocks.len(),
            "Converted markup"
        );
        Ok(html)
    }
}

/// Convert markup to HTML with default limits.
///
/// # Errors
///
/// See [`Converter::convert`].
pub fn convert(text: &str) -> Result<String, ConvertError> {
    Converter::new().convert(text)
}

/// Working state of a single conversion.
pub(crate) struct ConversionState<'a> {
    options: &'a ConvertOptions,
    pub(crate) blocks: Fragments,
    pub(crate) tab_width: usize,
    list_level: usize,
    quote_level: usize,
}

impl<'a> ConversionState<'a> {
    pub(crate) fn new(options: &'a ConvertOptions) -> Self {
        Self {
            options,
            blocks: Fragments::blocks(),
            tab_width: TAB_WIDTH,
            list_level: 0,
            quote_level: 0,
        }
    }

    /// Run the block pass on `text` and assemble the remainder into
    /// paragraphs. Block placeholders stay unresolved in the result.
    pub(crate) fn render_blocks(&mut self, text: &str) -> Result<String, ConvertError> {
        let text = block::rewrite(self, text)?;
        Ok(paragraph::assemble(&self.blocks, &text))
    }

    /// Store a finished block and return its placeholder on its own
    /// paragraph.
    pub(crate) fn hashed(&mut self, html: &str) -> String {
        format!("\n\n{}\n\n", self.blocks.hash(html))
    }

    pub(crate) fn enter_list(&mut self) -> Result<(), ConvertError> {
        self.list_level += 1;
        self.check_depth(self.list_level)
    }

    pub(crate) fn leave_list(&mut self) {
        self.list_level -= 1;
    }

    pub(crate) fn enter_quote(&mut self) -> Result<(), ConvertError> {
        self.quote_level += 1;
        self.check_depth(self.quote_level)
    }

    pub(crate) fn leave_quote(&mut self) {
        self.quote_level -= 1;
    }

    fn check_depth(&self, level: usize) -> Result<(), ConvertError> {
        let limit = self.options.max_nesting_depth;
        if level > limit {
            tracing::warn!(level, limit, "Nesting exceeds depth limit");
            return Err(ConvertError::NestingTooDeep { limit });
        }
        Ok(())
    }
}
