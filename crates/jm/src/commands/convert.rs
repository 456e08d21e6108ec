//! `jm convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use jm_config::{CliSettings, Config, ConverterConfig};
use jm_markup::{ConvertOptions, Converter};

use super::{read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markup file to convert (default: stdin).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover jm.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reject inputs larger than this many bytes (overrides config).
    #[arg(long)]
    max_input_bytes: Option<usize>,

    /// Maximum nesting of lists and quotes (overrides config).
    #[arg(long)]
    max_nesting_depth: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, I/O or conversion fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            max_input_bytes: self.max_input_bytes,
            max_nesting_depth: self.max_nesting_depth,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let converter = Converter::with_options(convert_options(&config.converter));

        let markup = read_input(self.input.as_deref())?;
        let html = converter.convert_bytes(&markup)?;
        tracing::info!(
            input_bytes = markup.len(),
            output_bytes = html.len(),
            "Converted document"
        );

        write_output(self.output.as_deref(), &html)?;
        if let Some(path) = &self.output {
            output.success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }
}

/// Map configured limits onto converter options.
pub(crate) fn convert_options(config: &ConverterConfig) -> ConvertOptions {
    ConvertOptions::default()
        .with_max_input_bytes(config.max_input_bytes)
        .with_max_nesting_depth(config.max_nesting_depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_from_config() {
        let config = ConverterConfig {
            max_input_bytes: 100,
            max_nesting_depth: 3,
        };
        let options = convert_options(&config);
        assert_eq!(options.max_input_bytes, 100);
        assert_eq!(options.max_nesting_depth, 3);
    }

    #[test]
    fn test_default_limits_agree() {
        let options = convert_options(&ConverterConfig::default());
        assert_eq!(options, ConvertOptions::default());
    }
}
