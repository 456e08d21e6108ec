//! CLI error types.

use jm_config::ConfigError;
use jm_markup::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("invalid link map: {0}")]
    LinkMap(#[from] serde_json::Error),
}
