//! `jm footer` command implementation.

use std::path::PathBuf;

use clap::Args;
use jm_config::{CliSettings, Config};
use jm_markup::legacy_link_footer;

use super::write_output;
use crate::error::CliError;

/// Arguments for the footer command.
#[derive(Args)]
pub(crate) struct FooterArgs {
    /// Thread id on the old forum.
    #[arg(long)]
    thread_id: u64,

    /// Old forum URL (overrides config).
    #[arg(long, env = "JM_JIVE_URL")]
    jive_url: Option<String>,

    /// Path to configuration file (default: auto-discover jm.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl FooterArgs {
    /// Execute the footer command.
    ///
    /// # Errors
    ///
    /// Returns an error if no forum URL is configured.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            jive_url: self.jive_url,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let jive_url = config.import.require_jive_url()?;

        write_output(None, &legacy_link_footer(jive_url, self.thread_id))?;
        Ok(())
    }
}
