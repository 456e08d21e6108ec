//! `jm links` command implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Args;
use jm_config::{CliSettings, Config};
use jm_markup::{InternalLink, LinkKind, LinkResolver, find_internal_links, rewrite_internal_links};
use serde::Deserialize;

use super::{read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    /// Markup file to rewrite (default: stdin).
    input: Option<PathBuf>,

    /// JSON file mapping old message and thread ids to new URLs.
    #[arg(short, long)]
    map: PathBuf,

    /// Write markup to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Old forum URL stripped from absolute links (overrides config).
    #[arg(long, env = "JM_JIVE_URL")]
    jive_url: Option<String>,

    /// Path to configuration file (default: auto-discover jm.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl LinksArgs {
    /// Execute the links command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, the link map or I/O fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            jive_url: self.jive_url.clone(),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let map = LinkMap::load(&self.map)?;

        let markup = read_input(self.input.as_deref())?;
        let markup = String::from_utf8_lossy(&markup);

        let links = find_internal_links(&markup);
        let unresolved = links
            .iter()
            .filter(|(_, link)| map.resolve(link).is_none())
            .count();
        let rewritten = rewrite_internal_links(&markup, config.import.jive_url.as_deref(), &map);
        tracing::info!(
            links = links.len(),
            unresolved,
            "Rewrote internal links"
        );

        write_output(self.output.as_deref(), &rewritten)?;
        output.info(&format!(
            "Rewrote {} link(s)",
            links.len() - unresolved
        ));
        if unresolved > 0 {
            output.warning(&format!(
                "{unresolved} of {} link(s) had no target and were removed",
                links.len()
            ));
        }
        if let Some(path) = &self.output {
            output.success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }
}

/// New URLs for imported messages and threads, keyed by old id.
///
/// ```json
/// {"message": {"8477": "/question/12/"}, "thread": {"1888": "/question/3/"}}
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LinkMap {
    message: HashMap<u64, String>,
    thread: HashMap<u64, String>,
}

impl LinkMap {
    fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl LinkResolver for LinkMap {
    fn resolve(&self, link: &InternalLink) -> Option<String> {
        let urls = match link.kind {
            LinkKind::Message => &self.message,
            LinkKind::Thread => &self.thread,
        };
        urls.get(&link.id).cloned()
    }
}
