//! jm CLI - Jive markup converter.
//!
//! Provides commands for:
//! - `convert`: Convert Jive markup to HTML
//! - `links`: Rewrite links into the old forum using an id map
//! - `footer`: Print the legacy link footer for an imported thread

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, FooterArgs, LinksArgs};
use output::Output;

/// jm - Jive markup converter.
#[derive(Parser)]
#[command(name = "jm", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Jive markup to HTML.
    Convert(ConvertArgs),
    /// Rewrite links into the old forum.
    Links(LinksArgs),
    /// Print the footer markup for an imported thread.
    Footer(FooterArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Convert(args) => args.verbose,
        Commands::Links(args) => args.verbose,
        Commands::Footer(_) => false,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Links(args) => args.execute(),
        Commands::Footer(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
