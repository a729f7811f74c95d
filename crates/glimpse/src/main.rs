//! Glimpse CLI - tag search over classified images with query expansion.
//!
//! Glimpse answers a search term with the images tagged with it, plus the
//! images tagged with the closest vocabulary terms in a word embedding space.
//!
//! # Usage
//!
//! ```bash
//! # Search one or more terms
//! glimpse search beach sunset --pretty
//!
//! # Show how a term expands
//! glimpse similar beach -k 5
//!
//! # Prompt for queries against a loaded index
//! glimpse interactive
//!
//! # View configuration
//! glimpse config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Glimpse - tag search over classified images with query expansion.
#[derive(Parser, Debug)]
#[command(name = "glimpse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Search images by tag, expanded with similar terms
    Search(cli::search::SearchArgs),

    /// Show the vocabulary terms most similar to a term
    Similar(cli::similar::SimilarArgs),

    /// Load the index and print its statistics
    Stats(cli::stats::StatsArgs),

    /// Search repeatedly from a prompt
    Interactive(cli::interactive::InteractiveArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match glimpse_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `glimpse config path`."
            );
            glimpse_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Glimpse v{}", glimpse_core::VERSION);

    match cli.command {
        Commands::Search(args) => cli::search::execute(args, config).await,
        Commands::Similar(args) => cli::similar::execute(args, config).await,
        Commands::Stats(args) => cli::stats::execute(args, config).await,
        Commands::Interactive(args) => cli::interactive::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config).await,
    }
}
