//! The `glimpse similar` command: show a term's expansion with scores.

use clap::Args;
use glimpse_core::{Config, LookupError};

use super::setup::{load_index, IndexArgs};

/// Arguments for the `similar` command.
#[derive(Args, Debug)]
pub struct SimilarArgs {
    /// Term to expand
    pub term: String,

    #[command(flatten)]
    pub index: IndexArgs,

    /// Number of similar terms to show
    #[arg(short, default_value = "10")]
    pub k: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Execute the similar command.
pub async fn execute(args: SimilarArgs, mut config: Config) -> anyhow::Result<()> {
    args.index.apply(&mut config);
    let index = load_index(&config).await?;

    let similar = match index.similarity().find_similar_scored(&args.term, args.k) {
        Ok(similar) => similar,
        Err(LookupError::NotFound { term }) => {
            anyhow::bail!("'{}' is not in the embedding table", term)
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&similar)?);
        return Ok(());
    }

    if similar.is_empty() {
        println!("No vocabulary terms to compare against.");
    }
    for s in &similar {
        println!("{:>8.4}  {}", s.similarity, s.term);
    }
    Ok(())
}
