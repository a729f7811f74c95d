//! The `glimpse stats` command: load the index and report its size.

use clap::Args;
use glimpse_core::Config;
use serde::Serialize;

use super::setup::{load_index, IndexArgs};

/// Arguments for the `stats` command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub index: IndexArgs,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    #[serde(flatten)]
    stats: &'a glimpse_core::IndexStats,
    coverage: f64,
}

/// Execute the stats command.
pub async fn execute(args: StatsArgs, mut config: Config) -> anyhow::Result<()> {
    args.index.apply(&mut config);
    let index = load_index(&config).await?;
    let stats = index.stats();

    let report = StatsReport {
        stats,
        coverage: stats.coverage(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
