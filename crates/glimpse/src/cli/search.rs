//! The `glimpse search` command.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use glimpse_core::{Config, OutputFormat as CoreOutputFormat, OutputWriter, SearchResult};

use super::setup::{load_index, query_deadline, resolve_with_deadline, IndexArgs};
use super::types::OutputFormat;

/// Arguments for the `search` command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Terms to search for; each term is resolved independently
    #[arg(required = true)]
    pub terms: Vec<String>,

    #[command(flatten)]
    pub index: IndexArgs,

    /// Similar terms added to each query (0 disables expansion)
    #[arg(short = 'x', long)]
    pub expand: Option<usize>,

    /// Images kept per term
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format (defaults to `output.format`)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the search command.
pub async fn execute(args: SearchArgs, mut config: Config) -> anyhow::Result<()> {
    args.index.apply(&mut config);
    if let Some(expand) = args.expand {
        config.search.expansion_terms = expand;
    }
    if let Some(limit) = args.limit {
        if limit == 0 {
            anyhow::bail!("--limit must be > 0");
        }
        config.search.max_matches = limit;
    }

    let terms: Vec<String> = args
        .terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if terms.is_empty() {
        anyhow::bail!("No non-empty search terms given");
    }

    let index = load_index(&config).await?;
    let deadline = query_deadline(&config);

    // Queries run concurrently against the shared index; results are
    // collected back in input order.
    let handles: Vec<_> = terms
        .into_iter()
        .map(|term| tokio::spawn(resolve_with_deadline(index.clone(), term, deadline)))
        .collect();
    let mut results: Vec<SearchResult> = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await??);
    }

    let format: CoreOutputFormat = match args.format {
        Some(f) => f.into(),
        None => CoreOutputFormat::parse(&config.output.format).unwrap_or_default(),
    };
    let pretty = args.pretty || config.output.pretty;

    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            write_results(BufWriter::new(file), format, pretty, &results)?;
            tracing::info!("Wrote {} results to {}", results.len(), path.display());
        }
        None => write_results(io::stdout().lock(), format, pretty, &results)?,
    }

    let empty = results.iter().filter(|r| r.is_empty()).count();
    if empty > 0 {
        tracing::info!("{} of {} queries matched no images", empty, results.len());
    }
    Ok(())
}

/// A single result is written as one object; several as an array (JSON) or
/// one line each (JSONL).
fn write_results<W: Write>(
    writer: W,
    format: CoreOutputFormat,
    pretty: bool,
    results: &[SearchResult],
) -> io::Result<()> {
    let mut out = OutputWriter::new(writer, format, pretty);
    match results {
        [single] => out.write(single)?,
        many => out.write_all(many)?,
    }
    out.flush()
}
