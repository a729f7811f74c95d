//! Index loading and query execution shared by the search commands.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use glimpse_core::{Config, SearchIndex, SearchResult};

/// Data file overrides accepted by every command that builds the index.
#[derive(Args, Debug, Default, Clone)]
pub struct IndexArgs {
    /// Tag cache JSON file (overrides `data.tag_cache`)
    #[arg(long, env = "GLIMPSE_TAG_CACHE")]
    pub cache: Option<PathBuf>,

    /// Word embedding table (overrides `data.embeddings`)
    #[arg(long, env = "GLIMPSE_EMBEDDINGS")]
    pub embeddings: Option<PathBuf>,
}

impl IndexArgs {
    /// Apply the overrides to `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(cache) = &self.cache {
            config.data.tag_cache = cache.to_string_lossy().into_owned();
        }
        if let Some(embeddings) = &self.embeddings {
            config.data.embeddings = embeddings.to_string_lossy().into_owned();
        }
    }
}

/// Load the tag cache and embedding table and build the index.
///
/// Loading is blocking file I/O and parsing, so it runs on the blocking pool.
pub async fn load_index(config: &Config) -> anyhow::Result<SearchIndex> {
    let config = config.clone();
    let start = Instant::now();
    let index = tokio::task::spawn_blocking(move || SearchIndex::load(&config)).await??;
    tracing::info!("Index loaded in {:.1}s", start.elapsed().as_secs_f64());
    Ok(index)
}

/// Resolve `term` on the blocking pool, failing if it exceeds `deadline`.
///
/// A query that times out keeps running to completion in the background;
/// the scan holds no locks, so it cannot block other queries.
pub async fn resolve_with_deadline(
    index: SearchIndex,
    term: String,
    deadline: Duration,
) -> anyhow::Result<SearchResult> {
    let query = term.clone();
    let handle = tokio::task::spawn_blocking(move || index.resolve(&term));
    match tokio::time::timeout(deadline, handle).await {
        Ok(joined) => Ok(joined?),
        Err(_) => anyhow::bail!(
            "Query '{}' timed out after {}ms",
            query,
            deadline.as_millis()
        ),
    }
}

/// The configured per-query deadline.
pub fn query_deadline(config: &Config) -> Duration {
    Duration::from_millis(config.limits.query_timeout_ms)
}
