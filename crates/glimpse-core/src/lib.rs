//! Glimpse Core - tag search over classified images with query expansion.
//!
//! Glimpse answers a free-text term with the images tagged with that term,
//! plus the images tagged with the vocabulary terms closest to it in a
//! pre-trained word embedding space.
//!
//! # Architecture
//!
//! All indexes are built once at startup and are read-only afterwards:
//!
//! ```text
//! tag cache ──► Concordance (term → images) ──────────────┐
//!     │                                                    ▼
//!     └─► corpus terms ─► VocabularyIndex ─► SimilarityEngine ─► QueryResolver
//!                              ▲
//! embedding table ─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use glimpse_core::{Config, SearchIndex};
//!
//! let config = Config::load()?;
//! let index = SearchIndex::load(&config)?;
//!
//! let result = index.resolve("beach");
//! for set in &result.match_sets {
//!     println!("{}: {} images", set.term, set.matches.len());
//! }
//! ```

// Module declarations
pub mod cache;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod math;
pub mod output;
pub mod search;
pub mod similarity;
pub mod types;

// Re-exports for convenient access
pub use cache::{ImageTag, TagCache};
pub use config::Config;
pub use embedding::EmbeddingTable;
pub use error::{ConfigError, GlimpseError, LoadError, LoadResult, LookupError, Result};
pub use index::{Concordance, VocabularyIndex};
pub use output::{OutputFormat, OutputWriter};
pub use search::QueryResolver;
pub use similarity::{SimilarityEngine, WordSimilarity};
pub use types::{IndexStats, MatchSet, ScoredRef, SearchResult, SimilarTerm};

use std::sync::Arc;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fully built search state: the entry point for serving queries.
///
/// Construction is the only phase that performs I/O; afterwards every field
/// is immutable and shared by `Arc`, so the index can be handed to any number
/// of request handlers.
#[derive(Clone)]
pub struct SearchIndex {
    resolver: QueryResolver,
    similarity: Arc<SimilarityEngine>,
    stats: IndexStats,
}

impl SearchIndex {
    /// Load the tag cache and embedding table named by `config` and build
    /// every index. Any load error aborts construction.
    pub fn load(config: &Config) -> Result<Self> {
        let cache = TagCache::load(&config.tag_cache_path())?;
        let table = EmbeddingTable::load(&config.embeddings_path())?;
        Ok(Self::build(&cache, table, config))
    }

    /// Build every index from already-loaded inputs.
    pub fn build(cache: &TagCache, table: EmbeddingTable, config: &Config) -> Self {
        tracing::debug!("Building search index (glimpse v{})", VERSION);

        let concordance = Arc::new(Concordance::build(cache));
        let table = Arc::new(table);
        let vocabulary = VocabularyIndex::build(Arc::clone(&table), concordance.terms());

        let stats = IndexStats {
            images: cache.len(),
            terms: concordance.len(),
            embeddings: table.len(),
            dimension: table.dim(),
            vocabulary: vocabulary.len(),
        };
        if stats.terms > 0 && stats.vocabulary == 0 {
            tracing::warn!(
                "None of the {} corpus terms has an embedding; queries will not be expanded",
                stats.terms
            );
        }
        tracing::info!(
            "Search index ready: {} images, {} terms, {:.0}% with embeddings",
            stats.images,
            stats.terms,
            stats.coverage() * 100.0
        );

        let similarity = Arc::new(SimilarityEngine::new(vocabulary));
        let resolver = QueryResolver::new(
            Arc::clone(&similarity) as Arc<dyn WordSimilarity>,
            concordance,
            config.search.clone(),
        );

        Self {
            resolver,
            similarity,
            stats,
        }
    }

    /// The embedding-backed similarity engine.
    pub fn similarity(&self) -> &SimilarityEngine {
        &self.similarity
    }

    /// Counts collected while building.
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Resolve a query term; see [`QueryResolver::resolve`].
    pub fn resolve(&self, term: &str) -> SearchResult {
        self.resolver.resolve(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SearchIndex {
        let cache = TagCache::from_images(vec![
            ("img1", vec![ImageTag::new("cat", 0.9), ImageTag::new("dog", 0.5)]),
            ("img2", vec![ImageTag::new("cat", 0.3), ImageTag::new("blurry", 0.4)]),
        ]);
        let table = EmbeddingTable::from_entries(vec![
            ("cat", vec![1.0, 0.0]),
            ("dog", vec![0.8, 0.2]),
            ("kitten", vec![0.99, 0.01]),
        ])
        .unwrap();
        SearchIndex::build(&cache, table, &Config::default())
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_build_stats() {
        let index = index();
        let stats = index.stats();
        assert_eq!(stats.images, 2);
        assert_eq!(stats.terms, 3);
        assert_eq!(stats.embeddings, 3);
        assert_eq!(stats.dimension, 2);
        // "blurry" has no embedding
        assert_eq!(stats.vocabulary, 2);
    }

    #[test]
    fn test_resolve_expands_through_vocabulary() {
        let result = index().resolve("cat");
        let terms: Vec<&str> = result.match_sets.iter().map(|m| m.term.as_str()).collect();
        assert_eq!(terms, vec!["cat", "dog"]);
        assert_eq!(result.match_sets[0].matches.len(), 2);
    }

    #[test]
    fn test_resolve_non_corpus_term_with_embedding() {
        // "kitten" tags no image but still expands into the corpus
        let result = index().resolve("kitten");
        assert_eq!(result.match_sets[0].term, "kitten");
        assert!(result.match_sets[0].is_empty());
        assert_eq!(result.match_sets[1].term, "cat");
    }

    #[tokio::test]
    async fn test_concurrent_queries_on_blocking_pool() {
        let index = index();
        let tasks: Vec<_> = ["cat", "dog", "unicorn"]
            .into_iter()
            .map(|term| {
                let index = index.clone();
                tokio::task::spawn_blocking(move || index.resolve(term))
            })
            .collect();
        for task in tasks {
            let result = task.await.unwrap();
            assert!(!result.match_sets.is_empty());
        }
    }

    #[test]
    fn test_load_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.data.tag_cache = dir.path().join("cache.json").to_string_lossy().into_owned();
        let err = SearchIndex::load(&config).err().unwrap();
        assert!(matches!(err, GlimpseError::Load(LoadError::Open { .. })));
    }
}
