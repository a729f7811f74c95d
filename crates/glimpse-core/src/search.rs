//! Query resolution: expand a term, then rank images for every expanded term.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::index::Concordance;
use crate::similarity::WordSimilarity;
use crate::types::{MatchSet, SearchResult};

/// Answers user queries from immutable, shared indexes.
///
/// Holds only `Arc`s to read-only data, so one resolver (or clones of it)
/// can serve concurrent queries without locking.
#[derive(Clone)]
pub struct QueryResolver {
    similarity: Arc<dyn WordSimilarity>,
    concordance: Arc<Concordance>,
    config: SearchConfig,
}

impl QueryResolver {
    pub fn new(
        similarity: Arc<dyn WordSimilarity>,
        concordance: Arc<Concordance>,
        config: SearchConfig,
    ) -> Self {
        Self {
            similarity,
            concordance,
            config,
        }
    }

    /// Resolve a query term into ranked match sets.
    ///
    /// The first match set is always `term` itself, followed by its
    /// expansion terms in similarity order. Terms without an embedding are
    /// searched without expansion; terms tagging no image yield an empty
    /// match set. Never fails.
    pub fn resolve(&self, term: &str) -> SearchResult {
        let terms = self.expand(term);
        let match_sets: Vec<MatchSet> = terms
            .into_iter()
            .map(|t| {
                let matches = self.concordance.top(&t, self.config.max_matches);
                MatchSet { term: t, matches }
            })
            .collect();

        let result = SearchResult {
            query: term.to_string(),
            match_sets,
        };
        tracing::debug!(
            "Resolved '{}': {} match sets, {} images",
            term,
            result.match_sets.len(),
            result.total_matches()
        );
        result
    }

    /// `[term]` followed by its expansion terms, if any.
    fn expand(&self, term: &str) -> Vec<String> {
        let mut terms = vec![term.to_string()];
        if self.config.expansion_terms == 0 {
            return terms;
        }
        match self
            .similarity
            .find_similar(term, self.config.expansion_terms)
        {
            Ok(similar) => terms.extend(similar),
            Err(e) => tracing::debug!("{}; searching without expansion", e),
        }
        terms
    }
}
