//! Core data types returned by Glimpse queries.
//!
//! These are the values the front end renders: one [`SearchResult`] per query,
//! made of one [`MatchSet`] per (original or expanded) term.

use serde::{Deserialize, Serialize};

/// One image tagged with a term at a given confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRef {
    /// Image reference, typically a URL
    pub image: String,

    /// Classifier confidence from 0.0 to 1.0
    pub score: f32,
}

impl ScoredRef {
    pub fn new(image: impl Into<String>, score: f32) -> Self {
        Self {
            image: image.into(),
            score,
        }
    }
}

/// The ranked images for a single term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    /// The term that was looked up
    pub term: String,

    /// Best-scoring images, highest confidence first. Empty when the term
    /// tags no image.
    pub matches: Vec<ScoredRef>,
}

impl MatchSet {
    /// Whether no image carries this term.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// The answer to one query: the query term's matches followed by the
/// matches of each expansion term, most similar first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The term as the user entered it
    pub query: String,

    /// Match sets in term order; the first always belongs to `query`
    pub match_sets: Vec<MatchSet>,
}

impl SearchResult {
    /// Whether no match set contains any image.
    pub fn is_empty(&self) -> bool {
        self.match_sets.iter().all(MatchSet::is_empty)
    }

    /// Total number of image references across all match sets.
    pub fn total_matches(&self) -> usize {
        self.match_sets.iter().map(|m| m.matches.len()).sum()
    }

    /// The expansion terms, in similarity order.
    pub fn expansions(&self) -> impl Iterator<Item = &str> {
        self.match_sets.iter().skip(1).map(|m| m.term.as_str())
    }
}

/// A vocabulary term and its cosine similarity to a target term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarTerm {
    pub term: String,
    pub similarity: f32,
}

/// Counts collected while building the search index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Images in the tag cache
    pub images: usize,

    /// Distinct terms in the concordance
    pub terms: usize,

    /// Entries in the embedding table
    pub embeddings: usize,

    /// Embedding dimensionality
    pub dimension: usize,

    /// Corpus terms that have an embedding
    pub vocabulary: usize,
}

impl IndexStats {
    /// Fraction of corpus terms that have an embedding (0.0 when empty).
    pub fn coverage(&self) -> f64 {
        if self.terms == 0 {
            0.0
        } else {
            self.vocabulary as f64 / self.terms as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> SearchResult {
        SearchResult {
            query: "cat".to_string(),
            match_sets: vec![
                MatchSet {
                    term: "cat".to_string(),
                    matches: vec![ScoredRef::new("img1", 0.9), ScoredRef::new("img2", 0.3)],
                },
                MatchSet {
                    term: "kitten".to_string(),
                    matches: vec![],
                },
                MatchSet {
                    term: "dog".to_string(),
                    matches: vec![ScoredRef::new("img3", 0.5)],
                },
            ],
        }
    }

    #[test]
    fn test_total_matches() {
        assert_eq!(result().total_matches(), 3);
        assert!(!result().is_empty());
    }

    #[test]
    fn test_expansions_skip_query_term() {
        let r = result();
        let expansions: Vec<&str> = r.expansions().collect();
        assert_eq!(expansions, vec!["kitten", "dog"]);
    }

    #[test]
    fn test_search_result_serializes_field_names() {
        let json = serde_json::to_string(&result()).unwrap();
        assert!(json.contains("\"query\":\"cat\""));
        assert!(json.contains("\"match_sets\""));
        assert!(json.contains("\"image\":\"img1\""));
        assert!(json.contains("\"matches\":[]"));
    }

    #[test]
    fn test_coverage() {
        let stats = IndexStats {
            terms: 4,
            vocabulary: 3,
            ..Default::default()
        };
        assert!((stats.coverage() - 0.75).abs() < 1e-9);
        assert_eq!(IndexStats::default().coverage(), 0.0);
    }
}
