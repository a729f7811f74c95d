//! Word similarity for query expansion.
//!
//! The resolver only depends on the [`WordSimilarity`] capability, so it can
//! be driven by a stub in tests; [`SimilarityEngine`] is the embedding-backed
//! implementation.

pub mod engine;

pub use engine::SimilarityEngine;

use crate::error::LookupError;

/// Number of expansion terms requested per query by default.
pub const DEFAULT_EXPANSION_TERMS: usize = 10;

/// Finds vocabulary terms close in meaning to a target term.
pub trait WordSimilarity: Send + Sync {
    /// Up to `k` vocabulary terms most similar to `target`, most similar
    /// first, never including `target` itself.
    ///
    /// Returns [`LookupError::NotFound`] when `target` is unknown. May return
    /// fewer than `k` terms when the vocabulary is small.
    fn find_similar(&self, target: &str, k: usize) -> Result<Vec<String>, LookupError>;
}
