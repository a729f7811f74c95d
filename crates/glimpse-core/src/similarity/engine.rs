//! Exhaustive cosine-similarity scan over the vocabulary index.
//!
//! Each query scores the target against every vocabulary term. Vocabulary
//! norms are precomputed, so a query costs one dot product per term plus a
//! partial selection of the best `k`.

use std::cmp::Ordering;

use crate::error::LookupError;
use crate::index::VocabularyIndex;
use crate::math::{cosine_from_parts, dot, l2_norm};
use crate::types::SimilarTerm;

use super::WordSimilarity;

/// Embedding-backed [`WordSimilarity`].
///
/// Targets are looked up in the full embedding table, so a query word need
/// not be a corpus term; candidates come only from the vocabulary index.
pub struct SimilarityEngine {
    vocabulary: VocabularyIndex,
}

impl SimilarityEngine {
    pub fn new(vocabulary: VocabularyIndex) -> Self {
        Self { vocabulary }
    }

    /// Up to `k` vocabulary terms with their cosine similarity to `target`.
    ///
    /// Sorted by descending similarity; equal scores are ordered by term.
    /// A zero-norm target or candidate scores 0.0.
    pub fn find_similar_scored(
        &self,
        target: &str,
        k: usize,
    ) -> Result<Vec<SimilarTerm>, LookupError> {
        let target_vec = self
            .vocabulary
            .table()
            .get(target)
            .ok_or_else(|| LookupError::NotFound {
                term: target.to_string(),
            })?;

        if k == 0 {
            return Ok(Vec::new());
        }

        let target_norm = l2_norm(target_vec);
        let mut scored: Vec<(&str, f32)> = self
            .vocabulary
            .iter()
            .filter(|(term, _, _)| *term != target)
            .map(|(term, vec, norm)| {
                (term, cosine_from_parts(dot(target_vec, vec), target_norm, norm))
            })
            .collect();

        if scored.len() > k {
            scored.select_nth_unstable_by(k - 1, by_similarity_desc);
            scored.truncate(k);
        }
        scored.sort_by(by_similarity_desc);

        tracing::debug!(
            "Expanded '{}' to {} terms (scanned {})",
            target,
            scored.len(),
            self.vocabulary.len()
        );

        Ok(scored
            .into_iter()
            .map(|(term, similarity)| SimilarTerm {
                term: term.to_string(),
                similarity,
            })
            .collect())
    }
}

impl WordSimilarity for SimilarityEngine {
    fn find_similar(&self, target: &str, k: usize) -> Result<Vec<String>, LookupError> {
        Ok(self
            .find_similar_scored(target, k)?
            .into_iter()
            .map(|s| s.term)
            .collect())
    }
}

fn by_similarity_desc(a: &(&str, f32), b: &(&str, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingTable;
    use std::sync::Arc;

    fn engine(entries: Vec<(&str, Vec<f32>)>, vocab: &[&str]) -> SimilarityEngine {
        let table = Arc::new(EmbeddingTable::from_entries(entries).unwrap());
        SimilarityEngine::new(VocabularyIndex::build(table, vocab.iter().copied()))
    }

    fn animals() -> SimilarityEngine {
        engine(
            vec![
                ("cat", vec![1.0, 0.0, 0.0]),
                ("kitten", vec![0.9, 0.1, 0.0]),
                ("dog", vec![0.7, 0.7, 0.0]),
                ("car", vec![0.0, 0.0, 1.0]),
                ("feline", vec![0.95, 0.05, 0.0]),
                ("zero", vec![0.0, 0.0, 0.0]),
            ],
            &["cat", "kitten", "dog", "car", "zero"],
        )
    }

    #[test]
    fn test_identical_vectors_score_one() {
        let engine = engine(
            vec![("cat", vec![1.0, 0.0]), ("dog", vec![1.0, 0.0])],
            &["cat", "dog"],
        );
        let result = engine.find_similar_scored("cat", 5).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].term, "dog");
        assert!((result[0].similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_extreme_magnitudes_keep_their_cosine() {
        for scale in [1e-4_f32, 1e-20, 1e20, 1e30] {
            let engine = engine(
                vec![
                    ("cat", vec![scale, 0.0]),
                    ("dog", vec![scale, 0.0]),
                    ("fish", vec![0.0, scale]),
                ],
                &["cat", "dog", "fish"],
            );
            let result = engine.find_similar_scored("cat", 5).unwrap();
            assert_eq!(result[0].term, "dog", "scale {scale}");
            assert!((result[0].similarity - 1.0).abs() < 1e-6, "scale {scale}");
            assert_eq!(result[1].similarity, 0.0, "scale {scale}");
        }
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let engine = engine(
            vec![("cat", vec![1.0, 0.0]), ("fish", vec![0.0, 1.0])],
            &["cat", "fish"],
        );
        let result = engine.find_similar_scored("cat", 5).unwrap();
        assert_eq!(result[0].term, "fish");
        assert_eq!(result[0].similarity, 0.0);
    }

    #[test]
    fn test_excludes_target() {
        let engine = animals();
        for term in ["cat", "kitten", "dog", "car", "zero"] {
            let similar = engine.find_similar(term, 10).unwrap();
            assert!(!similar.iter().any(|t| t == term), "{term} in its own expansion");
        }
    }

    #[test]
    fn test_unknown_target_not_found() {
        let err = animals().find_similar("unicorn", 10).unwrap_err();
        assert_eq!(
            err,
            LookupError::NotFound {
                term: "unicorn".to_string()
            }
        );
    }

    #[test]
    fn test_target_outside_vocabulary_is_allowed() {
        // "feline" has an embedding but tags no image
        let similar = animals().find_similar("feline", 2).unwrap();
        assert_eq!(similar, vec!["cat", "kitten"]);
    }

    #[test]
    fn test_sorted_descending() {
        let result = animals().find_similar_scored("cat", 10).unwrap();
        assert!(result
            .windows(2)
            .all(|w| w[0].similarity >= w[1].similarity));
        let terms: Vec<&str> = result.iter().map(|s| s.term.as_str()).collect();
        assert_eq!(terms[..2], ["kitten", "dog"]);
    }

    #[test]
    fn test_truncates_to_k() {
        let similar = animals().find_similar("cat", 2).unwrap();
        assert_eq!(similar, vec!["kitten", "dog"]);
    }

    #[test]
    fn test_small_vocabulary_returns_fewer_than_k() {
        let similar = animals().find_similar("cat", 10).unwrap();
        // 5 vocabulary terms minus the target
        assert_eq!(similar.len(), 4);
    }

    #[test]
    fn test_zero_k() {
        assert!(animals().find_similar("cat", 0).unwrap().is_empty());
        // Unknown targets still fail with k = 0
        assert!(animals().find_similar("unicorn", 0).is_err());
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let engine = animals();
        let result = engine.find_similar_scored("zero", 10).unwrap();
        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|s| s.similarity == 0.0));
        // Ties fall back to term order
        let terms: Vec<&str> = result.iter().map(|s| s.term.as_str()).collect();
        assert_eq!(terms, vec!["car", "cat", "dog", "kitten"]);

        let from_cat = engine.find_similar_scored("cat", 10).unwrap();
        assert!(from_cat.iter().all(|s| s.similarity.is_finite()));
        assert_eq!(from_cat.last().unwrap().term, "zero");
    }

    #[test]
    fn test_negative_similarity_ranks_last() {
        let engine = engine(
            vec![
                ("up", vec![0.0, 1.0]),
                ("down", vec![0.0, -1.0]),
                ("side", vec![1.0, 0.0]),
            ],
            &["up", "down", "side"],
        );
        let result = engine.find_similar_scored("up", 10).unwrap();
        assert_eq!(result[0].term, "side");
        assert_eq!(result[1].term, "down");
        assert!((result[1].similarity + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_vocabulary() {
        let engine = engine(vec![("cat", vec![1.0, 0.0])], &[]);
        assert!(engine.find_similar("cat", 10).unwrap().is_empty());
    }
}
