//! Embedding vocabulary restricted to the terms used as image tags.
//!
//! Entries share rows of the full [`EmbeddingTable`] instead of copying
//! vectors, and carry a precomputed L2 norm for similarity scoring.

use std::collections::HashSet;
use std::sync::Arc;

use crate::embedding::EmbeddingTable;
use crate::math::l2_norm;

/// A vocabulary term resolved to its row in the embedding table.
#[derive(Debug, Clone, Copy)]
struct VocabEntry {
    row: usize,
    norm: f64,
}

/// Corpus terms that have an embedding.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    table: Arc<EmbeddingTable>,
    entries: Vec<VocabEntry>,
    members: HashSet<usize>,
}

impl VocabularyIndex {
    /// Restrict `table` to `terms`.
    ///
    /// Terms without an embedding are dropped silently; a tag corpus is
    /// expected to contain words the embedding table has never seen.
    /// Repeated terms are indexed once, in first-seen order.
    pub fn build<I, S>(table: Arc<EmbeddingTable>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut members = HashSet::new();
        let mut entries = Vec::new();
        let mut missing = 0usize;

        for term in terms {
            let term = term.as_ref();
            match table.row_of(term) {
                Some(row) => {
                    if members.insert(row) {
                        entries.push(VocabEntry {
                            row,
                            norm: l2_norm(table.row(row)),
                        });
                    }
                }
                None => {
                    missing += 1;
                    tracing::trace!("No embedding for corpus term '{}'", term);
                }
            }
        }

        tracing::info!(
            "Vocabulary index: {} terms with embeddings ({} without)",
            entries.len(),
            missing
        );

        Self {
            table,
            entries,
            members,
        }
    }

    /// The embedding table the vocabulary is drawn from.
    pub fn table(&self) -> &EmbeddingTable {
        &self.table
    }

    /// Number of indexed terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no corpus term has an embedding.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `term` is in the vocabulary.
    pub fn contains(&self, term: &str) -> bool {
        self.get(term).is_some()
    }

    /// Embedding of a vocabulary term.
    pub fn get(&self, term: &str) -> Option<&[f32]> {
        let row = self.table.row_of(term)?;
        self.members
            .contains(&row)
            .then(|| self.table.row(row))
    }

    /// Iterate over `(term, embedding, norm)` for every vocabulary term.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32], f64)> {
        self.entries
            .iter()
            .map(|e| (self.table.term(e.row), self.table.row(e.row), e.norm))
    }
}
