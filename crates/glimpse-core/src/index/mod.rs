//! Indexes derived from the tag cache.
//!
//! Both are built once at startup and never mutated:
//! - [`Concordance`]: term → images tagged with it (inverted tag cache)
//! - [`VocabularyIndex`]: the embedding table restricted to corpus terms

pub mod concordance;
pub mod vocabulary;

pub use concordance::Concordance;
pub use vocabulary::VocabularyIndex;
