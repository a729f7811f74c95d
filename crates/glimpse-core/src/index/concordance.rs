//! Inverted tag index: term → images carrying that tag.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::cache::TagCache;
use crate::types::ScoredRef;

/// Term → scored image references, inverted from the tag cache.
///
/// Each term's references are kept in cache iteration order, which carries
/// no ranking meaning; use [`Concordance::top`] for ranked lookups.
#[derive(Debug, Clone, Default)]
pub struct Concordance {
    entries: HashMap<String, Vec<ScoredRef>>,
}

impl Concordance {
    /// Invert the tag cache.
    ///
    /// Every `(term, score)` on every image appends `(image, score)` to that
    /// term's references. Repeated image/term pairs are not deduplicated.
    pub fn build(cache: &TagCache) -> Self {
        let mut entries: HashMap<String, Vec<ScoredRef>> = HashMap::new();
        for (image, tags) in cache.iter() {
            for tag in tags {
                entries
                    .entry(tag.term.clone())
                    .or_default()
                    .push(ScoredRef::new(image, tag.score));
            }
        }

        tracing::info!(
            "Concordance built: {} terms over {} images",
            entries.len(),
            cache.len()
        );
        Self { entries }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no image has any tag.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unranked references for `term`.
    pub fn get(&self, term: &str) -> Option<&[ScoredRef]> {
        self.entries.get(term).map(Vec::as_slice)
    }

    /// Every indexed term, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The `limit` highest-scoring references for `term`, best first.
    ///
    /// Returns an empty vec when no image carries the term.
    pub fn top(&self, term: &str, limit: usize) -> Vec<ScoredRef> {
        self.get(term)
            .map(|refs| rank(refs, limit))
            .unwrap_or_default()
    }
}

/// Descending score, then ascending image reference for equal scores.
fn by_score_desc(a: &ScoredRef, b: &ScoredRef) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.image.cmp(&b.image))
}

/// Select and order the `limit` best references without sorting the rest.
fn rank(refs: &[ScoredRef], limit: usize) -> Vec<ScoredRef> {
    if limit == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<&ScoredRef> = refs.iter().collect();
    if ranked.len() > limit {
        ranked.select_nth_unstable_by(limit - 1, |a, b| by_score_desc(a, b));
        ranked.truncate(limit);
    }
    ranked.sort_by(|a, b| by_score_desc(a, b));
    ranked.into_iter().cloned().collect()
}
