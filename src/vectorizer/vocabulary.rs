use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexSet;
use serde::Serialize;

/// fit ごとに一意な世代番号
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Fitted term space
///
/// Ordered, deduplicated `term -> index` mapping with one IDF weight per
/// index. Immutable once built; a refit produces a new `Vocabulary` with a new
/// generation.
#[derive(Debug, Clone, Serialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
    idf: Vec<f64>,
    doc_num: u64,
    generation: u64,
}

impl Vocabulary {
    pub(crate) fn new(terms: IndexSet<Box<str>>, idf: Vec<f64>, doc_num: u64) -> Self {
        debug_assert_eq!(terms.len(), idf.len());
        Self {
            terms,
            idf,
            doc_num,
            generation: next_generation(),
        }
    }

    /// V
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| t.as_ref())
    }

    #[inline]
    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    #[inline]
    pub fn idf_vec(&self) -> &[f64] {
        &self.idf
    }

    /// Terms in index order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_ref())
    }

    /// Number of documents the vocabulary was fitted on
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_vocabulary_gets_its_own_generation() {
        let a = Vocabulary::new(IndexSet::new(), Vec::new(), 0);
        let b = Vocabulary::new(IndexSet::new(), Vec::new(), 0);
        assert_ne!(a.generation(), b.generation());
    }

    #[test]
    fn lookups_follow_insertion_order() {
        let terms: IndexSet<Box<str>> = ["aws", "python"].into_iter().map(Box::from).collect();
        let vocab = Vocabulary::new(terms, vec![1.5, 2.0], 2);
        assert_eq!(vocab.index_of("python"), Some(1));
        assert_eq!(vocab.term(0), Some("aws"));
        assert_eq!(vocab.idf(1), Some(2.0));
        assert_eq!(vocab.idf(2), None);
    }
}
