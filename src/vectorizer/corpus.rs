use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// Per-term statistics over the fitted corpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStats {
    /// number of documents containing the term
    pub doc_freq: u64,
    /// occurrences across all documents
    pub total_count: u64,
}

/// keep document count and term statistics for one fit
///
/// It does not store document text; it only manages:
/// - The number of documents (empty ones included)
/// - Document frequency and total occurrence count of each term
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    doc_num: u64,
    #[serde(with = "indexmap::map::serde_seq")]
    term_stats: IndexMap<Box<str>, TermStats>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document's term counts to the corpus
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for (term, count) in freq.iter() {
            if let Some(stats) = self.term_stats.get_mut(term) {
                stats.doc_freq += 1;
                stats.total_count += count;
            } else {
                self.term_stats.insert(term.into(), TermStats { doc_freq: 1, total_count: count });
            }
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the document frequency of a term
    #[inline]
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.term_stats.get(term).map_or(0, |s| s.doc_freq)
    }

    #[inline]
    pub fn stats(&self, term: &str) -> Option<TermStats> {
        self.term_stats.get(term).copied()
    }

    /// Number of distinct terms seen
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_stats.len()
    }

    /// Terms kept for the vocabulary:
    /// rank by total occurrence count (desc), ties lexicographic (asc),
    /// keep `max_size`, then return them in lexicographic order.
    pub fn select_terms(&self, max_size: usize) -> Vec<&str> {
        let mut ranked: Vec<(&str, u64)> = self
            .term_stats
            .iter()
            .map(|(term, stats)| (term.as_ref(), stats.total_count))
            .collect();
        if ranked.len() > max_size {
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(max_size);
        }
        let mut terms: Vec<&str> = ranked.into_iter().map(|(t, _)| t).collect();
        terms.sort_unstable();
        terms
    }
}
