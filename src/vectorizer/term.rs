use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TermFrequency struct
/// Manages the frequency of term occurrences in one document.
/// Terms keep their first-seen order.
///
/// # Examples
/// ```
/// use tfidf_matcher::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("rust");
/// term_freq.add_term("tokio");
/// term_freq.add_term("rust");
///
/// assert_eq!(term_freq.term_count("rust"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Add a term
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Occurrence count of a term (0 when absent)
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of term occurrences
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn distinct_len(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// (term, count) in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Distinct terms in first-seen order
    #[inline]
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(String::as_str).collect()
    }

    /// Most frequent terms, count descending then lexicographic
    pub fn sorted_frequency_vector(&self) -> Vec<(&str, u64)> {
        let mut list: Vec<(&str, u64)> = self.iter().collect();
        list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        list
    }

    #[inline]
    pub fn clear(&mut self) {
        self.term_count.clear();
        self.total_term_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_and_sum_track_additions() {
        let mut freq = TermFrequency::new();
        freq.add_terms(&["aws", "python", "aws"]);
        assert_eq!(freq.term_count("aws"), 2);
        assert_eq!(freq.term_count("go"), 0);
        assert_eq!(freq.term_sum(), 3);
        assert_eq!(freq.distinct_len(), 2);
        assert_eq!(freq.term_set_ref_str(), vec!["aws", "python"]);
    }

    #[test]
    fn sorted_frequency_breaks_ties_lexicographically() {
        let mut freq = TermFrequency::new();
        freq.add_terms(&["zeta", "alpha", "beta", "beta"]);
        assert_eq!(
            freq.sorted_frequency_vector(),
            vec![("beta", 2), ("alpha", 1), ("zeta", 1)]
        );
    }

    #[test]
    fn clear_resets() {
        let mut freq = TermFrequency::new();
        freq.add_term("x1");
        freq.clear();
        assert!(freq.is_empty());
        assert_eq!(freq.term_sum(), 0);
    }
}
