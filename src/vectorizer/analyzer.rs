use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::VectorizerConfig;
use crate::error::Result;
use crate::vectorizer::stop_words::is_stop_word;
use crate::vectorizer::term::TermFrequency;

/// Text -> term pipeline
///
/// 1. trim / collapse whitespace / truncate to `max_tokens_per_document` words
/// 2. lowercase, strip accents (NFKD + combining mark removal)
/// 3. split on Unicode word boundaries, then on non word characters
/// 4. drop words shorter than 2 chars and stop words
/// 5. join contiguous words into n-grams
#[derive(Debug, Clone)]
pub struct Analyzer {
    ngram_range: (usize, usize),
    stop_words: bool,
    case_folding: bool,
    accent_stripping: bool,
    max_tokens_per_document: usize,
}

impl Analyzer {
    /// Rejects configs that `VectorizerConfig::validate` rejects
    pub fn new(config: &VectorizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ngram_range: config.ngram_range,
            stop_words: config.stop_words,
            case_folding: config.case_folding,
            accent_stripping: config.accent_stripping,
            max_tokens_per_document: config.max_tokens_per_document,
        })
    }

    /// Whitespace cleanup and truncation
    pub fn preprocess(&self, text: &str) -> String {
        let words: Vec<&str> = text
            .split_whitespace()
            .take(self.max_tokens_per_document)
            .collect();
        words.join(" ")
    }

    fn normalize(&self, text: &str) -> String {
        let text = if self.case_folding {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        if self.accent_stripping {
            text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
        } else {
            text
        }
    }

    /// Words surviving normalization and stop-word removal
    pub fn words(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize(&self.preprocess(text));
        normalized
            .unicode_words()
            .flat_map(|w| w.split(|c: char| !(c.is_alphanumeric() || c == '_')))
            .filter(|w| w.chars().count() >= 2)
            .filter(|w| !(self.stop_words && is_stop_word(w)))
            .map(str::to_string)
            .collect()
    }

    /// All terms (unigrams ... n-grams) of a text, in document order
    pub fn terms(&self, text: &str) -> Vec<String> {
        let words = self.words(text);
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > words.len() {
                break;
            }
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Term counts of a text
    pub fn analyze(&self, text: &str) -> TermFrequency {
        let mut freq = TermFrequency::new();
        freq.add_terms(&self.terms(text));
        freq
    }
}
