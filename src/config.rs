use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Vector normalization applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    /// Raw `tf * idf` weights.
    #[default]
    None,
    /// Scale every vector to unit Euclidean length.
    L2,
}

/// Vectorizer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Keep at most this many terms, ranked by corpus occurrence count.
    pub max_vocabulary_size: usize,
    /// Inclusive span of n-gram lengths.
    pub ngram_range: (usize, usize),
    /// Drop English function words before forming n-grams.
    pub stop_words: bool,
    pub case_folding: bool,
    pub accent_stripping: bool,
    /// Documents are cut to this many whitespace-separated words.
    pub max_tokens_per_document: usize,
    pub norm: Norm,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_vocabulary_size: 5000,
            ngram_range: (1, 2),
            stop_words: true,
            case_folding: true,
            accent_stripping: true,
            max_tokens_per_document: 512,
            norm: Norm::None,
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_vocabulary_size == 0 {
            return Err(Error::config("max_vocabulary_size must be positive"));
        }
        if self.max_tokens_per_document == 0 {
            return Err(Error::config("max_tokens_per_document must be positive"));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::config(format!(
                "invalid ngram_range ({min_n}, {max_n}): need 1 <= min <= max"
            )));
        }
        Ok(())
    }
}

/// Top-K bounds for the ranking surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub min_top_k: usize,
    pub max_top_k: usize,
    pub default_top_k: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            min_top_k: 5,
            max_top_k: 10,
            default_top_k: 10,
        }
    }
}

impl RankerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_top_k == 0 || self.min_top_k > self.max_top_k {
            return Err(Error::config(format!(
                "invalid top_k bounds [{}, {}]",
                self.min_top_k, self.max_top_k
            )));
        }
        if !(self.min_top_k..=self.max_top_k).contains(&self.default_top_k) {
            return Err(Error::config(format!(
                "default_top_k {} outside [{}, {}]",
                self.default_top_k, self.min_top_k, self.max_top_k
            )));
        }
        Ok(())
    }

    /// Clamp a requested `top_k` into the configured bounds.
    pub fn clamp_top_k(&self, requested: Option<usize>) -> usize {
        let Some(k) = requested else {
            return self.default_top_k;
        };
        let clamped = k.clamp(self.min_top_k, self.max_top_k);
        if clamped != k {
            tracing::warn!(requested = k, clamped, "top_k outside configured range");
        }
        clamped
    }
}

/// Explanation service options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    pub enabled: bool,
    pub timeout_ms: u64,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Characters of each text sent to the provider.
    pub max_chars_per_text: usize,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: 30_000,
            max_tokens: 500,
            temperature: 0.7,
            max_chars_per_text: 2000,
        }
    }
}

/// Document source options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub max_file_size_mb: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { max_file_size_mb: 10 }
    }
}

/// Whole-application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub vectorizer: VectorizerConfig,
    pub ranker: RankerConfig,
    pub explain: ExplainConfig,
    pub source: SourceConfig,
}

impl MatcherConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: MatcherConfig =
            toml::from_str(s).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.ranker.validate()
    }
}
