pub mod analyzer;
pub mod corpus;
pub mod stop_words;
pub mod term;
pub mod tfidf;
pub mod vector;
pub mod vocabulary;

use indexmap::IndexSet;
use num::Num;
use serde::Serialize;
use tracing::debug;

use crate::{
    config::VectorizerConfig,
    error::{Error, Result},
    vectorizer::{
        analyzer::Analyzer,
        corpus::Corpus,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        term::TermFrequency,
        vector::DocumentVector,
        vocabulary::Vocabulary,
    },
};

/// TF-IDF Vectorizer
///
/// Fits a [`Vocabulary`] on a corpus and projects documents into it.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: Vector parameter type (`f32` or `f64`)
/// - `E`: TF-IDF calculation engine type
///
/// `fit` and `encode` take `&mut self` (`encode` may fit implicitly). Once
/// fitted, `transform` only needs `&self`, so a fitted vectorizer can be
/// shared for concurrent encoding.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<N = f32, E = DefaultTFIDFEngine>
where
    N: Num + Copy + Into<f64>,
    E: TFIDFEngine<N>,
{
    config: VectorizerConfig,
    analyzer: Analyzer,
    vocabulary: Option<Vocabulary>,
    _marker: std::marker::PhantomData<(N, E)>,
}

/// Snapshot of the vectorizer state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorizerInfo {
    pub kind: &'static str,
    pub max_vocabulary_size: usize,
    pub dimension: Option<usize>,
    pub fitted: bool,
    pub generation: Option<u64>,
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Num + Copy + Into<f64>,
    E: TFIDFEngine<N>,
{
    /// Create a new unfitted vectorizer
    pub fn new(config: VectorizerConfig) -> Result<Self> {
        Ok(Self {
            analyzer: Analyzer::new(&config)?,
            config,
            vocabulary: None,
            _marker: std::marker::PhantomData,
        })
    }

    #[inline]
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    #[inline]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.vocabulary.is_some()
    }

    #[inline]
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// Vocabulary size `V`
    #[inline]
    pub fn dimension(&self) -> Option<usize> {
        self.vocabulary.as_ref().map(Vocabulary::len)
    }

    pub fn info(&self) -> VectorizerInfo {
        VectorizerInfo {
            kind: "tf-idf",
            max_vocabulary_size: self.config.max_vocabulary_size,
            dimension: self.dimension(),
            fitted: self.is_fitted(),
            generation: self.vocabulary.as_ref().map(Vocabulary::generation),
        }
    }

    /// Build the vocabulary from `corpus`, replacing any previous fit.
    /// Vectors encoded against the previous fit are no longer comparable.
    pub fn fit<T>(&mut self, corpus: &[T]) -> Result<()>
    where
        T: AsRef<str>,
    {
        if corpus.is_empty() {
            return Err(Error::empty("cannot fit on an empty corpus"));
        }
        let mut stats = Corpus::new();
        for doc in corpus {
            stats.add_doc(&self.analyzer.analyze(doc.as_ref()));
        }
        let selected = stats.select_terms(self.config.max_vocabulary_size);
        let idf = E::idf_vec(&stats, &selected);
        let terms: IndexSet<Box<str>> = selected.into_iter().map(Box::from).collect();
        let vocabulary = Vocabulary::new(terms, idf, stats.doc_num());
        debug!(
            docs = stats.doc_num(),
            distinct_terms = stats.vocab_size(),
            vocabulary = vocabulary.len(),
            generation = vocabulary.generation(),
            "vectorizer fitted"
        );
        self.vocabulary = Some(vocabulary);
        Ok(())
    }

    /// Encode one text.
    ///
    /// Fails with `EmptyInput` for blank text. An unfitted vectorizer first
    /// fits itself on this single text (degenerate one-document vocabulary).
    pub fn encode(&mut self, text: &str) -> Result<DocumentVector<N>> {
        if text.trim().is_empty() {
            return Err(Error::empty("text to encode is blank"));
        }
        if !self.is_fitted() {
            debug!("encode on unfitted vectorizer, fitting on the single document");
            self.fit(&[text])?;
        }
        self.transform(text)
    }

    /// Encode one text against the current fit without mutating the
    /// vectorizer. Unlike [`Self::encode`], an unfitted vectorizer is an
    /// `EmptyInput` error here.
    pub fn transform(&self, text: &str) -> Result<DocumentVector<N>> {
        if text.trim().is_empty() {
            return Err(Error::empty("text to encode is blank"));
        }
        let vocabulary = self.fitted_vocabulary()?;
        Ok(self.encode_with(vocabulary, text))
    }

    /// Encode many texts in one pass. Fits on the batch first when unfitted.
    pub fn encode_batch<T>(&mut self, texts: &[T]) -> Result<Vec<DocumentVector<N>>>
    where
        T: AsRef<str>,
    {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        check_batch(texts)?;
        if !self.is_fitted() {
            debug!(docs = texts.len(), "encode_batch on unfitted vectorizer, fitting on the batch");
            self.fit(texts)?;
        }
        self.transform_batch(texts)
    }

    /// Batch counterpart of [`Self::transform`]
    pub fn transform_batch<T>(&self, texts: &[T]) -> Result<Vec<DocumentVector<N>>>
    where
        T: AsRef<str>,
    {
        check_batch(texts)?;
        let vocabulary = self.fitted_vocabulary()?;
        Ok(texts
            .iter()
            .map(|t| self.encode_with(vocabulary, t.as_ref()))
            .collect())
    }

    fn fitted_vocabulary(&self) -> Result<&Vocabulary> {
        self.vocabulary
            .as_ref()
            .ok_or_else(|| Error::empty("vectorizer has no vocabulary; fit it first"))
    }

    /// Term counts of a text as seen by this vectorizer
    pub fn term_frequency(&self, text: &str) -> TermFrequency {
        self.analyzer.analyze(text)
    }

    fn encode_with(&self, vocabulary: &Vocabulary, text: &str) -> DocumentVector<N> {
        let freq = self.analyzer.analyze(text);
        let mut vec = E::tf_idf_vec(&freq, vocabulary, self.config.norm);
        vec.shrink_to_fit();
        DocumentVector::new(vec, vocabulary.generation())
    }
}

fn check_batch<T: AsRef<str>>(texts: &[T]) -> Result<()> {
    match texts.iter().position(|t| t.as_ref().trim().is_empty()) {
        Some(pos) => Err(Error::empty(format!("text at position {pos} is blank"))),
        None => Ok(()),
    }
}
