/// This crate matches free-text documents (résumés) against a query text (a job
/// description) with a TF-IDF vectorizer and cosine-similarity ranking.
pub mod config;
pub mod error;
pub mod explain;
pub mod export;
pub mod pipeline;
pub mod ranker;
pub mod source;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Vectorizer
/// The core struct of this crate. It fits a vocabulary on a corpus and turns
/// texts into TF-IDF vectors of the vocabulary's length.
///
/// Text analysis (in order):
/// - whitespace normalization and truncation to a word budget
/// - lowercasing and accent stripping
/// - word splitting, English stop-word removal
/// - 1- and 2-grams
///
/// Weights are raw term count times smoothed IDF, `ln((1 + n) / (1 + df)) + 1`.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: Vector parameter type (f32, f64)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// Refitting replaces the vocabulary. Vectors from an older fit carry a
/// different generation and are rejected by the ranker.
pub use vectorizer::TFIDFVectorizer;

/// Fitted vocabulary
/// Term to index mapping plus the IDF of each term.
/// Indices follow lexicographic term order.
pub use vectorizer::vocabulary::Vocabulary;

/// Document vector
/// A sparse TF-IDF vector tagged with the fit generation it came from.
pub use vectorizer::vector::DocumentVector;

/// Corpus statistics
/// Number of documents, plus document frequency and total count per term.
/// Base data for vocabulary selection and IDF.
pub use vectorizer::corpus::Corpus;

/// Term Frequency structure
/// A struct for counting term occurrences within a document.
/// It manages:
/// - The count of occurrences of each term
/// - The total number of terms in the document
pub use vectorizer::term::TermFrequency;

/// TF IDF Calculation Engine Trait
/// Defines how IDF and TF-IDF vectors are computed.
///
/// A default implementation, `DefaultTFIDFEngine`, is provided for:
/// - f32
/// - f64
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Ranking
/// - `score`: cosine similarity of a query against candidates, clipped to [0, 1]
/// - `rank`: stable descending sort truncated to top-K
/// - `pairwise_similarity`: full similarity matrix
pub use ranker::{pairwise_similarity, rank, score, HitEntry, Hits};

/// Score statistics, min-max normalization and match categories
pub use ranker::stats::{normalize_similarities, similarity_statistics, MatchCategory, SimilarityStatistics};

pub use config::{ExplainConfig, MatcherConfig, Norm, RankerConfig, SourceConfig, VectorizerConfig};
pub use error::{Error, Result};
pub use pipeline::{Candidate, Explanation, MatchPipeline, MatchReport, RankedCandidate};
