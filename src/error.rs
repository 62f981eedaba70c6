use crate::explain::ExplanationError;
use crate::source::ExtractionError;

/// Errors raised by the matcher.
///
/// `Config`, `EmptyInput` and `DimensionMismatch` are precondition failures of
/// the vectorizer and ranker and always reach the caller unchanged.
/// `Extraction` and `ExplanationUnavailable` come from the collaborators around
/// the core and are normally handled per document by the caller.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("empty input: {0}")]
    EmptyInput(String),
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("vector space mismatch: vectors come from fit generation {expected} and {found}")]
    GenerationMismatch { expected: u64, found: u64 },
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    ExplanationUnavailable(#[from] ExplanationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub(crate) fn empty(msg: impl Into<String>) -> Self {
        Error::EmptyInput(msg.into())
    }

    /// Both length and fit-generation mismatches mean the vectors are not from
    /// the same vocabulary space.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Error::DimensionMismatch { .. } | Error::GenerationMismatch { .. })
    }
}
