use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    config::MatcherConfig,
    error::{Error, Result},
    explain::{ExplanationService, ProviderInfo},
    ranker::{
        self,
        stats::{similarity_statistics, MatchCategory, SimilarityStatistics},
    },
    source::Document,
    vectorizer::{TFIDFVectorizer, VectorizerInfo},
};

/// One document to score against the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub name: String,
    pub text: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}

impl From<Document> for Candidate {
    fn from(doc: Document) -> Self {
        Self { name: doc.name, text: doc.text }
    }
}

/// Outcome of the explanation step for one ranked candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Explanation {
    Generated(String),
    /// requested but the service could not produce one
    Unavailable(String),
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub name: String,
    pub score: f64,
    pub category: MatchCategory,
    /// position in the candidate list given to [`MatchPipeline::run`]
    pub input_index: usize,
    pub explanation: Explanation,
}

/// Result of one matching request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub ranked: Vec<RankedCandidate>,
    /// over every candidate, not only the returned top-K
    pub statistics: Option<SimilarityStatistics>,
    pub total_analyzed: usize,
    pub top_k: usize,
    pub average_top_score: f64,
    pub best_score: f64,
    pub vectorizer: VectorizerInfo,
    pub explanation_provider: Option<ProviderInfo>,
}

/// Query vs. candidates matching flow.
///
/// Every call builds a fresh vectorizer fitted on `[query] + candidates`, so
/// requests never share a vocabulary.
#[derive(Debug)]
pub struct MatchPipeline {
    config: MatcherConfig,
    explainer: ExplanationService,
}

impl MatchPipeline {
    pub fn new(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        let explainer = ExplanationService::disabled(config.explain.clone());
        Ok(Self { config, explainer })
    }

    pub fn with_explainer(mut self, explainer: ExplanationService) -> Self {
        self.explainer = explainer;
        self
    }

    #[inline]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    #[inline]
    pub fn explainer(&self) -> &ExplanationService {
        &self.explainer
    }

    /// Score every candidate against `query` and return the best `top_k`.
    ///
    /// `top_k` is clamped into the configured range (default when `None`).
    /// A blank query, an empty candidate list or a blank candidate is an
    /// `EmptyInput` error. Explanation failures never fail the report.
    pub fn run(&self, query: &str, candidates: &[Candidate], top_k: Option<usize>) -> Result<MatchReport> {
        if query.trim().is_empty() {
            return Err(Error::empty("query text is blank"));
        }
        if candidates.is_empty() {
            return Err(Error::empty("no candidates to match"));
        }
        if let Some(c) = candidates.iter().find(|c| c.text.trim().is_empty()) {
            return Err(Error::empty(format!("candidate `{}` has no text", c.name)));
        }
        let top_k = self.config.ranker.clamp_top_k(top_k);

        let corpus: Vec<&str> = std::iter::once(query)
            .chain(candidates.iter().map(|c| c.text.as_str()))
            .collect();
        let mut vectorizer: TFIDFVectorizer<f32> = TFIDFVectorizer::new(self.config.vectorizer.clone())?;
        vectorizer.fit(&corpus)?;
        let vectors = vectorizer.transform_batch(&corpus)?;
        let (query_vec, candidate_vecs) = vectors
            .split_first()
            .ok_or_else(|| Error::empty("nothing was encoded"))?;
        let scores = ranker::score(query_vec, candidate_vecs)?;
        debug!(dimension = query_vec.len(), candidates = scores.len(), "candidates scored");

        let statistics = similarity_statistics(&scores);
        let hits = ranker::rank(scores.iter().copied().enumerate(), top_k);

        let ranked: Vec<RankedCandidate> = hits
            .into_iter()
            .map(|hit| {
                let candidate = &candidates[hit.key];
                RankedCandidate {
                    rank: hit.rank,
                    name: candidate.name.clone(),
                    score: hit.score,
                    category: MatchCategory::from_score(hit.score),
                    input_index: hit.key,
                    explanation: self.explanation_for(query, candidate, hit.score),
                }
            })
            .collect();

        let average_top_score = if ranked.is_empty() {
            0.0
        } else {
            ranked.iter().map(|r| r.score).sum::<f64>() / ranked.len() as f64
        };
        let best_score = ranked.first().map(|r| r.score).unwrap_or(0.0);
        info!(
            analyzed = candidates.len(),
            returned = ranked.len(),
            best = best_score,
            "matching finished"
        );

        Ok(MatchReport {
            ranked,
            statistics,
            total_analyzed: candidates.len(),
            top_k,
            average_top_score,
            best_score,
            vectorizer: vectorizer.info(),
            explanation_provider: self.explainer.provider_info(),
        })
    }

    fn explanation_for(&self, query: &str, candidate: &Candidate, score: f64) -> Explanation {
        if !self.config.explain.enabled {
            return Explanation::Disabled;
        }
        match self.explainer.explain(query, &candidate.text, score) {
            Ok(text) => Explanation::Generated(text),
            Err(e) => {
                warn!(candidate = %candidate.name, error = %e, "explanation unavailable");
                Explanation::Unavailable(e.to_string())
            }
        }
    }
}
