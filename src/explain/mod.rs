#[cfg(feature = "explain")]
pub mod providers;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::ExplainConfig;

const SYSTEM_PROMPT: &str = "You are an expert HR analyst and recruiter. Your job is to analyze how well a candidate matches a job description and provide clear, actionable insights.";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplanationError {
    /// No provider is configured (no API key, or built without `explain`)
    #[error("explanation service not configured: {0}")]
    NotConfigured(String),
    /// Provider configured but the call failed
    #[error("explanation failed: {0}")]
    Failed(String),
}

/// One prompt ready to send to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// 文章生成バックエンド
pub trait ExplanationProvider: Send + Sync {
    /// short provider name, e.g. `openai`
    fn name(&self) -> &str;
    fn model(&self) -> &str;
    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplanationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub provider: String,
    pub model: String,
}

impl fmt::Display for ProviderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.provider, self.model)
    }
}

/// First `max_chars` characters of `s`
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

/// Prompt asking for strengths, gaps and an overall assessment of one match.
/// Both texts are cut to `max_chars` characters.
pub fn build_prompt(query: &str, document: &str, score: f64, max_chars: usize) -> String {
    let pct = score * 100.0;
    format!(
        "Analyze the match between this job description and candidate resume:\n\n\
         JOB DESCRIPTION:\n{query}\n\n\
         CANDIDATE RESUME:\n{document}\n\n\
         SIMILARITY SCORE: {pct:.1}%\n\n\
         Please provide a concise analysis (2-3 paragraphs) covering:\n\n\
         1. **Key Strengths**: What makes this candidate a good fit? Identify specific skills, experience, or qualifications that align with the job requirements.\n\n\
         2. **Potential Concerns**: What might be missing or concerning? Are there any gaps in experience or skills?\n\n\
         3. **Overall Assessment**: Based on the {pct:.1}% similarity score, provide a brief recommendation about this candidate's suitability.\n\n\
         Keep your response professional, specific, and actionable for hiring managers. Focus on concrete evidence from the resume that supports your assessment.\n",
        query = truncate_chars(query, max_chars),
        document = truncate_chars(document, max_chars),
    )
}

/// Optional natural-language explanation of a match.
///
/// Availability is a plain query; only [`Self::explain`] returns errors.
pub struct ExplanationService {
    provider: Option<Box<dyn ExplanationProvider>>,
    config: ExplainConfig,
}

impl fmt::Debug for ExplanationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplanationService")
            .field("provider", &self.provider_info())
            .field("config", &self.config)
            .finish()
    }
}

impl ExplanationService {
    /// Service without a provider
    pub fn disabled(config: ExplainConfig) -> Self {
        Self { provider: None, config }
    }

    pub fn with_provider(provider: Box<dyn ExplanationProvider>, config: ExplainConfig) -> Self {
        Self { provider: Some(provider), config }
    }

    /// Pick a provider from the environment.
    /// Priority: `GEMINI_API_KEY` > `ANTHROPIC_API_KEY` > `OPENAI_API_KEY`.
    #[cfg(feature = "explain")]
    pub fn from_env(config: ExplainConfig) -> Self {
        match providers::from_env(&config) {
            Ok(Some(provider)) => {
                tracing::info!(provider = provider.name(), model = provider.model(), "explanation provider selected");
                Self::with_provider(provider, config)
            }
            Ok(None) => {
                debug!("no explanation API key in environment");
                Self::disabled(config)
            }
            Err(e) => {
                tracing::warn!(error = %e, "explanation provider could not be built");
                Self::disabled(config)
            }
        }
    }

    #[cfg(not(feature = "explain"))]
    pub fn from_env(config: ExplainConfig) -> Self {
        debug!("built without explain support");
        Self::disabled(config)
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_info(&self) -> Option<ProviderInfo> {
        self.provider.as_ref().map(|p| ProviderInfo {
            provider: p.name().to_string(),
            model: p.model().to_string(),
        })
    }

    #[inline]
    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    pub fn request(&self, query: &str, document: &str, score: f64) -> ExplanationRequest {
        ExplanationRequest {
            system: SYSTEM_PROMPT.to_string(),
            prompt: build_prompt(query, document, score, self.config.max_chars_per_text),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    pub fn explain(&self, query: &str, document: &str, score: f64) -> Result<String, ExplanationError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            ExplanationError::NotConfigured(
                "set GEMINI_API_KEY, ANTHROPIC_API_KEY or OPENAI_API_KEY to enable explanations".to_string(),
            )
        })?;
        let text = provider.explain(&self.request(query, document, score))?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ExplanationError::Failed(format!("{} returned an empty response", provider.name())));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Stub {
        expect_in_prompt: &'static str,
        reply: Result<String, ExplanationError>,
    }

    impl ExplanationProvider for Stub {
        fn name(&self) -> &str {
            "stub"
        }
        fn model(&self) -> &str {
            "stub-1"
        }
        fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplanationError> {
            if !request.prompt.contains(self.expect_in_prompt) {
                return Err(ExplanationError::Failed("unexpected prompt".into()));
            }
            self.reply.clone()
        }
    }

    #[test]
    fn unconfigured_service_reports_not_configured() {
        let service = ExplanationService::disabled(ExplainConfig::default());
        assert!(!service.is_available());
        assert_eq!(service.provider_info(), None);
        assert!(matches!(service.explain("job", "resume", 0.5), Err(ExplanationError::NotConfigured(_))));
    }

    #[test]
    fn configured_service_forwards_prompt() {
        let provider = Stub { expect_in_prompt: "SIMILARITY SCORE: 75.6%", reply: Ok("  Strong fit.\n".into()) };
        let service = ExplanationService::with_provider(Box::new(provider), ExplainConfig::default());
        assert_eq!(
            service.provider_info(),
            Some(ProviderInfo { provider: "stub".into(), model: "stub-1".into() })
        );
        assert_eq!(service.explain("python job", "python resume", 0.756).unwrap(), "Strong fit.");
    }

    #[test]
    fn empty_reply_is_a_failure() {
        let provider = Stub { expect_in_prompt: "", reply: Ok(" ".into()) };
        let service = ExplanationService::with_provider(Box::new(provider), ExplainConfig::default());
        assert!(matches!(service.explain("a", "b", 0.1), Err(ExplanationError::Failed(_))));
    }

    #[test]
    fn prompt_truncates_texts_and_formats_score() {
        let long = "é".repeat(3000);
        let prompt = build_prompt(&long, "resume", 0.756, 2000);
        assert!(prompt.contains(&"é".repeat(2000)));
        assert!(!prompt.contains(&"é".repeat(2001)));
        assert!(prompt.contains("SIMILARITY SCORE: 75.6%"));
    }
}
