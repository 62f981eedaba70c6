//! HTTP chat backends for [`ExplanationService`](super::ExplanationService).

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{json, Value};

use super::{ExplanationError, ExplanationProvider, ExplanationRequest};
use crate::config::ExplainConfig;

pub const GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-latest";
pub const OPENAI_MODEL: &str = "gpt-4o";

const ANTHROPIC_VERSION: &str = "2023-06-01";

fn env_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn http_client(config: &ExplainConfig) -> Result<Client, ExplanationError> {
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()
        .map_err(|e| ExplanationError::Failed(format!("http client: {e}")))
}

/// 環境変数から最初に見つかったプロバイダを作る
pub fn from_env(config: &ExplainConfig) -> Result<Option<Box<dyn ExplanationProvider>>, ExplanationError> {
    if let Some(key) = env_key("GEMINI_API_KEY") {
        return Ok(Some(Box::new(GeminiProvider::new(key, config)?)));
    }
    if let Some(key) = env_key("ANTHROPIC_API_KEY") {
        return Ok(Some(Box::new(AnthropicProvider::new(key, config)?)));
    }
    if let Some(key) = env_key("OPENAI_API_KEY") {
        return Ok(Some(Box::new(OpenAIProvider::new(key, config)?)));
    }
    Ok(None)
}

/// Send a JSON request and return the JSON body of a 2xx response
fn send_json(provider: &str, request: RequestBuilder, body: &Value) -> Result<Value, ExplanationError> {
    let response = request
        .json(body)
        .send()
        .map_err(|e| ExplanationError::Failed(format!("{provider}: request failed: {e}")))?;
    let status = response.status();
    if !status.is_success() {
        let text = response.text().unwrap_or_default();
        return Err(ExplanationError::Failed(format!("{provider}: HTTP {status}: {}", text.trim())));
    }
    response
        .json::<Value>()
        .map_err(|e| ExplanationError::Failed(format!("{provider}: invalid response body: {e}")))
}

fn text_at(provider: &str, body: &Value, pointer: &str) -> Result<String, ExplanationError> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ExplanationError::Failed(format!("{provider}: response has no text at {pointer}")))
}

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, config: &ExplainConfig) -> Result<Self, ExplanationError> {
        Ok(Self { client: http_client(config)?, api_key, model: GEMINI_MODEL.to_string() })
    }

    pub fn body(request: &ExplanationRequest) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": request.system }] },
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "maxOutputTokens": request.max_tokens,
                "temperature": request.temperature,
            },
        })
    }
}

impl ExplanationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplanationError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let builder = self.client.post(url).header("x-goog-api-key", &self.api_key);
        let body = send_json(self.name(), builder, &Self::body(request))?;
        text_at(self.name(), &body, "/candidates/0/content/parts/0/text")
    }
}

#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, config: &ExplainConfig) -> Result<Self, ExplanationError> {
        Ok(Self { client: http_client(config)?, api_key, model: ANTHROPIC_MODEL.to_string() })
    }

    pub fn body(&self, request: &ExplanationRequest) -> Value {
        json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "system": request.system,
            "messages": [{ "role": "user", "content": request.prompt }],
        })
    }
}

impl ExplanationProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplanationError> {
        let builder = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);
        let body = send_json(self.name(), builder, &self.body(request))?;
        text_at(self.name(), &body, "/content/0/text")
    }
}

#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String, config: &ExplainConfig) -> Result<Self, ExplanationError> {
        Ok(Self { client: http_client(config)?, api_key, model: OPENAI_MODEL.to_string() })
    }

    pub fn body(&self, request: &ExplanationRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        })
    }
}

impl ExplanationProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplanationError> {
        let builder = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key);
        let body = send_json(self.name(), builder, &self.body(request))?;
        text_at(self.name(), &body, "/choices/0/message/content")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request() -> ExplanationRequest {
        ExplanationRequest {
            system: "sys".into(),
            prompt: "why".into(),
            max_tokens: 500,
            temperature: 0.7,
        }
    }

    #[test]
    fn request_bodies_carry_prompt_and_limits() {
        let config = ExplainConfig::default();
        let openai = OpenAIProvider::new("k".into(), &config).unwrap().body(&request());
        assert_eq!(openai["messages"][1]["content"], "why");
        assert_eq!(openai["max_tokens"], 500);

        let anthropic = AnthropicProvider::new("k".into(), &config).unwrap().body(&request());
        assert_eq!(anthropic["system"], "sys");
        assert_eq!(anthropic["messages"][0]["role"], "user");

        let gemini = GeminiProvider::body(&request());
        assert_eq!(gemini["contents"][0]["parts"][0]["text"], "why");
        assert_eq!(gemini["generationConfig"]["maxOutputTokens"], 500);
    }

    #[test]
    fn response_text_is_read_by_pointer() {
        let body = json!({ "choices": [{ "message": { "content": "fit" } }] });
        assert_eq!(text_at("openai", &body, "/choices/0/message/content").unwrap(), "fit");
        assert!(matches!(text_at("openai", &body, "/content/0/text"), Err(ExplanationError::Failed(_))));
    }
}
