//! Groq provider
//!
//! Executes prompts via Groq's OpenAI-compatible Chat Completions API.
//! Requires `GROQ_API_KEY` environment variable.

use super::{PromptRequest, PromptResponse, Provider, TokenUsage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Groq API endpoint
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Model used when neither the request nor the provider names one
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqProvider {
    /// Create a new Groq provider
    ///
    /// Reads `GROQ_API_KEY` from environment.
    pub fn new() -> Result<Self> {
        let api_key =
            std::env::var("GROQ_API_KEY").context("GROQ_API_KEY environment variable not set")?;
        Ok(Self::with_api_key(api_key))
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_GROQ_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_messages(&self, request: &PromptRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);

        if let Some(ref system) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }

        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        messages
    }
}

#[async_trait]
impl Provider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn execute(&self, request: PromptRequest) -> Result<PromptResponse> {
        let payload = ChatCompletionRequest {
            model: if request.model.is_empty() {
                self.model.clone()
            } else {
                request.model.clone()
            },
            messages: self.build_messages(&request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            provider = "groq",
            model = %payload.model,
            prompt_len = request.prompt.len(),
            "Sending request to Groq API"
        );

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to Groq API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                provider = "groq",
                status = %status,
                error = %error_text,
                "Groq API error"
            );
            return Ok(PromptResponse::failure(format!(
                "Groq API error ({}): {}",
                status, error_text
            )));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse Groq API response")?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        let usage = match api_response.usage {
            Some(u) => TokenUsage::new(u.prompt_tokens, u.completion_tokens),
            None => TokenUsage::estimate(request.prompt.len(), content.len()),
        };

        tracing::debug!(
            provider = "groq",
            tokens = usage.total_tokens,
            "Groq API response received"
        );

        Ok(PromptResponse::success(content).with_usage(usage))
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_provider_name() {
        let provider = GroqProvider::with_api_key("test-key");
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.model, DEFAULT_GROQ_MODEL);

        let provider = provider.with_model("mixtral-8x7b-32768");
        assert_eq!(provider.model, "mixtral-8x7b-32768");
    }

    #[test]
    fn test_build_messages_with_system() {
        let provider = GroqProvider::with_api_key("test-key");
        let request = PromptRequest::new("Write panels", "").with_system_prompt("You write comics");

        let messages = provider.build_messages(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "Write panels");
    }

    #[test]
    fn test_payload_skips_unset_options() {
        let payload = ChatCompletionRequest {
            model: "m".into(),
            messages: vec![],
            max_tokens: None,
            temperature: Some(0.5),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn test_response_with_null_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
        assert!(parsed.usage.is_none());
    }

    #[test]
    fn test_is_available() {
        assert!(GroqProvider::with_api_key("k").is_available());
        assert!(!GroqProvider::with_api_key("").is_available());
    }
}
