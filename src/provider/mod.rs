//! # Provider Abstraction Layer
//!
//! Trait and implementations for text-generation backends.
//!
//! ## Overview
//!
//! - [`Provider`] - Core trait for executing prompts
//! - [`GroqProvider`] - Groq's OpenAI-compatible chat completions API
//! - [`MockProvider`] - Test provider with configurable responses
//!
//! The comic pipeline only needs one thing from a provider: a prompt goes
//! in, a single string of script text comes out (or the call fails).
//!
//! ## Creating Providers
//!
//! Use [`create_provider`] to instantiate a provider by name:
//!
//! ```rust
//! use groqtales::provider::create_provider;
//!
//! let mock = create_provider("mock");
//! assert!(mock.is_ok());
//!
//! let unknown = create_provider("invalid");
//! assert!(unknown.is_err());
//! ```

mod groq;
mod mock;

pub use groq::{GroqProvider, DEFAULT_GROQ_MODEL};
pub use mock::MockProvider;

use anyhow::Result;
use async_trait::async_trait;

use crate::error::TalesError;

/// Average characters per token for English prose
const CHARS_PER_TOKEN: f32 = 3.5;

// ============================================================================
// PROVIDER TRAIT (ASYNC)
// ============================================================================

/// Core trait that all text-generation providers must implement
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the provider name (e.g., "groq", "mock")
    fn name(&self) -> &str;

    /// Execute a prompt and return the response
    ///
    /// Transport failures are `Err`; an API that answered with an error is
    /// `Ok(PromptResponse::failure(..))`.
    async fn execute(&self, request: PromptRequest) -> Result<PromptResponse>;

    /// Check if this provider is available (e.g., API key set)
    fn is_available(&self) -> bool {
        true
    }
}

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

/// Request to execute a prompt
#[derive(Debug, Clone)]
pub struct PromptRequest {
    /// The user prompt
    pub prompt: String,

    /// Optional system prompt to set context
    pub system_prompt: Option<String>,

    /// Model identifier; empty means the provider's default
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0)
    pub temperature: Option<f32>,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from a prompt execution
#[derive(Debug, Clone)]
pub struct PromptResponse {
    /// The generated content, or the error text when `success` is false
    pub content: String,

    pub success: bool,

    pub usage: TokenUsage,
}

impl PromptResponse {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
            usage: TokenUsage::default(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            content: error.into(),
            success: false,
            usage: TokenUsage::default(),
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt: u32, completion: u32) -> Self {
        Self {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: prompt.saturating_add(completion),
        }
    }

    /// Estimate usage from character counts when the API reports none
    pub fn estimate(prompt_len: usize, response_len: usize) -> Self {
        let prompt_tokens = (prompt_len as f32 / CHARS_PER_TOKEN).ceil() as u32;
        let completion_tokens = (response_len as f32 / CHARS_PER_TOKEN).ceil() as u32;
        Self::new(prompt_tokens, completion_tokens)
    }
}

// ============================================================================
// PROVIDER FACTORY
// ============================================================================

/// Create a provider instance by name
///
/// | Name | Description | Requires |
/// |------|-------------|----------|
/// | `groq` | Groq API | `GROQ_API_KEY` env var |
/// | `mock` | Testing | Nothing |
pub fn create_provider(name: &str) -> Result<Box<dyn Provider>, TalesError> {
    match name.to_lowercase().as_str() {
        "groq" => {
            let provider =
                GroqProvider::new().map_err(|e| TalesError::provider("groq", format!("{e:#}")))?;
            Ok(Box::new(provider))
        }
        "mock" => Ok(Box::new(MockProvider::new())),
        _ => Err(TalesError::UnknownProvider {
            name: name.to_string(),
        }),
    }
}
