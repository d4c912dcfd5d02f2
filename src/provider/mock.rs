//! Mock provider for testing
//!
//! Returns configurable responses without making real API calls.

use super::{PromptRequest, PromptResponse, Provider, TokenUsage};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock provider that returns predefined responses
pub struct MockProvider {
    /// Queue of responses to return (FIFO)
    responses: Arc<Mutex<VecDeque<String>>>,
    /// Default response when queue is empty
    default_response: String,
    /// When set, every call returns a failed response with this message
    failure: Option<String>,
    /// Track all requests made (for assertions)
    requests: Arc<Mutex<Vec<PromptRequest>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_response: "Mock response".to_string(),
            failure: None,
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Create with a queue of responses
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            ..Self::new()
        }
    }

    /// Set the default response when queue is empty
    pub fn with_default(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Make every call fail with `message`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn queue_response(&self, response: impl Into<String>) {
        lock(&self.responses).push_back(response.into());
    }

    /// Get all requests made to this provider
    pub fn get_requests(&self) -> Vec<PromptRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<PromptRequest> {
        lock(&self.requests).last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// A poisoned lock only means another test thread panicked; the data is still usable
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn execute(&self, request: PromptRequest) -> Result<PromptResponse> {
        lock(&self.requests).push(request.clone());

        if let Some(message) = &self.failure {
            return Ok(PromptResponse::failure(message.clone()));
        }

        let response_text = lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());

        let usage = TokenUsage::estimate(request.prompt.len(), response_text.len());
        Ok(PromptResponse::success(response_text).with_usage(usage))
    }
}
