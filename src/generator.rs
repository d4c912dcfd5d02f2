//! Comic generation pipeline
//!
//! prompt -> provider -> title + panels -> normalized [`ParsedComic`].
//! Provider failures surface here; the parser only ever sees text the
//! provider actually produced.

use std::time::Instant;

use crate::comic::ParsedComic;
use crate::config::GeneratorConfig;
use crate::error::TalesError;
use crate::normalize::{normalize_with, PanelLimits};
use crate::parser::{extract_title, parse_panels};
use crate::prompt::{build_comic_prompt_with, StoryRequest, SYSTEM_PROMPT};
use crate::provider::{PromptRequest, Provider};

pub struct ComicGenerator {
    provider: Box<dyn Provider>,
    config: GeneratorConfig,
    limits: PanelLimits,
}

impl ComicGenerator {
    pub fn new(provider: Box<dyn Provider>, config: GeneratorConfig) -> Result<Self, TalesError> {
        config.validate()?;
        let limits = config.panel_limits()?;
        Ok(Self {
            provider,
            config,
            limits,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a script for `request` and parse it into a comic
    pub async fn generate(&self, request: &StoryRequest) -> Result<ParsedComic, TalesError> {
        let prompt = build_comic_prompt_with(request, &self.limits)?;
        let script = self.generate_script(prompt).await?;

        let title = extract_title(&script, request.title.as_deref());
        let panels = normalize_with(parse_panels(&script), &self.limits);

        tracing::info!(
            title = %title,
            panels = panels.len(),
            "Comic generated"
        );

        Ok(ParsedComic { title, panels })
    }

    /// Run the provider and return the raw script text
    pub async fn generate_script(&self, prompt: String) -> Result<String, TalesError> {
        let provider_name = self.provider.name().to_string();
        if !self.provider.is_available() {
            return Err(TalesError::provider(provider_name, "provider is not available"));
        }

        let request = PromptRequest::new(prompt, self.config.model.clone())
            .with_system_prompt(SYSTEM_PROMPT)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        tracing::info!(
            provider = %provider_name,
            model = %self.config.model,
            "Requesting comic script"
        );
        let start = Instant::now();

        let response = self
            .provider
            .execute(request)
            .await
            .map_err(|e| TalesError::provider(&provider_name, format!("{e:#}")))?;

        if !response.success {
            return Err(TalesError::provider(provider_name, response.content));
        }
        if response.content.trim().is_empty() {
            return Err(TalesError::provider(provider_name, "empty response"));
        }

        tracing::debug!(
            provider = %provider_name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            tokens = response.usage.total_tokens,
            chars = response.content.len(),
            "Script received"
        );

        Ok(response.content)
    }
}
