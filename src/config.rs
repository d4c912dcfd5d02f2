//! Generator configuration
//!
//! Precedence, lowest first: built-in defaults, YAML config file,
//! `GROQTALES_*` environment variables, CLI flags.

use std::path::Path;

use serde::Deserialize;

use crate::error::TalesError;
use crate::normalize::{PanelLimits, MAX_PANELS, MIN_PANELS};
use crate::provider::DEFAULT_GROQ_MODEL;

pub const ENV_PROVIDER: &str = "GROQTALES_PROVIDER";
pub const ENV_MODEL: &str = "GROQTALES_MODEL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub min_panels: usize,
    pub max_panels: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            min_panels: MIN_PANELS,
            max_panels: MAX_PANELS,
        }
    }
}

impl GeneratorConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, TalesError> {
        let config: GeneratorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TalesError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Self::from_yaml(&yaml)
    }

    /// Apply `GROQTALES_PROVIDER` / `GROQTALES_MODEL` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(provider) = lookup(ENV_PROVIDER).filter(|v| !v.is_empty()) {
            self.provider = provider;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.is_empty()) {
            self.model = model;
        }
        self
    }

    pub fn validate(&self) -> Result<(), TalesError> {
        self.panel_limits()?;
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(TalesError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(TalesError::Config("max_tokens must be positive".to_string()));
        }
        if self.provider.trim().is_empty() {
            return Err(TalesError::Config("provider must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn panel_limits(&self) -> Result<PanelLimits, TalesError> {
        PanelLimits::new(self.min_panels, self.max_panels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.provider, "groq");
        assert_eq!(config.model, DEFAULT_GROQ_MODEL);
        assert_eq!(config.panel_limits().unwrap(), PanelLimits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = GeneratorConfig::from_yaml("model: llama-3.1-8b-instant\nmax_panels: 12").unwrap();
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.max_panels, 12);
        assert_eq!(config.min_panels, MIN_PANELS);
        assert_eq!(config.provider, "groq");
    }

    #[test]
    fn unknown_field_rejected() {
        let err = GeneratorConfig::from_yaml("modle: typo").unwrap_err();
        assert!(matches!(err, TalesError::Yaml(_)));
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(matches!(
            GeneratorConfig::from_yaml("min_panels: 9\nmax_panels: 4"),
            Err(TalesError::InvalidPanelLimits { min: 9, max: 4 })
        ));
        assert!(matches!(
            GeneratorConfig::from_yaml("temperature: 3.5"),
            Err(TalesError::Config(_))
        ));
    }

    #[test]
    fn overrides_apply_when_set() {
        let config = GeneratorConfig::default().with_overrides_from(|key| match key {
            ENV_PROVIDER => Some("mock".to_string()),
            ENV_MODEL => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.provider, "mock");
        assert_eq!(config.model, DEFAULT_GROQ_MODEL);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groqtales.yaml");
        std::fs::write(&path, "provider: mock\ntemperature: 0.2\n").unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.provider, "mock");
        assert_eq!(config.temperature, 0.2);
    }
}
