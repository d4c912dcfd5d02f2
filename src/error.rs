//! Error types with fix suggestions
//!
//! Script parsing never fails; these errors come from the layers around it
//! (config loading, prompt building, the text-generation provider, I/O).

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum TalesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Generation errors (GT-010 to GT-012)
    // ─────────────────────────────────────────────────────────────
    #[error("GT-010: Provider '{provider}' failed: {details}")]
    Provider { provider: String, details: String },

    #[error("GT-011: Unknown provider '{name}'")]
    UnknownProvider { name: String },

    #[error("GT-012: Story idea is empty")]
    EmptyIdea,

    // ─────────────────────────────────────────────────────────────
    // Configuration errors (GT-020 to GT-021)
    // ─────────────────────────────────────────────────────────────
    #[error("GT-020: Invalid config: {0}")]
    Config(String),

    #[error("GT-021: Invalid panel limits: min={min}, max={max}")]
    InvalidPanelLimits { min: usize, max: usize },
}

impl TalesError {
    pub fn provider(provider: impl Into<String>, details: impl Into<String>) -> Self {
        TalesError::Provider {
            provider: provider.into(),
            details: details.into(),
        }
    }
}

impl FixSuggestion for TalesError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            TalesError::Io(_) => Some("Check file path and permissions"),
            TalesError::Yaml(_) => Some("Check YAML syntax: indentation and quoting"),
            TalesError::Json(_) => None,
            TalesError::Provider { .. } => {
                Some("Check GROQ_API_KEY is set and the model name is valid")
            }
            TalesError::UnknownProvider { .. } => Some("Available providers: groq, mock"),
            TalesError::EmptyIdea => Some("Describe the story you want, e.g. \"a robot learns to paint\""),
            TalesError::Config(_) => Some("Fix the value in your config file or env overrides"),
            TalesError::InvalidPanelLimits { .. } => {
                Some("Use 1 <= min_panels <= max_panels (defaults: 7 and 20)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_message() {
        let err = TalesError::provider("groq", "rate limited");
        assert_eq!(err.to_string(), "GT-010: Provider 'groq' failed: rate limited");
    }

    #[test]
    fn every_config_error_has_a_fix() {
        let errors = [
            TalesError::EmptyIdea,
            TalesError::Config("temperature".into()),
            TalesError::InvalidPanelLimits { min: 9, max: 3 },
            TalesError::UnknownProvider { name: "nope".into() },
        ];
        for err in &errors {
            assert!(err.fix_suggestion().is_some(), "missing fix for {err}");
        }
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: TalesError = io.into();
        assert!(matches!(err, TalesError::Io(_)));
    }
}
