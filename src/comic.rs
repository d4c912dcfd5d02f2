//! Comic value types
//!
//! A [`ParsedComic`] is built fresh from a script on every call and never
//! mutated afterwards. Panel numbers are 1-based and, once normalized,
//! contiguous.

use serde::{Deserialize, Serialize};

use crate::normalize::{is_placeholder_caption, normalize_panel_count};
use crate::parser::{extract_title, parse_panels};

/// One spoken line inside a panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// One frame of a comic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub number: u32,
    /// Narrative text for the frame (may be empty)
    #[serde(default)]
    pub caption: String,
    /// Spoken lines, in script order
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
}

impl Panel {
    pub fn new(number: u32, caption: impl Into<String>) -> Self {
        Self {
            number,
            caption: caption.into(),
            dialogue: Vec::new(),
        }
    }

    /// Add a spoken line (builder style)
    pub fn with_line(mut self, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        self.dialogue.push(DialogueLine::new(speaker, text));
        self
    }

    /// True for panels synthesized by normalization
    pub fn is_placeholder(&self) -> bool {
        self.dialogue.is_empty() && is_placeholder_caption(&self.caption)
    }
}

/// Title plus normalized panel sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedComic {
    pub title: String,
    pub panels: Vec<Panel>,
}

impl ParsedComic {
    /// Parse a raw script and normalize it to the default 7..=20 panel range
    pub fn from_script(text: &str, explicit_title: Option<&str>) -> Self {
        Self {
            title: extract_title(text, explicit_title),
            panels: normalize_panel_count(parse_panels(text)),
        }
    }

    /// Total spoken lines across all panels
    pub fn dialogue_count(&self) -> usize {
        self.panels.iter().map(|p| p.dialogue.len()).sum()
    }

    /// Number of panels that came from the script rather than padding
    pub fn scripted_panel_count(&self) -> usize {
        self.panels.iter().filter(|p| !p.is_placeholder()).count()
    }
}
