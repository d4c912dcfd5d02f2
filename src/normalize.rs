//! Panel count normalization
//!
//! The reader UI pages through panels by index and cannot render a comic
//! with zero or one panel, so every comic is forced into a fixed range and
//! renumbered from 1.

use crate::comic::Panel;
use crate::error::TalesError;

/// Fewest panels a comic may have
pub const MIN_PANELS: usize = 7;

/// Most panels a comic may have
pub const MAX_PANELS: usize = 20;

const PLACEHOLDER_SUFFIX: &str = " - Additional scene to be described...";

/// Inclusive bounds on the number of panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLimits {
    pub min: usize,
    pub max: usize,
}

impl Default for PanelLimits {
    fn default() -> Self {
        Self {
            min: MIN_PANELS,
            max: MAX_PANELS,
        }
    }
}

impl PanelLimits {
    pub fn new(min: usize, max: usize) -> Result<Self, TalesError> {
        if min == 0 || min > max {
            return Err(TalesError::InvalidPanelLimits { min, max });
        }
        Ok(Self { min, max })
    }

    /// Clamp a requested panel count into the limits
    pub fn clamp(&self, count: usize) -> usize {
        count.clamp(self.min, self.max)
    }
}

/// Normalize to the default 7..=20 range
pub fn normalize_panel_count(panels: Vec<Panel>) -> Vec<Panel> {
    normalize_with(panels, &PanelLimits::default())
}

/// Pad with placeholders up to `limits.min`, truncate to `limits.max`, renumber from 1
pub fn normalize_with(mut panels: Vec<Panel>, limits: &PanelLimits) -> Vec<Panel> {
    let parsed = panels.len();

    let mut next = panels.last().map_or(1, |p| p.number.saturating_add(1));
    while panels.len() < limits.min {
        panels.push(Panel::new(next, placeholder_caption(next)));
        next = next.saturating_add(1);
    }

    panels.truncate(limits.max);

    for (number, panel) in (1u32..).zip(panels.iter_mut()) {
        panel.number = number;
    }

    tracing::debug!(
        parsed,
        normalized = panels.len(),
        min = limits.min,
        max = limits.max,
        "Normalized panel count"
    );

    panels
}

/// Caption given to a padding panel
pub fn placeholder_caption(number: u32) -> String {
    format!("Panel {number}{PLACEHOLDER_SUFFIX}")
}

/// Whether a caption was produced by [`placeholder_caption`]
pub fn is_placeholder_caption(caption: &str) -> bool {
    caption
        .strip_prefix("Panel ")
        .and_then(|rest| rest.strip_suffix(PLACEHOLDER_SUFFIX))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}
