//! Comic script parser
//!
//! Turns free-form model output into numbered panels. The input is
//! natural-language text rather than a designed format, so parsing is a
//! forgiving line-oriented heuristic:
//!
//! ```text
//! # The Last Train            <- title (first line)
//! Panel 1: A foggy platform.  <- marker, trailing text starts the caption
//! The clock reads midnight.   <- appended to the caption
//! Conductor: All aboard!      <- dialogue (speaker before the first colon)
//! Panel 2 - The doors close.
//! ```
//!
//! A marker may be preceded by anything but letters, so list numbering
//! (`1. Panel 1:`), brackets (`[Panel 1]`) and markdown (`**Panel 1:**`,
//! `### Panel 1`) all count, while `Hero: see panel 2` stays dialogue.
//!
//! A dialogue line needs a speaker and an utterance that are both non-empty
//! after trimming. `Hero:` with nothing but spaces after the colon is not
//! dialogue and goes through the caption rule instead.
//!
//! When no marker is found anywhere, the text is chunked on blank lines
//! instead. Neither function can fail.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::comic::{DialogueLine, Panel};

/// Title used when the script gives none
pub const DEFAULT_TITLE: &str = "Comic Story";

/// Maximum panels produced by the blank-line fallback
pub const FALLBACK_CHUNK_LIMIT: usize = 4;

/// `Panel 3:` / `panel 3.` / `PANEL3 -` / `**Panel 3:**` / `1. Panel 3` / `[Panel 3]`,
/// non-letter prefix and rest of line captured
static PANEL_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([^\p{L}]*)panel\s*(\d+)\s*\**\s*[\])]?\s*[:.\-]?(.*)$").unwrap()
});

/// `Speaker: utterance`, split on the first colon
static DIALOGUE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^:]+):(.+)$").unwrap());

/// Parse a raw script into panels (not yet normalized)
pub fn parse_panels(text: &str) -> Vec<Panel> {
    let mut panels = Vec::new();
    let mut current: Option<Panel> = None;

    for line in text.lines() {
        if let Some(caps) = PANEL_MARKER.captures(line) {
            if let Some(done) = current.take() {
                panels.push(finish(done));
            }
            // Out-of-range numbers are renumbered by normalization anyway
            let number = caps[2].parse::<u32>().unwrap_or(u32::MAX);
            current = Some(Panel::new(number, clean_marker_caption(&caps[1], &caps[3])));
            continue;
        }

        let Some(panel) = current.as_mut() else {
            continue;
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(dialogue) = parse_dialogue(trimmed) {
            panel.dialogue.push(dialogue);
        } else if trimmed.chars().count() > 3 && !trimmed.starts_with('-') {
            panel.caption.push(' ');
            panel.caption.push_str(trimmed);
        }
    }

    if let Some(done) = current.take() {
        panels.push(finish(done));
    }

    if panels.is_empty() {
        panels = chunk_paragraphs(text);
        tracing::warn!(
            chunks = panels.len(),
            "No panel markers found, falling back to paragraph chunks"
        );
    } else {
        tracing::debug!(panels = panels.len(), "Parsed panel markers");
    }

    panels
}

/// Pick the comic title: explicit title, else `# Heading` or the first line
pub fn extract_title(text: &str, explicit_title: Option<&str>) -> String {
    if let Some(title) = explicit_title.filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    let first = text.lines().next().unwrap_or_default();
    let title = match first.strip_prefix("# ") {
        Some(heading) => heading.trim(),
        None => first.trim(),
    };

    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

fn parse_dialogue(line: &str) -> Option<DialogueLine> {
    let caps = DIALOGUE_LINE.captures(line)?;
    let speaker = caps[1].trim();
    let text = caps[2].trim();
    if speaker.is_empty() || text.is_empty() {
        return None;
    }
    Some(DialogueLine::new(speaker, text))
}

/// Text after a marker; `**Panel 1:** text` leaves its closing `**` in front
fn clean_marker_caption(prefix: &str, rest: &str) -> String {
    let rest = rest.trim();
    let rest = match rest.strip_prefix("**") {
        Some(unbolded) if prefix.contains("**") => unbolded,
        _ => rest,
    };
    rest.trim().to_string()
}

/// A marker with no trailing text leaves a leading space once lines are appended
fn finish(mut panel: Panel) -> Panel {
    panel.caption = panel.caption.trim().to_string();
    panel
}

fn chunk_paragraphs(text: &str) -> Vec<Panel> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .take(FALLBACK_CHUNK_LIMIT)
        .zip(1u32..)
        .map(|(chunk, number)| Panel::new(number, chunk))
        .collect()
}
