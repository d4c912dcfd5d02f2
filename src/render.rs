//! Output formats for parsed comics

use std::fmt::Write as _;

use crate::comic::ParsedComic;
use crate::error::TalesError;

/// Output format enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain-text script (default)
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,
}

pub fn render(comic: &ParsedComic, format: OutputFormat) -> Result<String, TalesError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(comic)?),
        OutputFormat::Text => Ok(render_text(comic)),
    }
}

/// Render back into the script shape the parser reads
pub fn render_text(comic: &ParsedComic) -> String {
    let mut out = String::with_capacity(64 * comic.panels.len());
    let _ = writeln!(out, "# {}", comic.title);

    for panel in &comic.panels {
        out.push('\n');
        if panel.caption.is_empty() {
            let _ = writeln!(out, "Panel {}:", panel.number);
        } else {
            let _ = writeln!(out, "Panel {}: {}", panel.number, panel.caption);
        }
        for line in &panel.dialogue {
            let _ = writeln!(out, "  {}: {}", line.speaker, line.text);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comic::Panel;
    use crate::parser::parse_panels;

    fn sample() -> ParsedComic {
        ParsedComic {
            title: "Harbor".into(),
            panels: vec![
                Panel::new(1, "Fog rolls in.").with_line("Keeper", "Lights on!"),
                Panel::new(2, ""),
            ],
        }
    }

    #[test]
    fn text_layout() {
        let text = render_text(&sample());
        assert_eq!(
            text,
            "# Harbor\n\nPanel 1: Fog rolls in.\n  Keeper: Lights on!\n\nPanel 2:\n"
        );
    }

    #[test]
    fn text_output_parses_back() {
        let comic = sample();
        let reparsed = parse_panels(&render_text(&comic));
        assert_eq!(reparsed, comic.panels);
    }

    #[test]
    fn json_output() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Harbor");
        assert_eq!(value["panels"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn default_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
