//! Comic generation prompts
//!
//! The prompt asks the model for exactly the shape [`crate::parser`]
//! understands: a `# Title` line, then `Panel N:` blocks with `Name: line`
//! dialogue.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TalesError;
use crate::normalize::PanelLimits;

/// Panels requested when the caller does not say
pub const DEFAULT_PANEL_COUNT: usize = 8;

/// System instruction sent with every comic request
pub const SYSTEM_PROMPT: &str = concat!(
    "You are a comic book writer. You write tight, visual scripts. ",
    "Every panel describes one clear image and at most three lines of dialogue. ",
    "Never add commentary before or after the script."
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Fantasy,
    Scifi,
    Mystery,
    Horror,
    Romance,
    Adventure,
    Comedy,
    Drama,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fantasy => "fantasy",
            Genre::Scifi => "science fiction",
            Genre::Mystery => "mystery",
            Genre::Horror => "horror",
            Genre::Romance => "romance",
            Genre::Adventure => "adventure",
            Genre::Comedy => "comedy",
            Genre::Drama => "drama",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = TalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fantasy" => Ok(Genre::Fantasy),
            "scifi" | "sci-fi" | "science fiction" => Ok(Genre::Scifi),
            "mystery" => Ok(Genre::Mystery),
            "horror" => Ok(Genre::Horror),
            "romance" => Ok(Genre::Romance),
            "adventure" => Ok(Genre::Adventure),
            "comedy" => Ok(Genre::Comedy),
            "drama" => Ok(Genre::Drama),
            other => Err(TalesError::Config(format!("unknown genre '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ArtStyle {
    #[default]
    Manga,
    Western,
    Noir,
    Watercolor,
    Pixel,
    Cartoon,
}

impl ArtStyle {
    /// Visual direction handed to the model
    fn direction(&self) -> &'static str {
        match self {
            ArtStyle::Manga => "manga: dynamic angles, speed lines, expressive faces",
            ArtStyle::Western => "western superhero comics: bold inks, dramatic poses",
            ArtStyle::Noir => "noir: heavy shadows, rain, high contrast black and white",
            ArtStyle::Watercolor => "watercolor: soft edges, muted washes, quiet framing",
            ArtStyle::Pixel => "pixel art: retro game framing, limited palette",
            ArtStyle::Cartoon => "cartoon: exaggerated shapes, bright colors, slapstick timing",
        }
    }
}

impl fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtStyle::Manga => "manga",
            ArtStyle::Western => "western",
            ArtStyle::Noir => "noir",
            ArtStyle::Watercolor => "watercolor",
            ArtStyle::Pixel => "pixel",
            ArtStyle::Cartoon => "cartoon",
        };
        f.write_str(name)
    }
}

impl FromStr for ArtStyle {
    type Err = TalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manga" | "anime" => Ok(ArtStyle::Manga),
            "western" => Ok(ArtStyle::Western),
            "noir" => Ok(ArtStyle::Noir),
            "watercolor" => Ok(ArtStyle::Watercolor),
            "pixel" => Ok(ArtStyle::Pixel),
            "cartoon" => Ok(ArtStyle::Cartoon),
            other => Err(TalesError::Config(format!("unknown art style '{other}'"))),
        }
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub idea: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Genre,
    #[serde(default)]
    pub art_style: ArtStyle,
    #[serde(default = "default_panel_count")]
    pub panel_count: usize,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub tone: Option<String>,
}

fn default_panel_count() -> usize {
    DEFAULT_PANEL_COUNT
}

impl StoryRequest {
    pub fn new(idea: impl Into<String>) -> Self {
        Self {
            idea: idea.into(),
            title: None,
            genre: Genre::default(),
            art_style: ArtStyle::default(),
            panel_count: DEFAULT_PANEL_COUNT,
            characters: Vec::new(),
            tone: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_art_style(mut self, style: ArtStyle) -> Self {
        self.art_style = style;
        self
    }

    pub fn with_panel_count(mut self, count: usize) -> Self {
        self.panel_count = count;
        self
    }

    pub fn with_character(mut self, name: impl Into<String>) -> Self {
        self.characters.push(name.into());
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }
}

/// Build the user prompt with the default panel limits
pub fn build_comic_prompt(request: &StoryRequest) -> Result<String, TalesError> {
    build_comic_prompt_with(request, &PanelLimits::default())
}

/// Build the user prompt, clamping the requested panel count into `limits`
pub fn build_comic_prompt_with(
    request: &StoryRequest,
    limits: &PanelLimits,
) -> Result<String, TalesError> {
    let idea = request.idea.trim();
    if idea.is_empty() {
        return Err(TalesError::EmptyIdea);
    }

    let panels = limits.clamp(request.panel_count);
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(&format!(
        "Write a {} comic script based on this idea:\n{}\n\n",
        request.genre, idea
    ));
    prompt.push_str(&format!("Art direction: {}.\n", request.art_style.direction()));

    if let Some(tone) = request.tone.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        prompt.push_str(&format!("Tone: {tone}.\n"));
    }
    if !request.characters.is_empty() {
        prompt.push_str(&format!("Main characters: {}.\n", request.characters.join(", ")));
    }

    prompt.push_str("\nFormat rules:\n");
    match request.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => prompt.push_str(&format!("- The first line is exactly: # {title}\n")),
        None => prompt.push_str("- The first line is the title, written as: # Title\n"),
    }
    prompt.push_str(&format!("- Write exactly {panels} panels, numbered from 1.\n"));
    prompt.push_str("- Start each panel with \"Panel N:\" followed by the scene description.\n");
    prompt.push_str("- Put each line of dialogue on its own line as \"Name: what they say\".\n");
    prompt.push_str("- Do not use colons in scene descriptions.\n");

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_request_details() {
        let request = StoryRequest::new("A robot learns to paint")
            .with_genre(Genre::Scifi)
            .with_art_style(ArtStyle::Noir)
            .with_character("Unit-7")
            .with_character("Mara")
            .with_tone("bittersweet");

        let prompt = build_comic_prompt(&request).unwrap();

        assert!(prompt.contains("science fiction comic script"));
        assert!(prompt.contains("A robot learns to paint"));
        assert!(prompt.contains("noir"));
        assert!(prompt.contains("Main characters: Unit-7, Mara."));
        assert!(prompt.contains("Tone: bittersweet."));
        assert!(prompt.contains("exactly 8 panels"));
        assert!(prompt.contains("# Title"));
    }

    #[test]
    fn explicit_title_is_requested_verbatim() {
        let request = StoryRequest::new("heist").with_title("The Vault");
        let prompt = build_comic_prompt(&request).unwrap();
        assert!(prompt.contains("# The Vault"));
    }

    #[test]
    fn panel_count_is_clamped() {
        let low = build_comic_prompt(&StoryRequest::new("x").with_panel_count(2)).unwrap();
        let high = build_comic_prompt(&StoryRequest::new("x").with_panel_count(99)).unwrap();
        assert!(low.contains("exactly 7 panels"));
        assert!(high.contains("exactly 20 panels"));
    }

    #[test]
    fn blank_idea_rejected() {
        let err = build_comic_prompt(&StoryRequest::new("   ")).unwrap_err();
        assert!(matches!(err, TalesError::EmptyIdea));
    }

    #[test]
    fn genre_and_style_parse_case_insensitively() {
        assert_eq!("Sci-Fi".parse::<Genre>().unwrap(), Genre::Scifi);
        assert_eq!("HORROR".parse::<Genre>().unwrap(), Genre::Horror);
        assert_eq!("Anime".parse::<ArtStyle>().unwrap(), ArtStyle::Manga);
        assert!("opera".parse::<Genre>().is_err());
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let request: StoryRequest = serde_yaml::from_str("idea: dragons").unwrap();
        assert_eq!(request.genre, Genre::Fantasy);
        assert_eq!(request.art_style, ArtStyle::Manga);
        assert_eq!(request.panel_count, DEFAULT_PANEL_COUNT);
    }
}
