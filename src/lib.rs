//! GroqTales - turn AI-generated comic scripts into structured panels

pub mod comic;
pub mod config;
pub mod error;
pub mod generator;
pub mod normalize;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod render;

pub use comic::{DialogueLine, Panel, ParsedComic};
pub use config::GeneratorConfig;
pub use error::{FixSuggestion, TalesError};
pub use generator::ComicGenerator;
pub use normalize::{normalize_panel_count, normalize_with, PanelLimits, MAX_PANELS, MIN_PANELS};
pub use parser::{extract_title, parse_panels, DEFAULT_TITLE};
pub use prompt::{build_comic_prompt, ArtStyle, Genre, StoryRequest};
pub use render::{render, OutputFormat};
