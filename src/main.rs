//! GroqTales CLI - comic script parsing and generation

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use groqtales::prompt::build_comic_prompt;
use groqtales::provider::create_provider;
use groqtales::{
    extract_title, normalize_panel_count, parse_panels, render, ArtStyle, ComicGenerator,
    FixSuggestion, GeneratorConfig, Genre, OutputFormat, ParsedComic, StoryRequest, TalesError,
};

#[derive(Parser)]
#[command(name = "groqtales")]
#[command(about = "GroqTales - turn AI-generated comic scripts into structured panels")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a comic script file into panels
    Parse {
        /// Path to the script, or - for stdin
        file: String,

        /// Use this title instead of the script's first line
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print panels as parsed, without padding or truncation
        #[arg(long)]
        raw: bool,
    },

    /// Print the generation prompt for a story idea
    Prompt {
        #[command(flatten)]
        story: StoryArgs,
    },

    /// Generate a comic with a text-generation provider
    Generate {
        #[command(flatten)]
        story: StoryArgs,

        /// Title to request and keep
        #[arg(short, long)]
        title: Option<String>,

        /// Override provider (groq, mock)
        #[arg(short, long)]
        provider: Option<String>,

        /// Override model
        #[arg(short, long)]
        model: Option<String>,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct StoryArgs {
    /// What the story is about
    idea: String,

    #[arg(short, long, value_enum, default_value_t = Genre::Fantasy)]
    genre: Genre,

    #[arg(short, long, value_enum, default_value_t = ArtStyle::Manga)]
    style: ArtStyle,

    /// Number of panels to ask for (clamped to 7..=20)
    #[arg(long, default_value_t = groqtales::prompt::DEFAULT_PANEL_COUNT)]
    panels: usize,

    /// Main character (repeatable)
    #[arg(long = "character")]
    characters: Vec<String>,

    #[arg(long)]
    tone: Option<String>,
}

impl StoryArgs {
    fn into_request(self) -> StoryRequest {
        StoryRequest {
            idea: self.idea,
            title: None,
            genre: self.genre,
            art_style: self.style,
            panel_count: self.panels,
            characters: self.characters,
            tone: self.tone,
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let result = match cli.command {
        Commands::Parse {
            file,
            title,
            format,
            raw,
        } => parse_script(&file, title.as_deref(), format, raw),
        Commands::Prompt { story } => print_prompt(story),
        Commands::Generate {
            story,
            title,
            provider,
            model,
            config,
            format,
        } => generate_comic(story, title, provider, model, config, format).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn read_input(file: &str) -> Result<String, TalesError> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

fn parse_script(
    file: &str,
    title: Option<&str>,
    format: OutputFormat,
    raw: bool,
) -> Result<(), TalesError> {
    let text = read_input(file)?;

    let panels = parse_panels(&text);
    let comic = ParsedComic {
        title: extract_title(&text, title),
        panels: if raw { panels } else { normalize_panel_count(panels) },
    };

    print!("{}", render(&comic, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    print_summary(&comic);
    Ok(())
}

fn print_prompt(story: StoryArgs) -> Result<(), TalesError> {
    let prompt = build_comic_prompt(&story.into_request())?;
    println!("{}", prompt);
    Ok(())
}

async fn generate_comic(
    story: StoryArgs,
    title: Option<String>,
    provider_override: Option<String>,
    model_override: Option<String>,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), TalesError> {
    let mut config = match config_path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    }
    .with_env_overrides();

    // Apply CLI overrides
    if let Some(p) = provider_override {
        config.provider = p;
    }
    if let Some(m) = model_override {
        config.model = m;
    }

    eprintln!(
        "{} Using provider: {} | model: {}",
        "→".cyan(),
        config.provider.cyan().bold(),
        config.model.cyan()
    );

    let provider = create_provider(&config.provider)?;
    let generator = ComicGenerator::new(provider, config)?;

    let mut request = story.into_request();
    request.title = title;

    let comic = generator.generate(&request).await?;

    print!("{}", render(&comic, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    print_summary(&comic);
    Ok(())
}

fn print_summary(comic: &ParsedComic) {
    eprintln!(
        "{} '{}': {} panels ({} scripted), {} dialogue lines",
        "✓".green(),
        comic.title,
        comic.panels.len(),
        comic.scripted_panel_count(),
        comic.dialogue_count()
    );
}
