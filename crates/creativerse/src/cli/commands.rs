//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use creativerse::{BuilderError, Character, CreativerseResult, GalleryFilter, NarrativeControls};
use std::path::PathBuf;

/// Creativerse - branching, illustrated stories from a premise
#[derive(Parser, Debug)]
#[command(name = "creativerse")]
#[command(about = "Branching, illustrated stories from a premise", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Export spans to stdout through OpenTelemetry
    #[arg(long, global = true)]
    pub trace: bool,

    /// Load configuration from this file only
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Gallery file, overriding the configured path
    #[arg(long, global = true)]
    pub gallery: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a story interactively
    Play(PlayArgs),

    /// Browse the story gallery
    #[command(subcommand)]
    Gallery(GalleryCommands),
}

/// Settings for a new story
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Story premise
    #[arg(long)]
    pub premise: String,

    /// Rounds before the story completes
    #[arg(long, default_value = "3")]
    pub rounds: u32,

    /// Emotional tone
    #[arg(long, default_value = "whimsical")]
    pub tone: String,

    /// Genre
    #[arg(long, default_value = "adventure")]
    pub genre: String,

    /// Illustration style
    #[arg(long, default_value = "Crayon Drawing")]
    pub style: String,

    /// Constraints the generator must respect
    #[arg(long, default_value = "")]
    pub constraints: String,

    /// Portrait character as NAME:DESCRIPTION (repeatable)
    #[arg(long = "character", value_parser = parse_portrait)]
    pub characters: Vec<Character>,

    /// Symbolic character as NAME:DESCRIPTION[:THEME] (repeatable)
    #[arg(long = "symbol", value_parser = parse_symbolic)]
    pub symbols: Vec<Character>,

    /// Model provider the backend should use, overriding the configured one
    #[arg(long)]
    pub provider: Option<String>,

    /// Author name for the gallery
    #[arg(long, default_value = "Anonymous")]
    pub author: String,
}

impl PlayArgs {
    /// Provider for this story, falling back to `configured`.
    pub fn provider_or<'a>(&'a self, configured: &'a str) -> &'a str {
        self.provider.as_deref().unwrap_or(configured)
    }

    /// Narrative controls for these settings.
    pub fn controls(&self, configured_provider: &str) -> CreativerseResult<NarrativeControls> {
        let cast = self
            .characters
            .iter()
            .chain(self.symbols.iter())
            .cloned()
            .collect::<Vec<_>>();

        let controls = NarrativeControls::builder()
            .prompt(self.premise.clone())
            .num_rounds(self.rounds)
            .tone(self.tone.clone())
            .genre(self.genre.clone())
            .style(self.style.clone())
            .constraints(self.constraints.clone())
            .characters(cast)
            .ai_provider(self.provider_or(configured_provider))
            .build()
            .map_err(BuilderError::from)?;
        Ok(controls)
    }
}

/// Gallery subcommands
#[derive(Subcommand, Debug)]
pub enum GalleryCommands {
    /// List saved stories, newest first
    List {
        /// Which stories to show: public, private or all
        #[arg(long, default_value = "public")]
        filter: GalleryFilter,
    },

    /// Show a story in full
    Show {
        /// Story id
        id: String,
    },

    /// Like a story
    Like {
        /// Story id
        id: String,
    },
}

fn split_character(s: &str) -> Result<(String, String, Option<String>), String> {
    let mut parts = s.splitn(3, ':').map(str::trim);
    let name = parts.next().unwrap_or_default();
    let description = parts.next().unwrap_or_default();
    if name.is_empty() || description.is_empty() {
        return Err(format!("Expected NAME:DESCRIPTION, got '{}'", s));
    }
    let theme = parts.next().filter(|t| !t.is_empty()).map(str::to_string);
    Ok((name.to_string(), description.to_string(), theme))
}

fn parse_portrait(s: &str) -> Result<Character, String> {
    let (name, description, _) = split_character(s)?;
    Ok(Character::portrait(name, description))
}

fn parse_symbolic(s: &str) -> Result<Character, String> {
    let (name, description, theme) = split_character(s)?;
    let mut character = Character::portrait(name, description);
    character.representation = creativerse::RepresentationStyle::Symbolic;
    character.symbolic_theme = theme;
    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use creativerse::RepresentationStyle;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_play_arguments() {
        let cli = Cli::parse_from([
            "creativerse",
            "play",
            "--premise",
            "The Lighthouse Cat",
            "--rounds",
            "2",
            "--character",
            "Pip: A small grey cat",
            "--symbol",
            "Frida:A curious toddler:Magic & Wonder",
        ]);
        let Commands::Play(args) = cli.command else {
            panic!("Expected play command");
        };

        let controls = args.controls("gemini").unwrap();
        assert_eq!(controls.prompt(), "The Lighthouse Cat");
        assert_eq!(controls.ai_provider(), "gemini");
        assert_eq!(*controls.num_rounds(), 2);
        assert_eq!(controls.characters().len(), 2);
        assert_eq!(controls.characters()[0].name, "Pip");
        assert_eq!(controls.characters()[0].description, "A small grey cat");
        assert_eq!(
            controls.characters()[1].representation,
            RepresentationStyle::Symbolic
        );
        assert_eq!(
            controls.characters()[1].symbolic_theme.as_deref(),
            Some("Magic & Wonder")
        );
    }

    #[test]
    fn test_provider_flag_overrides_config() {
        let cli = Cli::parse_from([
            "creativerse",
            "play",
            "--premise",
            "Sock mystery",
            "--provider",
            "openai",
        ]);
        let Commands::Play(args) = cli.command else {
            panic!("Expected play command");
        };

        assert_eq!(args.provider_or("gemini"), "openai");
        assert_eq!(args.controls("gemini").unwrap().ai_provider(), "openai");
    }

    #[test]
    fn test_symbol_without_theme_uses_default_later() {
        let character = parse_symbolic("Owl:Wise and old").unwrap();
        assert_eq!(character.representation, RepresentationStyle::Symbolic);
        assert!(character.symbolic_theme.is_none());
    }

    #[test]
    fn test_character_needs_a_description() {
        assert!(parse_portrait("Pip").is_err());
        assert!(parse_portrait(":A cat").is_err());
    }

    #[test]
    fn test_gallery_filter_argument() {
        let cli = Cli::parse_from(["creativerse", "gallery", "list", "--filter", "all"]);
        match cli.command {
            Commands::Gallery(GalleryCommands::List { filter }) => {
                assert_eq!(filter, GalleryFilter::All)
            }
            other => panic!("Unexpected command {:?}", other),
        }
    }
}
