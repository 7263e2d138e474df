//! Creativerse CLI binary.
//!
//! This binary provides command-line access to Creativerse:
//! - Write a branching story interactively
//! - Browse, read and like stories in the gallery

use clap::Parser;
use creativerse::{
    init_logging, init_telemetry, shutdown_telemetry, CreativerseConfig, JsonFileGallery,
};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{handle_gallery_command, run_play, Cli, Commands};

    // Load .env if present
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    if cli.trace {
        init_telemetry()?;
    } else {
        init_logging(cli.verbose)?;
    }

    let config = match &cli.config {
        Some(path) => CreativerseConfig::from_file(path)?,
        None => CreativerseConfig::load()?,
    };
    let gallery = match &cli.gallery {
        Some(path) => JsonFileGallery::new(path),
        None => JsonFileGallery::from_config(&config.gallery),
    };

    // Execute the requested command
    let result = match cli.command {
        Commands::Play(args) => run_play(args, &config, &gallery).await,
        Commands::Gallery(cmd) => handle_gallery_command(cmd, &gallery)
            .await
            .map_err(Into::into),
    };

    if cli.trace {
        shutdown_telemetry();
    }
    result
}
