//! Configuration for the story engine, the generation gateway and the gallery.
//!
//! Loading follows a precedence chain:
//! 1. Bundled defaults (`creativerse.toml` shipped with the workspace)
//! 2. `~/.config/creativerse/creativerse.toml`
//! 3. `./creativerse.toml`
//!
//! Later sources override earlier ones; user files are optional.

use config::{Config, File, FileFormat};
use creativerse_error::{ConfigError, CreativerseError, CreativerseResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Story-shape settings used by the branch controller.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default, setter(into))]
pub struct StoryConfig {
    /// Options generated per round
    #[serde(default = "default_options_per_round")]
    options_per_round: usize,

    /// Symbol theme used when a portrait cannot be generated
    #[serde(default = "default_portrait_fallback_theme")]
    portrait_fallback_theme: String,

    /// Symbol theme for symbolic characters without one
    #[serde(default = "default_symbolic_theme")]
    default_symbolic_theme: String,
}

fn default_options_per_round() -> usize {
    3
}

fn default_portrait_fallback_theme() -> String {
    "light and shadow".to_string()
}

fn default_symbolic_theme() -> String {
    "The Elements".to_string()
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            options_per_round: default_options_per_round(),
            portrait_fallback_theme: default_portrait_fallback_theme(),
            default_symbolic_theme: default_symbolic_theme(),
        }
    }
}

impl StoryConfig {
    /// Rejects settings the controller cannot run with.
    pub fn validate(&self) -> CreativerseResult<()> {
        if self.options_per_round == 0 {
            return Err(ConfigError::new("options_per_round must be at least 1").into());
        }
        Ok(())
    }
}

/// Connection settings for the HTTP generation gateway.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default, setter(into))]
pub struct GatewayConfig {
    /// Backend base URL
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Retry attempts for retryable failures (0 disables retry)
    #[serde(default = "default_max_retries")]
    max_retries: usize,

    /// First retry delay (milliseconds)
    #[serde(default = "default_initial_backoff_ms")]
    initial_backoff_ms: u64,

    /// Cap on a single retry delay (seconds)
    #[serde(default = "default_max_backoff_secs")]
    max_backoff_secs: u64,

    /// Model provider named in every backend request
    #[serde(default = "default_provider")]
    provider: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

fn default_max_backoff_secs() -> u64 {
    30
}

fn default_provider() -> String {
    "gemini".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_secs: default_max_backoff_secs(),
            provider: default_provider(),
        }
    }
}

impl GatewayConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where the JSON gallery lives.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default, setter(into))]
pub struct GalleryConfig {
    /// Gallery file path
    #[serde(default = "default_gallery_path")]
    path: String,
}

fn default_gallery_path() -> String {
    "creativerse_gallery.json".to_string()
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            path: default_gallery_path(),
        }
    }
}

/// Top-level Creativerse configuration.
///
/// # Example
///
/// ```no_run
/// use creativerse_core::CreativerseConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CreativerseConfig::load()?;
/// println!("{} options per round", config.story.options_per_round());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CreativerseConfig {
    /// Story-shape settings
    #[serde(default)]
    pub story: StoryConfig,

    /// Generation gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Gallery settings
    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl CreativerseConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> CreativerseResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                CreativerseError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                CreativerseError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.story.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    #[instrument]
    pub fn load() -> CreativerseResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../creativerse.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/creativerse/creativerse.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("creativerse").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                CreativerseError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                CreativerseError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.story.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_bundled_file() {
        let bundled: CreativerseConfig =
            toml_like_load(include_str!("../../../creativerse.toml"));
        assert_eq!(bundled, CreativerseConfig::default());
    }

    fn toml_like_load(contents: &str) -> CreativerseConfig {
        Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_zero_options_rejected() {
        let story = StoryConfig::default().with_options_per_round(0);
        assert!(story.validate().is_err());
    }
}
