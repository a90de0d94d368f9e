//! Configuration management for SEOForge
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::cli::Cli;
use crate::error::{Result, SeoForgeError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for SEOForge
///
/// Holds all configuration needed by the tool: the remote generation
/// API, the persistence backend plus local cache, and user-facing
/// generation defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote text-generation API settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Persistence backend and local cache settings
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Defaults applied when the user does not supply a value
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Remote generation API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the generation API
    ///
    /// Tests point this at a mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bearer token for the generation API
    ///
    /// `SEOFORGE_API_KEY` in the environment takes precedence over the
    /// config file.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Pause between consecutive section generations during a bulk
    /// run, in milliseconds. A pacing throttle against the remote API,
    /// not a correctness requirement; tests set it to 0.
    #[serde(default = "default_section_pacing_ms")]
    pub section_pacing_ms: u64,
}

fn default_api_base() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_section_pacing_ms() -> u64 {
    500
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            section_pacing_ms: default_section_pacing_ms(),
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Base URL of the article persistence backend
    #[serde(default = "default_backend_base")]
    pub backend_base: String,

    /// Path of the local cache file
    ///
    /// When unset, the cache lives in the platform data directory.
    /// `SEOFORGE_CACHE_PATH` and the `--cache-path` CLI flag both
    /// override this.
    #[serde(default)]
    pub cache_path: Option<String>,

    /// Per-request timeout for backend calls, in seconds
    #[serde(default = "default_backend_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_backend_base() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_backend_timeout_seconds() -> u64 {
    15
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend_base: default_backend_base(),
            cache_path: None,
            timeout_seconds: default_backend_timeout_seconds(),
        }
    }
}

/// User-facing generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default writing tone: professional, casual, or formal
    #[serde(default = "default_tone")]
    pub tone: String,

    /// Default target article length in words (quick mode)
    #[serde(default = "default_target_length")]
    pub target_length: u32,

    /// Default paraphrasing knobs
    #[serde(default)]
    pub paraphrase: ParaphraseDefaults,
}

fn default_tone() -> String {
    "professional".to_string()
}

fn default_target_length() -> u32 {
    500
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            tone: default_tone(),
            target_length: default_target_length(),
            paraphrase: ParaphraseDefaults::default(),
        }
    }
}

/// Paraphrasing parameter defaults
///
/// Ranges follow the backend contract: adequacy, fluency, and
/// diversity in 0.0..=2.0, max_variations in 1..=10.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParaphraseDefaults {
    #[serde(default = "default_adequacy")]
    pub adequacy: f64,

    #[serde(default = "default_fluency")]
    pub fluency: f64,

    #[serde(default = "default_diversity")]
    pub diversity: f64,

    #[serde(default = "default_max_variations")]
    pub max_variations: u32,
}

fn default_adequacy() -> f64 {
    1.0
}

fn default_fluency() -> f64 {
    1.0
}

fn default_diversity() -> f64 {
    1.0
}

fn default_max_variations() -> u32 {
    3
}

impl Default for ParaphraseDefaults {
    fn default() -> Self {
        Self {
            adequacy: default_adequacy(),
            fluency: default_fluency(),
            diversity: default_diversity(),
            max_variations: default_max_variations(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, applying CLI and
    /// environment overrides
    ///
    /// A missing file is not an error: defaults apply, so the tool
    /// works out of the box against a local backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| SeoForgeError::Config(format!("Failed to read {path}: {e}")))?;
            serde_yaml::from_str(&contents)
                .map_err(|e| SeoForgeError::Config(format!("Failed to parse {path}: {e}")))?
        } else {
            tracing::debug!("Config file {} not found, using defaults", path);
            Self::default()
        };

        if let Ok(key) = std::env::var("SEOFORGE_API_KEY") {
            if !key.is_empty() {
                config.generation.api_key = Some(key);
            }
        }

        if let Some(cache_path) = &cli.cache_path {
            config.persistence.cache_path = Some(cache_path.clone());
        }

        Ok(config)
    }

    /// Validate configuration invariants
    ///
    /// # Errors
    ///
    /// Returns a `Config` error naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.generation.api_base.is_empty() {
            return Err(SeoForgeError::Config("generation.api_base must not be empty".into()).into());
        }
        if self.persistence.backend_base.is_empty() {
            return Err(
                SeoForgeError::Config("persistence.backend_base must not be empty".into()).into(),
            );
        }
        if self.generation.timeout_seconds == 0 {
            return Err(
                SeoForgeError::Config("generation.timeout_seconds must be positive".into()).into(),
            );
        }
        if !(100..=2000).contains(&self.defaults.target_length) {
            return Err(SeoForgeError::Config(
                "defaults.target_length must be between 100 and 2000".into(),
            )
            .into());
        }
        crate::store::Tone::parse(&self.defaults.tone)
            .map_err(|_| SeoForgeError::Config(format!("unknown tone: {}", self.defaults.tone)))?;
        validate_paraphrase_params(
            self.defaults.paraphrase.adequacy,
            self.defaults.paraphrase.fluency,
            self.defaults.paraphrase.diversity,
            self.defaults.paraphrase.max_variations,
        )
        .map_err(|e| SeoForgeError::Config(format!("defaults.paraphrase: {e}")))?;
        Ok(())
    }
}

/// Check paraphrase parameters against the backend contract
///
/// Shared by config validation and the paraphrase assistant's
/// pre-network validation.
pub fn validate_paraphrase_params(
    adequacy: f64,
    fluency: f64,
    diversity: f64,
    max_variations: u32,
) -> std::result::Result<(), String> {
    for (name, value) in [
        ("adequacy", adequacy),
        ("fluency", fluency),
        ("diversity", diversity),
    ] {
        if !(0.0..=2.0).contains(&value) {
            return Err(format!("{name} must be between 0.0 and 2.0, got {value}"));
        }
    }
    if !(1..=10).contains(&max_variations) {
        return Err(format!(
            "max_variations must be between 1 and 10, got {max_variations}"
        ));
    }
    Ok(())
}
