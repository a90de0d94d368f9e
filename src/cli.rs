//! Command-line interface definition for SEOForge
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the generation wizard, quick mode, article
//! management, editing, analysis, and export.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SEOForge - SEO article generation and editing CLI
///
/// Generate articles step by step through a remote text-generation
/// backend, review and edit them, and persist the result to the
/// article backend or a local cache.
#[derive(Parser, Debug, Clone)]
#[command(name = "seoforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the local cache file path
    #[arg(long, env = "SEOFORGE_CACHE_PATH")]
    pub cache_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for SEOForge
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive step-by-step generation wizard
    New,

    /// Generate a complete article in a single request
    Quick {
        /// Article topic or main keyword
        #[arg(short, long)]
        topic: String,

        /// Target article length in words (100-2000)
        #[arg(short, long)]
        length: Option<u32>,

        /// Target keyword to include (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// Writing tone: professional, casual, or formal
        #[arg(long)]
        tone: Option<String>,

        /// Apply a paraphrasing pass to the generated article
        #[arg(long)]
        paraphrase: bool,
    },

    /// List stored articles, newest first
    List,

    /// Print a stored article
    Show {
        /// Slug of the article
        slug: String,
    },

    /// Edit a stored article interactively
    Edit {
        /// Slug of the article
        slug: String,
    },

    /// Delete a stored article
    Delete {
        /// Slug of the article
        slug: String,
    },

    /// Run remote SEO analysis on a stored article
    Analyze {
        /// Slug of the article
        slug: String,

        /// Override the target keywords for the analysis (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,
    },

    /// Export a stored article as markdown with front matter
    Export {
        /// Slug of the article
        slug: String,

        /// Output file (defaults to <slug>.md in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// A minimal Cli value for unit tests that need one
    #[doc(hidden)]
    pub fn for_tests() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            cache_path: None,
            verbose: false,
            command: Commands::List,
        }
    }
}
