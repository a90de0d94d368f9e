//! SEOForge - SEO article generation and editing CLI library
//!
//! This library provides the core functionality for the SEOForge tool,
//! including the step-by-step generation orchestrator, the dual-backend
//! article store, the paraphrase assistant, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Generation session state, single-flight guards, and the orchestrator
//! - `generate`: Remote generation API client and wire types
//! - `store`: Article persistence (remote service, local JSON cache, fallback)
//! - `paraphrase`: Selection-based paraphrasing with stale-response protection
//! - `editor`: Dirty-tracked article editing state
//! - `export`: Front-mattered markdown export
//! - `slug`: URL slug derivation
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use seoforge::config::Config;
//! use seoforge::cli::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Cli::for_tests())?;
//!     config.validate()?;
//!
//!     // Orchestrator usage would go here
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod generate;
pub mod paraphrase;
pub mod session;
pub mod slug;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use editor::EditorState;
pub use error::{Result, SeoForgeError};
pub use generate::{GenerationClient, HttpGenerationClient};
pub use paraphrase::{ParaphraseAssistant, Selection};
pub use session::{GenerationSession, Orchestrator, SessionForm};
pub use slug::{slugify, slugify_or_untitled};
pub use store::{ArticleStore, FallbackStore, LocalStore, RemoteStore};
