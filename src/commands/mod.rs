/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes one module per command group:

- `new`      — Interactive step-by-step generation wizard
- `quick`    — Single-request article generation
- `articles` — Listing, showing, and deleting stored articles
- `edit`     — Interactive article editor with paraphrasing
- `analyze`  — Remote SEO analysis of a stored article
- `export`   — Front-mattered markdown export

These handlers are intentionally small and use the library components:
the generation client, the persistence stores, and the orchestrator.
*/

use crate::config::Config;
use crate::error::Result;
use crate::generate::HttpGenerationClient;
use crate::store::{FallbackStore, LocalStore, RemoteStore};

pub mod analyze;
pub mod articles;
pub mod edit;
pub mod export;
pub mod new;
pub mod quick;

/// Build the standard remote-first article store from configuration
pub(crate) fn build_store(config: &Config) -> Result<FallbackStore<RemoteStore, LocalStore>> {
    FallbackStore::from_config(config)
}

/// Build the generation API client from configuration
pub(crate) fn build_client(config: &Config) -> Result<HttpGenerationClient> {
    HttpGenerationClient::new(&config.generation)
}
