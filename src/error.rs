//! Error types for SEOForge
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for SEOForge operations
///
/// This enum encompasses all possible errors that can occur during
/// article generation, paraphrasing, persistence, and configuration
/// loading.
#[derive(Error, Debug)]
pub enum SeoForgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before any network call (empty topic, empty
    /// selection, out-of-range paraphrase parameter, unknown tone)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Remote generation API errors (headings, sections, quick mode,
    /// SEO analysis)
    #[error("Generation error: {0}")]
    Generation(String),

    /// Paraphrasing errors
    #[error("Paraphrase error: {0}")]
    Paraphrase(String),

    /// Persistence errors (remote backend and local cache)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Lookup against a slug that is absent from the target backend
    #[error("Article not found: {0}")]
    NotFound(String),

    /// An operation of this kind is already in flight; concurrent
    /// requests are rejected rather than queued
    #[error("Operation already in flight: {0}")]
    Busy(&'static str),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for SEOForge operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

/// Returns true when an error chain bottoms out in a `NotFound`
///
/// Callers use this to distinguish a missing slug, which is shown to
/// the user as such, from other persistence failures.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<SeoForgeError>(),
        Some(SeoForgeError::NotFound(_))
    )
}

/// Returns true when an error chain bottoms out in a `Busy` rejection
pub fn is_busy(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<SeoForgeError>(),
        Some(SeoForgeError::Busy(_))
    )
}
