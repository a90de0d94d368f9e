//! Article persistence
//!
//! A dual-backend store for article records. Every operation attempts
//! the remote article service first; on any remote failure the local
//! JSON cache takes over without surfacing the remote error to the
//! caller. `NotFound` only surfaces when the slug is absent from the
//! last backend tried.

use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;

pub mod local;
pub mod remote;
pub mod types;

pub use local::LocalStore;
pub use remote::RemoteStore;
pub use types::{ArticleRecord, ArticleSummary, ArticleUpdate, NewArticle, Tone};

/// Capability of a persistence backend
///
/// Implemented by the remote service client, the local cache, and the
/// fallback combinator that composes them.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Persist a new article; returns the slug it was stored under
    async fn create(&self, article: NewArticle) -> Result<String>;

    /// List article summaries, newest first
    async fn list(&self) -> Result<Vec<ArticleSummary>>;

    /// Fetch one article by slug
    async fn get(&self, slug: &str) -> Result<ArticleRecord>;

    /// Merge the provided fields into an existing article
    async fn update(&self, slug: &str, update: ArticleUpdate) -> Result<()>;

    /// Remove an article
    async fn delete(&self, slug: &str) -> Result<()>;
}

/// Remote-first store with local fallback
///
/// Tries the primary backend and falls back to the secondary on any
/// primary failure, a remote 404 included: an article created while
/// the remote was unreachable exists only in the cache, so lookups
/// must reach it once the remote is back. The degradation is logged at
/// warn level but is otherwise invisible to the caller; only a failure
/// of both backends surfaces an error, and `NotFound` means the slug
/// is absent from the last backend tried.
pub struct FallbackStore<P, S> {
    primary: P,
    secondary: S,
}

impl FallbackStore<RemoteStore, LocalStore> {
    /// Build the standard remote+local pair from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let primary = RemoteStore::new(
            &config.persistence.backend_base,
            config.persistence.timeout_seconds,
        )?;
        let secondary = match &config.persistence.cache_path {
            Some(path) => LocalStore::new_with_path(path)?,
            None => LocalStore::new()?,
        };
        Ok(Self::new(primary, secondary))
    }
}

impl<P: ArticleStore, S: ArticleStore> FallbackStore<P, S> {
    /// Compose two backends, primary first
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    fn warn_fallback(operation: &str, err: &anyhow::Error) {
        tracing::warn!(
            "Remote persistence failed during {}, falling back to local cache: {}",
            operation,
            err
        );
    }
}

#[async_trait]
impl<P: ArticleStore, S: ArticleStore> ArticleStore for FallbackStore<P, S> {
    async fn create(&self, article: NewArticle) -> Result<String> {
        match self.primary.create(article.clone()).await {
            Ok(slug) => Ok(slug),
            Err(err) => {
                Self::warn_fallback("create", &err);
                self.secondary.create(article).await
            }
        }
    }

    async fn list(&self) -> Result<Vec<ArticleSummary>> {
        match self.primary.list().await {
            Ok(summaries) => Ok(summaries),
            Err(err) => {
                Self::warn_fallback("list", &err);
                self.secondary.list().await
            }
        }
    }

    async fn get(&self, slug: &str) -> Result<ArticleRecord> {
        match self.primary.get(slug).await {
            Ok(record) => Ok(record),
            Err(err) => {
                Self::warn_fallback("get", &err);
                self.secondary.get(slug).await
            }
        }
    }

    async fn update(&self, slug: &str, update: ArticleUpdate) -> Result<()> {
        match self.primary.update(slug, update.clone()).await {
            Ok(()) => Ok(()),
            Err(err) => {
                Self::warn_fallback("update", &err);
                self.secondary.update(slug, update).await
            }
        }
    }

    async fn delete(&self, slug: &str) -> Result<()> {
        match self.primary.delete(slug).await {
            Ok(()) => Ok(()),
            Err(err) => {
                Self::warn_fallback("delete", &err);
                self.secondary.delete(slug).await
            }
        }
    }
}
