//! Remote article persistence backend
//!
//! Thin client for the article service's REST surface:
//! `POST /articles`, `GET /articles`, `GET /articles/{slug}`,
//! `PUT /articles/{slug}`, `DELETE /articles/{slug}`. The transport is
//! an external contract; this module only maps it onto the
//! [`ArticleStore`] trait and the crate's error taxonomy (404 becomes
//! `NotFound`, everything else a `Storage` error).

use crate::error::{Result, SeoForgeError};
use crate::store::types::{ArticleRecord, ArticleSummary, ArticleUpdate, NewArticle};
use crate::store::ArticleStore;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// HTTP-backed article store
pub struct RemoteStore {
    client: Client,
    base: String,
}

/// Response body of `POST /articles`
#[derive(Debug, Deserialize)]
struct CreateResponse {
    slug: String,
}

impl RemoteStore {
    /// Create a remote store against the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(base: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("seoforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SeoForgeError::Storage(format!("Failed to create HTTP client: {e}")))?;

        let base = base.into().trim_end_matches('/').to_string();
        Ok(Self { client, base })
    }

    fn articles_url(&self) -> String {
        format!("{}/articles", self.base)
    }

    fn article_url(&self, slug: &str) -> String {
        format!("{}/articles/{}", self.base, slug)
    }

    /// Map a non-success status to the domain error
    async fn status_error(slug: Option<&str>, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(slug) = slug {
                return SeoForgeError::NotFound(slug.to_string()).into();
            }
        }
        let body = response.text().await.unwrap_or_default();
        SeoForgeError::Storage(format!("Backend returned {status}: {body}")).into()
    }
}

#[async_trait]
impl ArticleStore for RemoteStore {
    async fn create(&self, article: NewArticle) -> Result<String> {
        let response = self
            .client
            .post(self.articles_url())
            .json(&article)
            .send()
            .await
            .map_err(SeoForgeError::Http)?;

        if !response.status().is_success() {
            return Err(Self::status_error(None, response).await);
        }

        let created: CreateResponse = response.json().await.map_err(SeoForgeError::Http)?;
        tracing::debug!("Backend assigned slug '{}'", created.slug);
        Ok(created.slug)
    }

    async fn list(&self) -> Result<Vec<ArticleSummary>> {
        let response = self
            .client
            .get(self.articles_url())
            .send()
            .await
            .map_err(SeoForgeError::Http)?;

        if !response.status().is_success() {
            return Err(Self::status_error(None, response).await);
        }

        let mut summaries: Vec<ArticleSummary> =
            response.json().await.map_err(SeoForgeError::Http)?;
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    async fn get(&self, slug: &str) -> Result<ArticleRecord> {
        let response = self
            .client
            .get(self.article_url(slug))
            .send()
            .await
            .map_err(SeoForgeError::Http)?;

        if !response.status().is_success() {
            return Err(Self::status_error(Some(slug), response).await);
        }

        Ok(response.json().await.map_err(SeoForgeError::Http)?)
    }

    async fn update(&self, slug: &str, update: ArticleUpdate) -> Result<()> {
        let response = self
            .client
            .put(self.article_url(slug))
            .json(&update)
            .send()
            .await
            .map_err(SeoForgeError::Http)?;

        if !response.status().is_success() {
            return Err(Self::status_error(Some(slug), response).await);
        }
        Ok(())
    }

    async fn delete(&self, slug: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.article_url(slug))
            .send()
            .await
            .map_err(SeoForgeError::Http)?;

        if !response.status().is_success() {
            return Err(Self::status_error(Some(slug), response).await);
        }
        Ok(())
    }
}
