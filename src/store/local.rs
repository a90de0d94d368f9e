//! Local cache persistence backend
//!
//! The entire article collection is serialized as one JSON document in
//! a single file, mirroring a browser-local key-value entry: every
//! write is a full read of the collection, an in-memory mutation, and
//! a full rewrite. Concurrent writers are not coordinated; the last
//! writer wins. That is an accepted limitation of this backend, not a
//! bug.

use crate::error::{Result, SeoForgeError};
use crate::slug::slugify_or_untitled;
use crate::store::types::{ArticleRecord, ArticleSummary, ArticleUpdate, NewArticle};
use crate::store::ArticleStore;
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use directories::ProjectDirs;
use std::path::PathBuf;

/// File-backed article store
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Create a store at the default cache location
    ///
    /// `SEOFORGE_CACHE_PATH` overrides the platform data directory,
    /// which makes it easy to point the binary at a test cache without
    /// touching the user's data.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var("SEOFORGE_CACHE_PATH") {
            if !override_path.is_empty() {
                return Self::new_with_path(override_path);
            }
        }

        let proj_dirs = ProjectDirs::from("com", "seoforge", "seoforge")
            .ok_or_else(|| SeoForgeError::Storage("Could not determine data directory".into()))?;
        Self::new_with_path(proj_dirs.data_dir().join("articles.json"))
    }

    /// Create a store backed by the given file
    ///
    /// # Examples
    ///
    /// ```
    /// use seoforge::store::LocalStore;
    ///
    /// let store = LocalStore::new_with_path("/tmp/seoforge_test_articles.json").unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create cache directory")
                .map_err(|e| SeoForgeError::Storage(e.to_string()))?;
        }
        Ok(Self { path })
    }

    /// Path of the cache file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the whole collection; a missing file is an empty collection
    fn read_collection(&self) -> Result<Vec<ArticleRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .context("Failed to read cache file")
            .map_err(|e| SeoForgeError::Storage(e.to_string()))?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records = serde_json::from_str(&contents)
            .context("Failed to parse cache file")
            .map_err(|e| SeoForgeError::Storage(e.to_string()))?;
        Ok(records)
    }

    /// Rewrite the whole collection
    fn write_collection(&self, records: &[ArticleRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .context("Failed to serialize cache")
            .map_err(|e| SeoForgeError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json)
            .context("Failed to write cache file")
            .map_err(|e| SeoForgeError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for LocalStore {
    async fn create(&self, article: NewArticle) -> Result<String> {
        let slug = slugify_or_untitled(&article.title);
        let now = Utc::now();
        let mut records = self.read_collection()?;

        if let Some(existing) = records.iter_mut().find(|r| r.slug == slug) {
            // Upsert on slug collision: last write wins, created_at preserved.
            existing.title = article.title;
            existing.content = article.content;
            existing.meta_description = article.meta_description;
            existing.topic = article.topic;
            existing.keywords = article.keywords;
            existing.tone = article.tone;
            existing.word_count = article.word_count;
            existing.updated_at = now;
        } else {
            records.push(ArticleRecord {
                slug: slug.clone(),
                title: article.title,
                content: article.content,
                meta_description: article.meta_description,
                topic: article.topic,
                keywords: article.keywords,
                tone: article.tone,
                word_count: article.word_count,
                readability_score: None,
                seo_score: None,
                created_at: now,
                updated_at: now,
            });
        }

        self.write_collection(&records)?;
        tracing::debug!("Cached article locally under slug '{}'", slug);
        Ok(slug)
    }

    async fn list(&self) -> Result<Vec<ArticleSummary>> {
        let records = self.read_collection()?;
        let mut summaries: Vec<ArticleSummary> = records.iter().map(ArticleSummary::from).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    async fn get(&self, slug: &str) -> Result<ArticleRecord> {
        self.read_collection()?
            .into_iter()
            .find(|r| r.slug == slug)
            .ok_or_else(|| SeoForgeError::NotFound(slug.to_string()).into())
    }

    async fn update(&self, slug: &str, update: ArticleUpdate) -> Result<()> {
        let mut records = self.read_collection()?;
        let record = records
            .iter_mut()
            .find(|r| r.slug == slug)
            .ok_or_else(|| SeoForgeError::NotFound(slug.to_string()))?;

        if let Some(title) = update.title {
            record.title = title;
        }
        if let Some(content) = update.content {
            record.content = content;
        }
        if let Some(meta_description) = update.meta_description {
            record.meta_description = meta_description;
        }
        record.updated_at = Utc::now();

        self.write_collection(&records)
    }

    async fn delete(&self, slug: &str) -> Result<()> {
        let mut records = self.read_collection()?;
        let before = records.len();
        records.retain(|r| r.slug != slug);
        if records.len() == before {
            return Err(SeoForgeError::NotFound(slug.to_string()).into());
        }
        self.write_collection(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_not_found;
    use crate::store::types::Tone;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new_with_path(dir.path().join("articles.json")).unwrap();
        (dir, store)
    }

    fn sample(title: &str) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            content: format!("# {title}\n\nBody."),
            meta_description: "A description".to_string(),
            topic: "coffee".to_string(),
            keywords: vec!["espresso".to_string()],
            tone: Tone::Professional,
            word_count: Some(2),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (_dir, store) = temp_store();
        let slug = store.create(sample("Coffee Brewing Basics")).await.unwrap();
        assert_eq!(slug, "coffee-brewing-basics");

        let record = store.get(&slug).await.unwrap();
        assert_eq!(record.title, "Coffee Brewing Basics");
        assert_eq!(record.content, "# Coffee Brewing Basics\n\nBody.");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn test_create_upserts_on_slug_collision() {
        let (_dir, store) = temp_store();
        let first = store.create(sample("Coffee")).await.unwrap();
        let created_at = store.get(&first).await.unwrap().created_at;

        let mut replacement = sample("Coffee");
        replacement.content = "# Coffee\n\nRewritten.".to_string();
        let second = store.create(replacement).await.unwrap();
        assert_eq!(first, second);

        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 1);
        let record = store.get(&second).await.unwrap();
        assert_eq!(record.content, "# Coffee\n\nRewritten.");
        assert_eq!(record.created_at, created_at);
        assert!(record.updated_at > record.created_at);
    }

    #[tokio::test]
    async fn test_symbol_only_title_gets_untitled_slug() {
        let (_dir, store) = temp_store();
        let slug = store.create(sample("!!!")).await.unwrap();
        assert_eq!(slug, "untitled");
    }

    #[tokio::test]
    async fn test_list_sorted_newest_first() {
        let (_dir, store) = temp_store();
        store.create(sample("First Article")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.create(sample("Second Article")).await.unwrap();

        let summaries = store.list().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].slug, "second-article");
        assert_eq!(summaries[1].slug, "first-article");
    }

    #[tokio::test]
    async fn test_update_merges_only_provided_fields() {
        let (_dir, store) = temp_store();
        let slug = store.create(sample("Coffee")).await.unwrap();

        store
            .update(
                &slug,
                ArticleUpdate {
                    content: Some("new body".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let record = store.get(&slug).await.unwrap();
        assert_eq!(record.content, "new body");
        assert_eq!(record.title, "Coffee");
        assert_eq!(record.meta_description, "A description");
        assert!(record.updated_at > record.created_at);
    }

    #[tokio::test]
    async fn test_title_update_does_not_change_slug() {
        let (_dir, store) = temp_store();
        let slug = store.create(sample("Original Title")).await.unwrap();

        store
            .update(
                &slug,
                ArticleUpdate {
                    title: Some("Completely Different".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Still addressed by the original slug.
        let record = store.get("original-title").await.unwrap();
        assert_eq!(record.title, "Completely Different");
        assert_eq!(record.slug, "original-title");
    }

    #[tokio::test]
    async fn test_update_missing_slug_is_not_found_and_leaves_collection() {
        let (_dir, store) = temp_store();
        store.create(sample("Coffee")).await.unwrap();

        let err = store
            .update("missing", ArticleUpdate::default())
            .await
            .unwrap_err();
        assert!(is_not_found(&err));

        let summaries = store.list().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].slug, "coffee");
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, store) = temp_store();
        let slug = store.create(sample("Coffee")).await.unwrap();
        store.delete(&slug).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        let err = store.delete(&slug).await.unwrap_err();
        assert!(is_not_found(&err));
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_collection() {
        let (_dir, store) = temp_store();
        assert!(store.list().await.unwrap().is_empty());
    }
}
