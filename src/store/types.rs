//! Persisted article types
//!
//! These types cross both persistence backends: the remote article
//! service and the local JSON cache serialize the same shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SeoForgeError;

/// Writing tone for generated content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Formal,
}

impl Tone {
    /// Parse a tone name as accepted on the CLI and in config
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for anything other than
    /// `professional`, `casual`, or `formal`.
    pub fn parse(s: &str) -> Result<Self, SeoForgeError> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(Self::Professional),
            "casual" => Ok(Self::Casual),
            "formal" => Ok(Self::Formal),
            other => Err(SeoForgeError::Validation(format!(
                "unknown tone '{other}' (expected professional, casual, or formal)"
            ))),
        }
    }

    /// Wire name of the tone
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Formal => "formal",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted article
///
/// The slug is fixed at creation and addresses the record for its
/// lifetime; editing the title never regenerates it. The optional
/// metric fields are computed by the remote analysis collaborator,
/// never locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleRecord {
    pub slug: String,
    pub title: String,
    /// Markdown body
    pub content: String,
    pub meta_description: String,
    /// Generation parameters, set at creation
    pub topic: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readability_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an article
///
/// The backend assigns the slug on the remote path; the local path
/// derives it from the title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub meta_description: String,
    pub topic: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
}

/// Partial update for an article
///
/// Each field is independently absent when unchanged; `updated_at`
/// always advances on a successful update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

impl ArticleUpdate {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.meta_description.is_none()
    }
}

/// Listing entry for an article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    pub meta_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl From<&ArticleRecord> for ArticleSummary {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            slug: record.slug.clone(),
            title: record.title.clone(),
            meta_description: record.meta_description.clone(),
            word_count: record.word_count,
            created_at: record.created_at,
        }
    }
}
