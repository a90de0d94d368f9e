//! Markdown export with YAML front matter
//!
//! Serializes an article record to a standalone markdown document with
//! a `---`-fenced YAML header, the format static site generators
//! expect, and parses such documents back.

use crate::error::{Result, SeoForgeError};
use crate::store::{ArticleRecord, Tone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const FENCE: &str = "---";

/// The YAML header of an exported article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub slug: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ArticleRecord> for FrontMatter {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            title: record.title.clone(),
            slug: record.slug.clone(),
            meta_description: record.meta_description.clone(),
            keywords: record.keywords.clone(),
            tone: record.tone,
            word_count: record.word_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Render an article as front-mattered markdown
///
/// # Errors
///
/// Returns error if the header fails to serialize.
pub fn to_markdown(record: &ArticleRecord) -> Result<String> {
    let header = serde_yaml::to_string(&FrontMatter::from(record))
        .map_err(SeoForgeError::Yaml)?;
    Ok(format!("{FENCE}\n{header}{FENCE}\n\n{}\n", record.content.trim_end()))
}

/// Split a front-mattered document into header and body
///
/// The closing fence must be a `---` line of its own (or end the
/// document); a line merely starting with `---` is header content.
///
/// # Errors
///
/// `Validation` when the fences are missing or misplaced; a YAML error
/// when the header does not parse.
pub fn parse_front_matter(document: &str) -> Result<(FrontMatter, String)> {
    let rest = document
        .strip_prefix(FENCE)
        .and_then(|r| r.strip_prefix('\n'))
        .ok_or_else(|| {
            SeoForgeError::Validation("document does not start with a front matter fence".into())
        })?;

    let (header_end, body_start) = if let Some(i) = rest.find("\n---\n") {
        (i + 1, i + 5)
    } else if rest.ends_with("\n---") {
        (rest.len() - 3, rest.len())
    } else {
        return Err(SeoForgeError::Validation("front matter is not closed".into()).into());
    };

    let header: FrontMatter =
        serde_yaml::from_str(&rest[..header_end]).map_err(SeoForgeError::Yaml)?;
    let body = rest[body_start..].trim_start_matches('\n').to_string();
    Ok((header, body))
}
