//! Remote text-generation API
//!
//! The generation engine is opaque to this crate: it is consumed
//! purely as an asynchronous function from structured request to
//! structured response. [`GenerationClient`] is the seam; the
//! orchestrator, the paraphrase assistant, and the CLI commands only
//! ever see the trait, which is what lets tests substitute a mock.

use crate::error::Result;
use async_trait::async_trait;

pub mod client;
pub mod types;

pub use client::HttpGenerationClient;
pub use types::{
    ArticleRequest, ArticleResponse, HeadingsRequest, HeadingsResponse, ParaphraseConfig,
    ParaphraseRequest, ParaphraseResponse, SectionRequest, SectionResponse, SeoAnalysisRequest,
    SeoAnalysisResponse, SeoContent,
};

/// Client for the remote generation API
///
/// No operation retries automatically and none takes a caller-supplied
/// timeout; failures surface through the transport's own error signal
/// and retry is always a distinct user-triggered action.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate an H1, a set of H2 headings, a meta description, and a
    /// slug for a topic
    async fn generate_headings(&self, request: HeadingsRequest) -> Result<HeadingsResponse>;

    /// Generate the content for one H2 section, given the content of
    /// the sections before it
    async fn generate_section(&self, request: SectionRequest) -> Result<SectionResponse>;

    /// Generate a complete article in one call (quick mode)
    async fn generate_article(&self, request: ArticleRequest) -> Result<ArticleResponse>;

    /// Produce paraphrased variations of a piece of text
    async fn paraphrase(&self, request: ParaphraseRequest) -> Result<ParaphraseResponse>;

    /// Analyze SEO metrics of an article text
    async fn analyze_seo(&self, request: SeoAnalysisRequest) -> Result<SeoAnalysisResponse>;
}
