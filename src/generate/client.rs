//! HTTP implementation of the generation client
//!
//! Connects to the generation backend over JSON/HTTP with optional
//! bearer authentication. The base URL is configurable so tests can
//! point the client at a mock server.

use crate::config::GenerationConfig;
use crate::error::{Result, SeoForgeError};
use crate::generate::types::{
    ArticleRequest, ArticleResponse, HeadingsRequest, HeadingsResponse, ParaphraseRequest,
    ParaphraseResponse, SectionRequest, SectionResponse, SeoAnalysisRequest, SeoAnalysisResponse,
};
use crate::generate::GenerationClient;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Generation API client over HTTP
pub struct HttpGenerationClient {
    client: Client,
    base: String,
    api_key: Option<String>,
}

impl HttpGenerationClient {
    /// Create a client from the generation section of the config
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("seoforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SeoForgeError::Generation(format!("Failed to create HTTP client: {e}"))
            })?;

        tracing::info!("Initialized generation client: base={}", config.api_base);

        Ok(Self {
            client,
            base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// POST a JSON request to a generation endpoint and parse the response
    async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!("{}/{}", self.base, endpoint);
        tracing::debug!("Calling generation endpoint {}", url);

        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(SeoForgeError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SeoForgeError::Generation(format!(
                "{endpoint} returned {status}: {body}"
            ))
            .into());
        }

        Ok(response.json().await.map_err(SeoForgeError::Http)?)
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate_headings(&self, request: HeadingsRequest) -> Result<HeadingsResponse> {
        self.post("generate-headings", &request).await
    }

    async fn generate_section(&self, request: SectionRequest) -> Result<SectionResponse> {
        self.post("generate-section", &request).await
    }

    async fn generate_article(&self, request: ArticleRequest) -> Result<ArticleResponse> {
        self.post("generate-article", &request).await
    }

    async fn paraphrase(&self, request: ParaphraseRequest) -> Result<ParaphraseResponse> {
        self.post("paraphrase", &request).await
    }

    async fn analyze_seo(&self, request: SeoAnalysisRequest) -> Result<SeoAnalysisResponse> {
        self.post("seo-analysis", &request).await
    }
}
