//! Wire types for the remote generation API
//!
//! Field names follow the backend contract exactly; these structs are
//! the only place the wire shapes appear.

use crate::store::Tone;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// SEO heading set returned by the headings endpoint
///
/// Immutable once fetched: the wizard works on copies, never on this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeoContent {
    pub h1_heading: String,
    pub h2_headings: Vec<String>,
    pub meta_description: String,
    pub slug: String,
}

/// Request body of `POST /generate-headings`
#[derive(Debug, Clone, Serialize)]
pub struct HeadingsRequest {
    pub topic: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
}

/// Response body of `POST /generate-headings`
#[derive(Debug, Clone, Deserialize)]
pub struct HeadingsResponse {
    pub seo_content: SeoContent,
}

/// Request body of `POST /generate-section`
///
/// `previous_content` carries the already-generated earlier sections
/// so the backend can keep continuity across the article.
#[derive(Debug, Clone, Serialize)]
pub struct SectionRequest {
    pub topic: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
    pub seo_content: SeoContent,
    pub h2_heading: String,
    pub previous_content: String,
}

/// Response body of `POST /generate-section`
#[derive(Debug, Clone, Deserialize)]
pub struct SectionResponse {
    pub generated_content: String,
    pub word_count: u32,
}

/// Paraphrasing knobs, also embedded in quick-mode requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParaphraseConfig {
    pub adequacy: f64,
    pub fluency: f64,
    pub diversity: f64,
    pub max_variations: u32,
}

/// Request body of `POST /paraphrase`
#[derive(Debug, Clone, Serialize)]
pub struct ParaphraseRequest {
    pub text: String,
    pub adequacy: f64,
    pub fluency: f64,
    pub diversity: f64,
    pub max_variations: u32,
}

/// Response body of `POST /paraphrase`
///
/// Variations are ranked by return order; confidence scores carry no
/// ordering guarantee beyond what the backend supplies.
#[derive(Debug, Clone, Deserialize)]
pub struct ParaphraseResponse {
    pub original_text: String,
    pub paraphrased_variations: Vec<String>,
    pub confidence_scores: Vec<f64>,
    pub processing_time: f64,
}

/// Request body of `POST /generate-article` (quick mode)
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRequest {
    pub topic: String,
    pub target_length: u32,
    pub keywords: Vec<String>,
    pub tone: Tone,
    pub include_paraphrasing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paraphrase_config: Option<ParaphraseConfig>,
}

/// Response body of `POST /generate-article`
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleResponse {
    pub generated_article: String,
    pub word_count: u32,
    #[serde(default)]
    pub keyword_density: HashMap<String, f64>,
    pub meta_description: String,
    pub readability_score: f64,
    #[serde(default)]
    pub variations: Option<Vec<String>>,
    pub processing_time: f64,
    #[serde(default)]
    pub seo_content: Option<SeoContent>,
}

/// Request body of `POST /seo-analysis`
#[derive(Debug, Clone, Serialize)]
pub struct SeoAnalysisRequest {
    pub article_text: String,
    pub target_keywords: Vec<String>,
}

/// Response body of `POST /seo-analysis`
#[derive(Debug, Clone, Deserialize)]
pub struct SeoAnalysisResponse {
    pub word_count: u32,
    #[serde(default)]
    pub keyword_density: HashMap<String, f64>,
    pub readability_score: f64,
    #[serde(default)]
    pub meta_description_suggestions: Vec<String>,
    pub seo_score: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_request_wire_shape() {
        let request = HeadingsRequest {
            topic: "coffee brewing".to_string(),
            keywords: vec!["pour over".to_string()],
            tone: Tone::Professional,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["topic"], "coffee brewing");
        assert_eq!(json["tone"], "professional");
        assert_eq!(json["keywords"][0], "pour over");
    }

    #[test]
    fn test_headings_response_parses() {
        let body = r#"{
            "seo_content": {
                "h1_heading": "The Ultimate Guide to Coffee Brewing",
                "h2_headings": ["What is Coffee Brewing?", "Key Benefits"],
                "meta_description": "Learn everything about coffee brewing.",
                "slug": "coffee-brewing"
            }
        }"#;
        let response: HeadingsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.seo_content.h2_headings.len(), 2);
        assert_eq!(response.seo_content.slug, "coffee-brewing");
    }

    #[test]
    fn test_article_response_optional_fields_default() {
        let body = r##"{
            "generated_article": "# Article",
            "word_count": 2,
            "meta_description": "desc",
            "readability_score": 70.5,
            "processing_time": 1.2
        }"##;
        let response: ArticleResponse = serde_json::from_str(body).unwrap();
        assert!(response.keyword_density.is_empty());
        assert!(response.variations.is_none());
        assert!(response.seo_content.is_none());
    }

    #[test]
    fn test_paraphrase_response_parses() {
        let body = r#"{
            "original_text": "hello there",
            "paraphrased_variations": ["hi there", "greetings"],
            "confidence_scores": [0.9, 0.7],
            "processing_time": 0.4
        }"#;
        let response: ParaphraseResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.paraphrased_variations.len(), 2);
        assert_eq!(response.confidence_scores[0], 0.9);
    }
}
