use serde_json::json;
use std::time::Duration;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use seoforge::config::GenerationConfig;
use seoforge::generate::{GenerationClient, HttpGenerationClient};
use seoforge::paraphrase::{ParaphraseAssistant, ParaphraseParams, Selection};
use seoforge::session::{Orchestrator, Phase, SectionStatus, SessionForm};
use seoforge::store::{ArticleStore, LocalStore, Tone};

fn client_for(server: &MockServer) -> HttpGenerationClient {
    HttpGenerationClient::new(&GenerationConfig {
        api_base: server.uri(),
        api_key: None,
        timeout_seconds: 5,
        section_pacing_ms: 0,
    })
    .unwrap()
}

fn headings_body() -> serde_json::Value {
    json!({
        "seo_content": {
            "h1_heading": "The Ultimate Guide to Coffee Brewing",
            "h2_headings": ["What is Coffee Brewing?", "Key Benefits", "Common Mistakes"],
            "meta_description": "Learn everything about coffee brewing.",
            "slug": "coffee-brewing"
        }
    })
}

async fn mount_headings(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/generate-headings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(headings_body()))
        .mount(server)
        .await;
}

async fn mount_sections(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/generate-section"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generated_content": "Generated body text for this section.",
            "word_count": 6
        })))
        .mount(server)
        .await;
}

fn form() -> SessionForm {
    SessionForm {
        topic: "coffee brewing".to_string(),
        keywords: vec!["pour over".to_string()],
        tone: Tone::Professional,
    }
}

/// Full wizard flow against a mock backend: headings, all sections,
/// assembly, and save into a local cache.
#[tokio::test]
async fn test_wizard_flow_end_to_end() {
    let server = MockServer::start().await;
    mount_headings(&server).await;
    mount_sections(&server).await;

    let mut orchestrator = Orchestrator::new(client_for(&server), Duration::ZERO);
    orchestrator.generate_headings(form()).await.unwrap();
    assert_eq!(orchestrator.session().phase, Phase::Headings);
    assert_eq!(orchestrator.session().sections.len(), 3);

    orchestrator.generate_all().await.unwrap();
    assert_eq!(orchestrator.session().phase, Phase::Content);
    assert!(orchestrator.session().is_complete());
    assert_eq!(orchestrator.session().total_word_count(), 18);

    let article = orchestrator.session().assemble_article();
    assert!(article.starts_with("# The Ultimate Guide to Coffee Brewing"));
    assert!(article.contains("## What is Coffee Brewing?"));
    assert!(article.contains("## Common Mistakes"));

    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new_with_path(dir.path().join("cache.json")).unwrap();
    let slug = orchestrator.save(&store).await.unwrap();
    assert_eq!(slug, "the-ultimate-guide-to-coffee-brewing");

    let record = store.get(&slug).await.unwrap();
    assert_eq!(record.meta_description, "Learn everything about coffee brewing.");
    assert_eq!(record.word_count, Some(18));
}

/// One section failing must not touch the others, and re-running the
/// bulk generation picks up exactly the unfinished sections.
#[tokio::test]
async fn test_section_failure_is_isolated_and_retryable() {
    let server = MockServer::start().await;
    mount_headings(&server).await;

    // The second heading fails once, then the generic mock takes over.
    Mock::given(method("POST"))
        .and(path("/generate-section"))
        .and(body_partial_json(json!({"h2_heading": "Key Benefits"})))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_sections(&server).await;

    let mut orchestrator = Orchestrator::new(client_for(&server), Duration::ZERO);
    orchestrator.generate_headings(form()).await.unwrap();

    let err = orchestrator.generate_all().await.unwrap_err();
    assert!(err.to_string().contains("model overloaded"));

    let session = orchestrator.session();
    assert_eq!(session.sections[0].status, SectionStatus::Generated);
    assert_eq!(session.sections[1].status, SectionStatus::Failed);
    assert!(session.sections[1].error_message.is_some());
    // The run aborted before the third section.
    assert_eq!(session.sections[2].status, SectionStatus::Pending);

    orchestrator.generate_all().await.unwrap();
    assert!(orchestrator.session().is_complete());
}

/// Heading failure leaves the session in setup with no partial state.
#[tokio::test]
async fn test_heading_failure_keeps_setup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-headings"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut orchestrator = Orchestrator::new(client_for(&server), Duration::ZERO);
    assert!(orchestrator.generate_headings(form()).await.is_err());

    let session = orchestrator.session();
    assert_eq!(session.phase, Phase::Setup);
    assert!(session.headings.is_none());
    assert!(session.sections.is_empty());
    assert!(session.error.is_some());
}

/// The configured API key travels as a bearer token.
#[tokio::test]
async fn test_api_key_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-headings"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(headings_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpGenerationClient::new(&GenerationConfig {
        api_base: server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_seconds: 5,
        section_pacing_ms: 0,
    })
    .unwrap();

    let mut orchestrator = Orchestrator::new(client, Duration::ZERO);
    orchestrator.generate_headings(form()).await.unwrap();
}

/// Paraphrase round trip through the HTTP client and the assistant.
#[tokio::test]
async fn test_paraphrase_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/paraphrase"))
        .and(body_partial_json(json!({
            "text": "quick brown",
            "max_variations": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "original_text": "quick brown",
            "paraphrased_variations": ["fast chestnut", "speedy auburn"],
            "confidence_scores": [0.92, 0.81],
            "processing_time": 0.3
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut assistant = ParaphraseAssistant::new(ParaphraseParams {
        adequacy: 1.0,
        fluency: 1.0,
        diversity: 1.0,
        max_variations: 3,
    });

    let content = "The quick brown fox jumps.";
    assistant.select(content, Selection::new(4, 15)).unwrap();
    assistant.request(&client, content).await.unwrap();

    assert_eq!(assistant.variations().len(), 2);
    assert_eq!(assistant.variations()[0].text, "fast chestnut");

    let (buffer, cursor) = assistant.apply_variation(content, 0).unwrap();
    assert_eq!(buffer, "The fast chestnut fox jumps.");
    assert_eq!(cursor, 4 + "fast chestnut".len());
}

/// SEO analysis response is parsed with its optional fields defaulted.
#[tokio::test]
async fn test_seo_analysis_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/seo-analysis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "word_count": 520,
            "keyword_density": {"coffee": 0.021},
            "readability_score": 68.4,
            "seo_score": 81.0
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let analysis = client
        .analyze_seo(seoforge::generate::SeoAnalysisRequest {
            article_text: "# Coffee\n\nBody.".to_string(),
            target_keywords: vec!["coffee".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(analysis.word_count, 520);
    assert_eq!(analysis.seo_score, 81.0);
    assert!(analysis.suggestions.is_empty());
    assert!(analysis.meta_description_suggestions.is_empty());
}
