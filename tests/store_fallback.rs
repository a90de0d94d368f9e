use serde_json::json;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use seoforge::store::{
    ArticleStore, ArticleUpdate, FallbackStore, LocalStore, NewArticle, RemoteStore, Tone,
};

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

fn record_body(slug: &str) -> serde_json::Value {
    json!({
        "slug": slug,
        "title": "Coffee Brewing",
        "content": "# Coffee Brewing\n\nFrom the backend.",
        "meta_description": "A description",
        "topic": "coffee",
        "keywords": ["espresso"],
        "tone": "professional",
        "word_count": 5,
        "created_at": "2026-08-01T10:00:00Z",
        "updated_at": "2026-08-01T10:00:00Z"
    })
}

fn local_in(dir: &tempfile::TempDir) -> LocalStore {
    LocalStore::new_with_path(dir.path().join("cache.json")).unwrap()
}

/// Healthy remote: every operation goes to the backend and the local
/// cache is never written.
#[tokio::test]
async fn test_remote_first_when_backend_healthy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"slug": "coffee-brewing"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/coffee-brewing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_body("coffee-brewing")))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = FallbackStore::new(RemoteStore::new(server.uri(), 5).unwrap(), local_in(&dir));

    let slug = store.create(sample("Coffee Brewing")).await.unwrap();
    assert_eq!(slug, "coffee-brewing");

    let record = store.get(&slug).await.unwrap();
    assert_eq!(record.content, "# Coffee Brewing\n\nFrom the backend.");

    // Nothing reached the local cache.
    let dir_local = local_in(&dir);
    assert!(dir_local.list().await.unwrap().is_empty());
}

/// Remote down: the local cache silently serves the whole round trip.
#[tokio::test]
async fn test_backend_down_falls_back_to_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = FallbackStore::new(RemoteStore::new(server.uri(), 5).unwrap(), local_in(&dir));

    let slug = store.create(sample("Offline Article")).await.unwrap();
    assert_eq!(slug, "offline-article");

    store
        .update(
            &slug,
            ArticleUpdate {
                content: Some("revised body".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let record = store.get(&slug).await.unwrap();
    assert_eq!(record.content, "revised body");

    let summaries = store.list().await.unwrap();
    assert_eq!(summaries.len(), 1);
}

/// An article created while the remote was down must stay reachable
/// after the remote comes back and answers 404 for it.
#[tokio::test]
async fn test_cache_only_article_survives_remote_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/offline-article"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    local_in(&dir).create(sample("Offline Article")).await.unwrap();

    let store = FallbackStore::new(RemoteStore::new(server.uri(), 5).unwrap(), local_in(&dir));
    let record = store.get("offline-article").await.unwrap();
    assert_eq!(record.title, "Offline Article");
}

/// Absent from both backends: the final answer is NotFound.
#[tokio::test]
async fn test_missing_everywhere_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = FallbackStore::new(RemoteStore::new(server.uri(), 5).unwrap(), local_in(&dir));

    let err = store.get("never-existed").await.unwrap_err();
    assert!(seoforge::error::is_not_found(&err));
}

/// An unreachable remote (refused connection, not an HTTP error) also
/// falls back.
#[tokio::test]
async fn test_unreachable_backend_falls_back() {
    // Nothing listens on this port.
    let dir = tempfile::tempdir().unwrap();
    let store = FallbackStore::new(
        RemoteStore::new("http://127.0.0.1:1", 1).unwrap(),
        local_in(&dir),
    );

    let slug = store.create(sample("Unreachable Backend")).await.unwrap();
    let record = store.get(&slug).await.unwrap();
    assert_eq!(record.title, "Unreachable Backend");
}

/// The cache path environment override routes the default store to a
/// test file instead of the platform data directory.
#[tokio::test]
#[serial_test::serial]
async fn test_cache_path_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("override.json");
    std::env::set_var("SEOFORGE_CACHE_PATH", &cache_path);

    let store = LocalStore::new().unwrap();
    assert_eq!(store.path(), cache_path.as_path());

    store.create(sample("Env Override")).await.unwrap();
    assert!(cache_path.exists());

    std::env::remove_var("SEOFORGE_CACHE_PATH");
}
