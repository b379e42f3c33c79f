use std::collections::HashSet;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use axum::body::Bytes;
use axum_test::TestServer;

use moodreel_api::{
    api::{create_router, AppState},
    error::{AppError, AppResult},
    models::{EmotionScores, MovieTitle},
    services::{
        providers::EmotionProvider, EmotionClassifier, GenreQueries, Recommender, TitleSource,
    },
};

const LISTINGS: &str = "https://listings.test/search?title_type=feature";
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

/// Provider that always reports the same dominant label, or always fails
struct FixedProvider {
    label: Option<&'static str>,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl EmotionProvider for FixedProvider {
    async fn analyze(&self, _image: &[u8]) -> AppResult<EmotionScores> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.label {
            Some(label) => Ok(EmotionScores::new([
                (label.to_string(), 0.9),
                ("sad".to_string(), 0.05),
                ("neutral".to_string(), 0.05),
            ])),
            None => Err(AppError::Classification("No face detected".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Title source returning canned titles and recording requested URLs
struct CannedTitles {
    titles: Option<Vec<MovieTitle>>,
    requested: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl TitleSource for CannedTitles {
    async fn fetch_titles(&self, url: &str) -> AppResult<Vec<MovieTitle>> {
        self.requested.lock().unwrap().push(url.to_string());
        self.titles
            .clone()
            .ok_or_else(|| AppError::ExternalApi("Listings returned status 500".to_string()))
    }
}

struct Harness {
    server: TestServer,
    provider: Arc<FixedProvider>,
    titles: Arc<CannedTitles>,
}

fn create_test_server(label: Option<&'static str>, titles: Option<&[&str]>) -> Harness {
    let provider = Arc::new(FixedProvider {
        label,
        calls: AtomicUsize::new(0),
    });
    let titles = Arc::new(CannedTitles {
        titles: titles.map(|t| t.iter().map(|s| s.to_string()).collect()),
        requested: Mutex::new(Vec::new()),
    });

    let recommender = Recommender::new(
        EmotionClassifier::new(provider.clone()),
        Arc::new(GenreQueries::new(LISTINGS)),
        titles.clone(),
    );
    let app = create_router(AppState::new(recommender));

    Harness {
        server: TestServer::new(app).unwrap(),
        provider,
        titles,
    }
}

#[tokio::test]
async fn test_health_check() {
    let harness = create_test_server(Some("happy"), Some(&[]));
    let response = harness.server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommend_happy_face_returns_comedy_subset() {
    let harness = create_test_server(Some("happy"), Some(&["A", "B", "C"]));

    let response = harness
        .server
        .post("/api/v1/recommendations")
        .add_query_param("limit", 2)
        .bytes(Bytes::from_static(JPEG))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["emotion"], "happy");

    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 2);
    let pool: HashSet<&str> = ["A", "B", "C"].into_iter().collect();
    for movie in movies {
        assert!(pool.contains(movie.as_str().unwrap()));
    }

    let requested = harness.titles.requested.lock().unwrap().clone();
    assert_eq!(requested, vec![format!("{}&genres=comedy", LISTINGS)]);
}

#[tokio::test]
async fn test_recommend_classifies_once() {
    let harness = create_test_server(Some("angry"), Some(&["Heat"]));

    harness
        .server
        .post("/api/v1/recommendations")
        .bytes(Bytes::from_static(JPEG))
        .await
        .assert_status_ok();

    assert_eq!(harness.provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_recommend_defaults_to_ten_titles() {
    let pool: Vec<String> = (0..25).map(|i| format!("Movie {}", i)).collect();
    let pool_refs: Vec<&str> = pool.iter().map(String::as_str).collect();
    let harness = create_test_server(Some("sad"), Some(&pool_refs));

    let response = harness
        .server
        .post("/api/v1/recommendations")
        .bytes(Bytes::from_static(JPEG))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["movies"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_recommend_listing_failure_returns_empty_movies() {
    let harness = create_test_server(Some("sad"), None);

    let response = harness
        .server
        .post("/api/v1/recommendations")
        .bytes(Bytes::from_static(JPEG))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["emotion"], "sad");
    assert!(body["movies"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommend_classifier_failure_uses_neutral_drama() {
    let harness = create_test_server(None, Some(&["Drama One", "Drama Two"]));

    let response = harness
        .server
        .post("/api/v1/recommendations")
        .bytes(Bytes::from_static(JPEG))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["emotion"], "neutral");
    assert_eq!(body["movies"].as_array().unwrap().len(), 2);

    let requested = harness.titles.requested.lock().unwrap().clone();
    assert_eq!(requested, vec![format!("{}&genres=drama", LISTINGS)]);
}

#[tokio::test]
async fn test_recommend_rejects_empty_body() {
    let harness = create_test_server(Some("happy"), Some(&["A"]));

    let response = harness
        .server
        .post("/api/v1/recommendations")
        .bytes(Bytes::new())
        .expect_failure()
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(harness.provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_classify_reports_fallback() {
    let harness = create_test_server(None, Some(&[]));

    let response = harness
        .server
        .post("/api/v1/emotions")
        .bytes(Bytes::from_static(JPEG))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["emotion"], "neutral");
    assert_eq!(body["detected"], false);
}

#[tokio::test]
async fn test_classify_detected_emotion() {
    let harness = create_test_server(Some("surprise"), Some(&[]));

    let response = harness
        .server
        .post("/api/v1/emotions")
        .bytes(Bytes::from_static(JPEG))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["emotion"], "surprise");
    assert_eq!(body["detected"], true);
}

#[tokio::test]
async fn test_genres_table() {
    let harness = create_test_server(Some("happy"), Some(&[]));

    let response = harness.server.get("/api/v1/genres").await;

    response.assert_status_ok();
    let entries: Vec<serde_json::Value> = response.json();
    assert_eq!(entries.len(), 7);
    assert_eq!(entries[0]["emotion"], "angry");
    assert_eq!(entries[0]["genre"], "action");
    assert_eq!(entries[6]["emotion"], "neutral");
    assert_eq!(entries[6]["url"], format!("{}&genres=drama", LISTINGS));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let harness = create_test_server(Some("happy"), Some(&[]));
    let id = "6f1c2e0a-3b4d-4c5e-8f90-123456789abc";

    let response = harness
        .server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_recommend_rejects_malformed_limit_with_json_error() {
    let harness = create_test_server(Some("happy"), Some(&["A"]));

    for bad_limit in ["abc", "-1"] {
        let response = harness
            .server
            .post("/api/v1/recommendations")
            .add_query_param("limit", bad_limit)
            .bytes(Bytes::from_static(JPEG))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["error"].is_string());
    }

    assert_eq!(harness.provider.calls.load(Ordering::SeqCst), 0);
}
