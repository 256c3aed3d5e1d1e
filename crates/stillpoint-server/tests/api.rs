//! Router-level tests driven through `tower::ServiceExt::oneshot`.
//!
//! The state is built over a temp-dir store and backends constructed
//! with no credentials, so every handler path that does not need a live
//! upstream can be exercised: CRUD flow, status mapping for unknown
//! backends / missing rituals / unconfigured services, voice catalogs,
//! and the audio-status query.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use stillpoint_core::{AudioOrchestrator, GenerationService, RitualStore, StatusReporter};
use stillpoint_llm::{GeneratorConfig, OpenAiGenerator, ScriptGenerator};
use stillpoint_server::{ApiState, build_router};
use stillpoint_tts::BackendRegistry;

struct TestApp {
    router: Router,
    dir: PathBuf,
}

impl TestApp {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("stillpoint-api-{}", uuid::Uuid::new_v4()));
        let store = Arc::new(RitualStore::new(&dir));

        // Backends with no credentials: available() is false, which is
        // exactly what the 503 paths need.
        let backends = Arc::new(temp_env::with_vars(
            [
                ("ELEVENLABS_API_KEY", None::<&str>),
                ("GEMINI_API_KEY", None),
            ],
            BackendRegistry::from_env,
        ));

        let generator: Arc<dyn ScriptGenerator> = Arc::new(OpenAiGenerator::new(GeneratorConfig {
            api_key_env: "STILLPOINT_TEST_ABSENT_KEY".into(),
            ..GeneratorConfig::default()
        }));

        let state = ApiState {
            store: Arc::clone(&store),
            backends: Arc::clone(&backends),
            orchestrator: Arc::new(AudioOrchestrator::new(Arc::clone(&store), Arc::clone(&backends))),
            reporter: Arc::new(StatusReporter::new(Arc::clone(&store))),
            generation: Arc::new(GenerationService::new(Arc::clone(&store), generator)),
        };

        let router = build_router(state, &[], dir.join("audio"));
        Self { router, dir }
    }

    async fn request(&self, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.dir).await;
    }
}

fn minimal_ritual(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "duration": 120,
        "sections": [{
            "type": "body",
            "durationSeconds": 120,
            "segments": [
                {"id": "s1", "type": "text", "text": "Breathe.", "durationSeconds": 10},
                {"id": "s2", "type": "silence", "durationSeconds": 5}
            ]
        }],
        "tags": []
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.request("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    app.cleanup().await;
}

#[tokio::test]
async fn ritual_crud_flow() {
    let app = TestApp::new();

    // Create.
    let (status, body) = app
        .request("POST", "/api/rituals", Some(minimal_ritual("r-crud", "Original")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ritual"]["id"], "r-crud");
    assert_eq!(body["ritual"]["audioStatus"], "pending");

    // List.
    let (status, body) = app.request("GET", "/api/rituals", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Get.
    let (status, body) = app.request("GET", "/api/rituals/r-crud", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Original");

    // Update; the path id wins over the body id.
    let mut updated = minimal_ritual("ignored-id", "Renamed");
    updated["voiceId"] = "lily".into();
    let (status, body) = app.request("PUT", "/api/rituals/r-crud", Some(updated)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ritual"]["id"], "r-crud");
    assert_eq!(body["ritual"]["title"], "Renamed");
    assert_eq!(body["ritual"]["voiceId"], "lily");

    // Delete.
    let (status, body) = app.request("DELETE", "/api/rituals/r-crud", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "r-crud");

    let (status, _) = app.request("GET", "/api/rituals/r-crud", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
async fn missing_ritual_is_404_with_error_body() {
    let app = TestApp::new();
    let (status, body) = app.request("GET", "/api/rituals/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("ghost"));

    let (status, _) = app
        .request("PUT", "/api/rituals/ghost", Some(minimal_ritual("ghost", "x")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request("DELETE", "/api/rituals/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
async fn generate_ritual_without_model_key_is_503() {
    let app = TestApp::new();
    let (status, body) = app
        .request(
            "POST",
            "/api/generate/ritual",
            Some(serde_json::json!({"intention": "calm"})),
        )
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("not configured"));
    app.cleanup().await;
}

#[tokio::test]
async fn unknown_backend_tag_is_400() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            "POST",
            "/api/generate/ritual",
            Some(serde_json::json!({"intention": "calm", "provider": "espeak"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("espeak"));

    let (status, _) = app
        .request(
            "POST",
            "/api/tts/generate-ritual-audio",
            Some(serde_json::json!({"ritualId": "r1", "provider": "espeak"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            "POST",
            "/api/tts/synthesize",
            Some(serde_json::json!({"text": "hi", "provider": "espeak"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("GET", "/api/tts/voices/espeak", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.cleanup().await;
}

#[tokio::test]
async fn ritual_audio_for_missing_ritual_is_404() {
    let app = TestApp::new();
    let (status, _) = app
        .request(
            "POST",
            "/api/tts/generate-ritual-audio",
            Some(serde_json::json!({"ritualId": "ghost", "provider": "elevenlabs"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    app.cleanup().await;
}

#[tokio::test]
async fn ritual_audio_with_unconfigured_backend_is_503() {
    let app = TestApp::new();
    app.request("POST", "/api/rituals", Some(minimal_ritual("r-503", "t")))
        .await;

    let (status, body) = app
        .request(
            "POST",
            "/api/tts/generate-ritual-audio",
            Some(serde_json::json!({"ritualId": "r-503", "provider": "elevenlabs"})),
        )
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("elevenlabs"));

    app.cleanup().await;
}

#[tokio::test]
async fn synthesize_with_unconfigured_backend_is_503() {
    let app = TestApp::new();
    let (status, _) = app
        .request(
            "POST",
            "/api/tts/synthesize",
            Some(serde_json::json!({"text": "hi", "provider": "google"})),
        )
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    app.cleanup().await;
}

#[tokio::test]
async fn voice_catalogs() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/api/tts/voices", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 7);

    let (status, body) = app.request("GET", "/api/tts/voices/google", None).await;
    assert_eq!(status, StatusCode::OK);
    let voices = body.as_array().unwrap();
    assert_eq!(voices.len(), 2);
    assert!(voices.iter().all(|v| v["provider"] == "google"));

    app.cleanup().await;
}

#[tokio::test]
async fn audio_status_query() {
    let app = TestApp::new();

    let (status, _) = app.request("GET", "/api/tts/audio-status/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.request("POST", "/api/rituals", Some(minimal_ritual("r-status", "t")))
        .await;
    let (status, body) = app.request("GET", "/api/tts/audio-status/r-status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ritualId"], "r-status");
    assert_eq!(body["total"], 1);
    assert_eq!(body["generated"], 0);
    assert_eq!(body["missing"], 1);
    assert_eq!(body["status"], "none");

    app.cleanup().await;
}
