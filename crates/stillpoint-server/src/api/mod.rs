//! REST API for the Stillpoint backend.
//!
//! Routes are nested under `/api`; synthesized audio artifacts are
//! served statically from the store's audio directory at `/api/audio`.

pub mod generation;
pub mod rituals;
pub mod tts;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use stillpoint_core::{AudioOrchestrator, CoreError, GenerationService, RitualStore, StatusReporter};
use stillpoint_tts::{BackendRegistry, TtsError};
use stillpoint_types::UnknownBackend;

/// Shared state accessible by all API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<RitualStore>,
    pub backends: Arc<BackendRegistry>,
    pub orchestrator: Arc<AudioOrchestrator>,
    pub reporter: Arc<StatusReporter>,
    pub generation: Arc<GenerationService>,
}

/// Build the full router with CORS, request tracing, and static audio
/// serving.
pub fn build_router(state: ApiState, cors_origins: &[String], audio_dir: PathBuf) -> Router {
    let cors = if cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<axum::http::HeaderValue> =
            cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        // Ritual CRUD
        .route("/api/rituals", get(rituals::list).post(rituals::create))
        .route(
            "/api/rituals/{id}",
            get(rituals::get_one)
                .put(rituals::update)
                .delete(rituals::delete_one),
        )
        // Script generation
        .route("/api/generate/ritual", post(generation::generate))
        // TTS
        .route("/api/tts/synthesize", post(tts::synthesize))
        .route("/api/tts/voices", get(tts::voices))
        .route("/api/tts/voices/{provider}", get(tts::provider_voices))
        .route("/api/tts/generate-ritual-audio", post(tts::generate_ritual_audio))
        .route("/api/tts/audio-status/{id}", get(tts::audio_status))
        // Audio artifacts
        .nest_service("/api/audio", ServeDir::new(audio_dir))
        // Health check
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Server start time, set once at process start.
static START_TIME: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();

/// Returns basic health status, version, and uptime.
async fn health_check() -> Json<serde_json::Value> {
    let start = START_TIME.get_or_init(std::time::Instant::now);
    let uptime_secs = start.elapsed().as_secs();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime_secs
    }))
}

/// API-level error with a stable HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    /// A core-service failure (carries its own taxonomy).
    Core(CoreError),
    /// A one-shot synthesis failure.
    Tts(TtsError),
    /// Malformed client input (e.g. an unknown backend tag).
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(CoreError::RitualNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::BackendUnavailable(_))
            | ApiError::Core(CoreError::GeneratorUnavailable(_))
            | ApiError::Tts(TtsError::NotConfigured(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(CoreError::Generation(_))
            | ApiError::Core(CoreError::Synthesis(_))
            | ApiError::Tts(_) => StatusCode::BAD_GATEWAY,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Core(e) => e.to_string(),
            ApiError::Tts(e) => e.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.message(), "request failed");
        } else {
            tracing::warn!(status = %status, error = %self.message(), "request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.message() }))).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Core(e)
    }
}

impl From<TtsError> for ApiError {
    fn from(e: TtsError) -> Self {
        ApiError::Tts(e)
    }
}

impl From<UnknownBackend> for ApiError {
    fn from(e: UnknownBackend) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
