//! TTS handlers: one-shot synthesis, voice catalogs, ritual audio
//! generation, and the audio-status query.

use axum::Json;
use axum::extract::{Path, State};
use tracing::{debug, info};

use stillpoint_types::{
    AudioStatusReport, BackendKind, RitualAudioReport, RitualAudioRequest, SynthesizeRequest,
    SynthesizeResponse, Voice,
};

use super::{ApiError, ApiState};

/// `POST /api/tts/synthesize` -- synthesize a single piece of text.
///
/// With `ritualId` + `segmentId` the artifact lands under the ritual;
/// otherwise it is stored under a temporary id for immediate playback.
pub async fn synthesize(
    State(state): State<ApiState>,
    Json(request): Json<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>, ApiError> {
    let provider: BackendKind = request.provider.parse()?;

    let preview: String = request.text.chars().take(50).collect();
    info!(
        provider = %provider,
        voice = %request.voice_id,
        text = %preview,
        "one-shot synthesis requested"
    );

    let backend = state.backends.get(provider);
    let result = backend
        .synthesize(&request.text, &request.voice_id, request.speed)
        .await?;

    let (ritual_id, segment_id) = match (request.ritual_id, request.segment_id) {
        (Some(ritual_id), Some(segment_id)) => (ritual_id, segment_id),
        _ => ("temp".to_string(), uuid::Uuid::new_v4().to_string()),
    };
    let audio_url = state
        .store
        .save_audio(&ritual_id, &segment_id, &result.audio, result.encoding)
        .await?;

    info!(
        url = %audio_url,
        duration_secs = result.duration_seconds,
        "one-shot synthesis complete"
    );

    Ok(Json(SynthesizeResponse {
        audio_url,
        duration_seconds: result.duration_seconds,
    }))
}

/// `GET /api/tts/voices` -- every backend's catalog merged.
pub async fn voices(State(state): State<ApiState>) -> Json<Vec<Voice>> {
    let voices = state.backends.all_voices();
    debug!(count = voices.len(), "listed voices");
    Json(voices)
}

/// `GET /api/tts/voices/{provider}` -- one backend's catalog.
pub async fn provider_voices(
    State(state): State<ApiState>,
    Path(provider): Path<String>,
) -> Result<Json<Vec<Voice>>, ApiError> {
    let kind: BackendKind = provider.parse()?;
    Ok(Json(state.backends.get(kind).voices()))
}

/// `POST /api/tts/generate-ritual-audio` -- synthesize audio for every
/// eligible segment of a ritual that lacks it.
pub async fn generate_ritual_audio(
    State(state): State<ApiState>,
    Json(request): Json<RitualAudioRequest>,
) -> Result<Json<RitualAudioReport>, ApiError> {
    let provider: BackendKind = request.provider.parse()?;

    let report = state
        .orchestrator
        .generate_ritual_audio(&request.ritual_id, &request.voice_id, provider)
        .await?;

    Ok(Json(report))
}

/// `GET /api/tts/audio-status/{id}` -- point-in-time audio completeness,
/// derived from artifact existence rather than the coarse document flag.
pub async fn audio_status(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<AudioStatusReport>, ApiError> {
    let report = state.reporter.audio_status(&id).await?;
    Ok(Json(report))
}
