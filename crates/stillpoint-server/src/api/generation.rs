//! Script generation handler.

use axum::Json;
use axum::extract::State;
use tracing::info;

use stillpoint_types::{BackendKind, RitualCreate, RitualResponse};

use super::{ApiError, ApiState};

/// `POST /api/generate/ritual` -- generate a new ritual script from an
/// intention.
///
/// Audio is not synthesized here; segments get their future locators
/// assigned and the document starts with `pending` audio status.
pub async fn generate(
    State(state): State<ApiState>,
    Json(request): Json<RitualCreate>,
) -> Result<Json<RitualResponse>, ApiError> {
    let provider: BackendKind = request.provider.parse()?;

    info!(
        intention = %request.intention,
        minutes = request.duration_minutes,
        tone = ?request.tone,
        voice = %request.voice_id,
        provider = %provider,
        "generating ritual"
    );

    let ritual = state.generation.generate(&request, provider).await?;
    Ok(Json(RitualResponse { ritual }))
}
