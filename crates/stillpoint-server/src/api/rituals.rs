//! Ritual CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use tracing::{debug, info};

use stillpoint_types::{Ritual, RitualResponse};

use super::{ApiError, ApiState};

/// `GET /api/rituals` -- list all rituals, newest first.
pub async fn list(State(state): State<ApiState>) -> Result<Json<Vec<Ritual>>, ApiError> {
    let rituals = state.store.list().await?;
    debug!(count = rituals.len(), "listed rituals");
    Ok(Json(rituals))
}

/// `GET /api/rituals/{id}` -- fetch one ritual.
pub async fn get_one(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Ritual>, ApiError> {
    let ritual = state.store.load(&id).await?;
    Ok(Json(ritual))
}

/// `POST /api/rituals` -- store a client-authored ritual document.
pub async fn create(
    State(state): State<ApiState>,
    Json(ritual): Json<Ritual>,
) -> Result<Json<RitualResponse>, ApiError> {
    info!(ritual = %ritual.id, title = %ritual.title, "creating ritual");
    state.store.save(&ritual).await?;
    Ok(Json(RitualResponse { ritual }))
}

/// `PUT /api/rituals/{id}` -- replace an existing ritual. The path id
/// wins over whatever id the body carries.
pub async fn update(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(mut ritual): Json<Ritual>,
) -> Result<Json<RitualResponse>, ApiError> {
    // 404 unless the document already exists.
    state.store.load(&id).await?;

    ritual.id = id;
    ritual.touch();
    state.store.save(&ritual).await?;
    info!(ritual = %ritual.id, "ritual updated");
    Ok(Json(RitualResponse { ritual }))
}

/// `DELETE /api/rituals/{id}` -- remove the document and every audio
/// artifact under its id.
pub async fn delete_one(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.store.load(&id).await?;
    state.store.delete(&id).await?;
    info!(ritual = %id, "ritual deleted");
    Ok(Json(serde_json::json!({ "message": "Ritual deleted", "id": id })))
}
