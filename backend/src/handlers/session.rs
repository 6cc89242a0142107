use crate::AppState;
use axum::{Json, extract::State};
use shared::models::{KeyStatus, SelectKeyRequest};

pub async fn key_status(State(state): State<AppState>) -> Json<KeyStatus> {
    Json(state.studio.gate.status().await)
}

pub async fn select_key(
    State(state): State<AppState>,
    Json(payload): Json<SelectKeyRequest>,
) -> Json<KeyStatus> {
    Json(state.studio.gate.select(payload.api_key).await)
}
