use crate::AppState;
use crate::studio::SubmitError;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{GenerateVideoRequest, GeneratedVideo};
use uuid::Uuid;

pub async fn list_videos(State(state): State<AppState>) -> Json<Vec<GeneratedVideo>> {
    Json(state.studio.videos.list().await)
}

pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
) -> Result<Json<GeneratedVideo>, StatusCode> {
    state
        .studio
        .videos
        .get(video_id)
        .await
        .map(Json)
        .map_err(|_| StatusCode::NOT_FOUND)
}

pub async fn generate_video(
    State(state): State<AppState>,
    Json(payload): Json<GenerateVideoRequest>,
) -> Result<Json<GeneratedVideo>, (StatusCode, String)> {
    state
        .studio
        .submit(payload)
        .await
        .map(Json)
        .map_err(|e| {
            let status = match e {
                SubmitError::EmptyPrompt => StatusCode::BAD_REQUEST,
                SubmitError::MissingKey => StatusCode::UNAUTHORIZED,
            };
            (status, e.to_string())
        })
}
