pub mod config;
pub mod gate;
mod handlers;
pub mod store;
pub mod studio;
pub mod veo;

use crate::config::StudioConfig;
use crate::handlers::{
    create_character, delete_character, generate_video, get_video, key_status, list_characters,
    list_videos, select_key, upload_character,
};
use crate::studio::Studio;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Three reference images travel base64-encoded in one request
const BODY_LIMIT: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub studio: Arc<Studio>,
}

/// Build the studio from `config`, run the startup key check and mount the API.
pub async fn init(router: Router<AppState>, config: &StudioConfig) -> Router<()> {
    let studio = Arc::new(Studio::from_config(config));
    studio.gate.check().await;
    routes(router, AppState { studio })
}

pub fn routes(router: Router<AppState>, state: AppState) -> Router<()> {
    router
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/session", get(key_status))
        .route("/api/session/key", post(select_key))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route("/api/characters/upload", post(upload_character))
        .route("/api/characters/{character_id}", delete(delete_character))
        .route("/api/videos", get(list_videos).post(generate_video))
        .route("/api/videos/{video_id}", get(get_video))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
