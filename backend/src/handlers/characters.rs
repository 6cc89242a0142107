use crate::AppState;
use crate::store::StoreError;
use crate::veo::to_data_url;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use shared::models::{Character, CreateCharacterRequest, MAX_REFERENCE_IMAGES};
use uuid::Uuid;

pub async fn list_characters(State(state): State<AppState>) -> Json<Vec<Character>> {
    Json(state.studio.characters.list().await)
}

pub async fn create_character(
    State(state): State<AppState>,
    Json(payload): Json<CreateCharacterRequest>,
) -> Result<Json<Character>, StatusCode> {
    let character = state.studio.characters.create(payload).await.map_err(|e| {
        tracing::warn!("Rejected character: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    tracing::info!(character_id = %character.id, images = character.images.len(), "Character created");
    Ok(Json(character))
}

/// Create a character from a form upload: a `name` field plus image files.
pub async fn upload_character(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Character>, StatusCode> {
    let mut request = CreateCharacterRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field: {:?}", e);
        StatusCode::BAD_REQUEST
    })? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "name" {
            request.name = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            continue;
        }
        if name != "images" || request.images.len() >= MAX_REFERENCE_IMAGES {
            continue;
        }

        let mime_type = field
            .content_type()
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or("image/png")
            .to_string();
        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read image upload: {:?}", e);
            StatusCode::BAD_REQUEST
        })?;
        if !data.is_empty() {
            request.images.push(to_data_url(&mime_type, &data));
        }
    }

    create_character(State(state), Json(request)).await
}

pub async fn delete_character(
    State(state): State<AppState>,
    Path(character_id): Path<Uuid>,
) -> Result<Json<()>, StatusCode> {
    match state.studio.characters.delete(character_id).await {
        Ok(_) => Ok(Json(())),
        Err(StoreError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete character: {:?}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
