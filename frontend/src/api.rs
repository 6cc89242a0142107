use gloo_net::http::{Request, Response};
use shared::models::*;
use uuid::Uuid;

const API_BASE: &str = "/api";

/// Turn a non-2xx response into an error carrying the server's message.
async fn ensure_success(response: Response) -> Result<Response, gloo_net::Error> {
    if response.ok() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(gloo_net::Error::GlooError(if message.is_empty() {
        format!("Request failed with status {}", response.status())
    } else {
        message
    }))
}

pub async fn fetch_session() -> Result<KeyStatus, gloo_net::Error> {
    Request::get(&format!("{}/session", API_BASE))
        .send()
        .await?
        .json()
        .await
}

/// `None` reports a dismissed selection form.
pub async fn select_key(api_key: Option<String>) -> Result<KeyStatus, gloo_net::Error> {
    Request::post(&format!("{}/session/key", API_BASE))
        .json(&SelectKeyRequest { api_key })?
        .send()
        .await?
        .json()
        .await
}

pub async fn fetch_characters() -> Result<Vec<Character>, gloo_net::Error> {
    Request::get(&format!("{}/characters", API_BASE))
        .send()
        .await?
        .json()
        .await
}

pub async fn upload_character(
    name: &str,
    images: &[web_sys::File],
) -> Result<Character, gloo_net::Error> {
    let form_data = web_sys::FormData::new()
        .map_err(|_| gloo_net::Error::GlooError("Failed to create FormData".to_string()))?;
    form_data
        .append_with_str("name", name)
        .map_err(|_| gloo_net::Error::GlooError("Failed to append name to FormData".to_string()))?;
    for file in images.iter().take(MAX_REFERENCE_IMAGES) {
        form_data
            .append_with_blob_and_filename("images", file, &file.name())
            .map_err(|_| {
                gloo_net::Error::GlooError("Failed to append image to FormData".to_string())
            })?;
    }

    let response = Request::post(&format!("{}/characters/upload", API_BASE))
        .body(form_data)?
        .send()
        .await?;
    ensure_success(response).await?.json().await
}

pub async fn delete_character(id: Uuid) -> Result<(), gloo_net::Error> {
    let response = Request::delete(&format!("{}/characters/{}", API_BASE, id))
        .send()
        .await?;
    ensure_success(response).await?;
    Ok(())
}

pub async fn fetch_videos() -> Result<Vec<GeneratedVideo>, gloo_net::Error> {
    Request::get(&format!("{}/videos", API_BASE))
        .send()
        .await?
        .json()
        .await
}

pub async fn get_video(id: Uuid) -> Result<GeneratedVideo, gloo_net::Error> {
    let response = Request::get(&format!("{}/videos/{}", API_BASE, id))
        .send()
        .await?;
    ensure_success(response).await?.json().await
}

pub async fn generate_video(
    prompt: String,
    character_id: Option<Uuid>,
) -> Result<GeneratedVideo, gloo_net::Error> {
    let response = Request::post(&format!("{}/videos", API_BASE))
        .json(&GenerateVideoRequest {
            prompt,
            character_id,
        })?
        .send()
        .await?;
    ensure_success(response).await?.json().await
}
