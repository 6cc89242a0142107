//! Gemini Veo video generation.
//!
//! A generation is a long-running operation: one start call returns an
//! [`Operation`] handle which is refreshed on a fixed interval until it
//! reports `done`. The finished operation carries the URI of the generated
//! video, which can only be fetched with the API key attached.

use async_trait::async_trait;
use shared::models::{Character, MAX_REFERENCE_IMAGES};

mod client;
mod error;
mod poll;
mod reference;
mod types;

pub use client::{GEMINI_API_BASE, VeoApi, VeoConnector};
pub use error::GenerationError;
pub use poll::{DEFAULT_POLL_INTERVAL, PollPolicy, PollTimeout, poll_until};
pub use reference::{decode_reference_image, mime_type_of, strip_base64_header, to_data_url};
pub use types::*;

#[async_trait]
pub trait VideoService: Send + Sync {
    async fn start_generation(
        &self,
        request: &VideoGenerationRequest,
    ) -> Result<Operation, GenerationError>;
    async fn refresh_operation(&self, operation: &Operation) -> Result<Operation, GenerationError>;
}

/// Builds a [`VideoService`] bound to one API key.
///
/// A new service is connected for every generation so that a key selected
/// moments ago is used without any re-initialization.
pub trait VideoServiceConnector: Send + Sync {
    fn connect(&self, api_key: &str) -> Box<dyn VideoService>;
}

/// Build the request for `prompt`, attaching up to three of the character's
/// images as `asset` references.
pub fn build_request(
    prompt: &str,
    character: Option<&Character>,
) -> Result<VideoGenerationRequest, GenerationError> {
    let mut config = VideoGenerationConfig::default();
    if let Some(character) = character.filter(|c| c.has_references()) {
        config.reference_images = character
            .images
            .iter()
            .take(MAX_REFERENCE_IMAGES)
            .map(|image| decode_reference_image(image))
            .collect::<Result<Vec<_>, _>>()?;
    }
    Ok(VideoGenerationRequest {
        prompt: prompt.to_string(),
        config,
    })
}

/// Video URIs are served to key holders only
pub fn authorized_url(uri: &str, api_key: &str) -> String {
    format!("{}&key={}", uri, api_key)
}

/// Generate one video and return a directly fetchable URL.
pub async fn generate_video(
    service: &dyn VideoService,
    api_key: &str,
    prompt: &str,
    character: Option<&Character>,
    policy: &PollPolicy,
) -> Result<String, GenerationError> {
    let request = build_request(prompt, character)?;
    let operation = service.start_generation(&request).await?;
    tracing::info!(
        operation = %operation.name,
        references = request.config.reference_images.len(),
        "Video generation started"
    );

    let operation = poll_until(
        operation,
        policy,
        |op| op.done,
        move |op| async move { service.refresh_operation(&op).await },
    )
    .await?;

    if let Some(status) = &operation.error {
        return Err(GenerationError::Operation(status.message.clone()));
    }
    let uri = operation.video_uri().ok_or(GenerationError::NoResult)?;
    Ok(authorized_url(uri, api_key))
}
