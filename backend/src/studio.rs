use crate::config::StudioConfig;
use crate::gate::{CredentialProvider, KeyGate, SessionCredentials};
use crate::store::{CharacterStore, JobOutcome, JobRegistry};
use crate::veo::{PollPolicy, VeoConnector, VideoServiceConnector, generate_video};
use shared::models::{Character, GenerateVideoRequest, GeneratedVideo, INVALID_KEY_MESSAGE};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq)]
pub enum SubmitError {
    #[error("Prompt is empty")]
    EmptyPrompt,
    #[error("No API key selected")]
    MissingKey,
}

/// Application context: the two session stores, the key gate and the
/// means to reach the video service.
pub struct Studio {
    pub characters: CharacterStore,
    pub videos: JobRegistry,
    pub gate: KeyGate,
    connector: Box<dyn VideoServiceConnector>,
    poll: PollPolicy,
}

impl Studio {
    pub fn new(
        connector: Box<dyn VideoServiceConnector>,
        credentials: Box<dyn CredentialProvider>,
        poll: PollPolicy,
    ) -> Self {
        Self {
            characters: CharacterStore::new(),
            videos: JobRegistry::new(),
            gate: KeyGate::new(credentials),
            connector,
            poll,
        }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(
            Box::new(VeoConnector::new(&config.api_base, &config.model)),
            Box::new(SessionCredentials::new(config.api_key.clone())),
            config.poll.clone(),
        )
    }

    /// Record a pending job and start generating it in the background.
    ///
    /// Returns as soon as the job is in the registry; the spawned task
    /// settles it later. Submissions are independent of each other.
    pub async fn submit(
        self: &Arc<Self>,
        request: GenerateVideoRequest,
    ) -> Result<GeneratedVideo, SubmitError> {
        if request.prompt.trim().is_empty() {
            return Err(SubmitError::EmptyPrompt);
        }
        if !self.gate.has_key().await {
            return Err(SubmitError::MissingKey);
        }
        let Some(api_key) = self.gate.api_key().await else {
            // Selection was dismissed with nothing stored
            self.gate.invalidate(INVALID_KEY_MESSAGE).await;
            return Err(SubmitError::MissingKey);
        };

        let character = match request.character_id {
            Some(id) => match self.characters.get(id).await {
                Ok(character) => Some(character),
                Err(e) => {
                    tracing::warn!(character_id = %id, "Generating without character: {}", e);
                    None
                }
            },
            None => None,
        };

        let video = self
            .videos
            .insert_pending(request.prompt, request.character_id)
            .await;
        tracing::info!(video_id = %video.id, character_id = ?video.character_id, "Video job submitted");

        let studio = Arc::clone(self);
        let (video_id, prompt) = (video.id, video.prompt.clone());
        tokio::spawn(async move {
            studio
                .run_job(video_id, api_key, prompt, character)
                .await;
        });

        Ok(video)
    }

    async fn run_job(
        &self,
        video_id: Uuid,
        api_key: String,
        prompt: String,
        character: Option<Character>,
    ) {
        let service = self.connector.connect(&api_key);
        let result = generate_video(
            service.as_ref(),
            &api_key,
            &prompt,
            character.as_ref(),
            &self.poll,
        )
        .await;

        let outcome = match result {
            Ok(url) => {
                tracing::info!(video_id = %video_id, "Video generation completed");
                JobOutcome::Completed { url }
            }
            Err(e) if e.is_credential_error() => {
                self.gate.invalidate(INVALID_KEY_MESSAGE).await;
                JobOutcome::Failed {
                    error: INVALID_KEY_MESSAGE.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(video_id = %video_id, "Video generation failed: {}", e);
                JobOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        if let Err(e) = self.videos.resolve(video_id, outcome).await {
            tracing::error!(video_id = %video_id, "Failed to record generation result: {}", e);
        }
    }
}
