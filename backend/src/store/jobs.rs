use super::{StoreError, StoreResult};
use shared::models::{GeneratedVideo, VideoStatus};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Terminal result of a generation job
#[derive(Clone, Debug, PartialEq)]
pub enum JobOutcome {
    Completed { url: String },
    Failed { error: String },
}

/// Generation jobs, newest first.
///
/// Jobs are only ever prepended or updated in place by id, so concurrent
/// completions never disturb each other or the display order.
#[derive(Default)]
pub struct JobRegistry {
    videos: RwLock<Vec<GeneratedVideo>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<GeneratedVideo> {
        self.videos.read().await.clone()
    }

    pub async fn get(&self, video_id: Uuid) -> StoreResult<GeneratedVideo> {
        self.videos
            .read()
            .await
            .iter()
            .find(|v| v.id == video_id)
            .cloned()
            .ok_or(StoreError::NotFound(video_id))
    }

    /// Insert a pending job at the head of the list
    pub async fn insert_pending(
        &self,
        prompt: impl Into<String>,
        character_id: Option<Uuid>,
    ) -> GeneratedVideo {
        let video = GeneratedVideo::pending(prompt, character_id);
        self.videos.write().await.insert(0, video.clone());
        video
    }

    /// Settle a pending job. A job leaves `pending` exactly once; later
    /// attempts fail with [`StoreError::AlreadySettled`].
    pub async fn resolve(&self, video_id: Uuid, outcome: JobOutcome) -> StoreResult<GeneratedVideo> {
        let mut videos = self.videos.write().await;
        let video = videos
            .iter_mut()
            .find(|v| v.id == video_id)
            .ok_or(StoreError::NotFound(video_id))?;
        if !video.is_pending() {
            return Err(StoreError::AlreadySettled(video_id));
        }

        match outcome {
            JobOutcome::Completed { url } => {
                video.status = VideoStatus::Completed;
                video.url = url;
            }
            JobOutcome::Failed { error } => {
                video.status = VideoStatus::Failed;
                video.error = Some(error);
            }
        }
        Ok(video.clone())
    }
}
