use super::character::Character;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label shown for jobs whose character has since been deleted.
pub const UNKNOWN_CHARACTER: &str = "Unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Pending,
    Completed,
    Failed,
}

impl VideoStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, VideoStatus::Pending)
    }
}

/// One prompt-to-video generation job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedVideo {
    pub id: Uuid,
    pub prompt: String,
    pub status: VideoStatus,
    /// Fetchable video URL, empty until the job completes
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub error: Option<String>,
    /// Weak reference; the character may have been deleted since
    #[serde(default)]
    pub character_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl GeneratedVideo {
    /// Create a pending job
    pub fn pending(prompt: impl Into<String>, character_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            status: VideoStatus::Pending,
            url: String::new(),
            error: None,
            character_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == VideoStatus::Pending
    }

    /// Name to tag the job with in the gallery.
    ///
    /// `None` when the job was submitted without a character, [`UNKNOWN_CHARACTER`]
    /// when the referenced character no longer exists.
    pub fn character_label<'a>(&self, characters: &'a [Character]) -> Option<&'a str> {
        let id = self.character_id?;
        Some(
            characters
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.as_str())
                .unwrap_or(UNKNOWN_CHARACTER),
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GenerateVideoRequest {
    pub prompt: String,
    #[serde(default)]
    pub character_id: Option<Uuid>,
}
