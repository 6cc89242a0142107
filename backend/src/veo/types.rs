use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "veo-3.1-generate-preview";
pub const NUMBER_OF_VIDEOS: u32 = 1;
pub const RESOLUTION: &str = "720p";
/// Reference images are only accepted for landscape output
pub const ASPECT_RATIO: &str = "16:9";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceType {
    /// Keeps a subject's appearance consistent across generations
    Asset,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub reference_type: ReferenceType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoGenerationConfig {
    pub number_of_videos: u32,
    pub resolution: String,
    pub aspect_ratio: String,
    pub reference_images: Vec<ReferenceImage>,
}

impl Default for VideoGenerationConfig {
    fn default() -> Self {
        Self {
            number_of_videos: NUMBER_OF_VIDEOS,
            resolution: RESOLUTION.to_string(),
            aspect_ratio: ASPECT_RATIO.to_string(),
            reference_images: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoGenerationRequest {
    pub prompt: String,
    pub config: VideoGenerationConfig,
}

/// Long-running operation handle as returned by the Gemini API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<OperationResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationStatus>,
}

impl Operation {
    /// URI of the first generated video, if the operation produced one
    pub fn video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSample {
    #[serde(default)]
    pub video: Option<VideoFile>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoFile {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}
