use super::types::{Operation, ReferenceImage, ReferenceType, VideoGenerationRequest};
use super::{GenerationError, VideoService, VideoServiceConnector};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// REST client for one API key.
pub struct VeoApi {
    client: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
}

// ---- wire format ----

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictRequest<'a> {
    instances: [Instance<'a>; 1],
    parameters: Parameters<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Instance<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reference_images: Vec<WireReferenceImage<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireReferenceImage<'a> {
    image: WireImage<'a>,
    reference_type: ReferenceType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireImage<'a> {
    bytes_base64_encoded: String,
    mime_type: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters<'a> {
    sample_count: u32,
    resolution: &'a str,
    aspect_ratio: &'a str,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl<'a> From<&'a ReferenceImage> for WireReferenceImage<'a> {
    fn from(image: &'a ReferenceImage) -> Self {
        Self {
            image: WireImage {
                bytes_base64_encoded: STANDARD.encode(&image.bytes),
                mime_type: &image.mime_type,
            },
            reference_type: image.reference_type,
        }
    }
}

impl<'a> From<&'a VideoGenerationRequest> for PredictRequest<'a> {
    fn from(request: &'a VideoGenerationRequest) -> Self {
        let config = &request.config;
        Self {
            instances: [Instance {
                prompt: &request.prompt,
                reference_images: config.reference_images.iter().map(Into::into).collect(),
            }],
            parameters: Parameters {
                sample_count: config.number_of_videos,
                resolution: &config.resolution,
                aspect_ratio: &config.aspect_ratio,
            },
        }
    }
}

impl VeoApi {
    pub fn new(
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(reqwest::Client::new(), api_base, model, api_key)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool
    pub fn with_client(
        client: reqwest::Client,
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn predict_endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:predictLongRunning",
            self.api_base, self.model
        )
    }

    fn operation_endpoint(&self, name: &str) -> String {
        format!("{}/v1beta/{}", self.api_base, name.trim_start_matches('/'))
    }

    /// Turn non-2xx responses into [`GenerationError::Api`], preferring the
    /// message from Google's error envelope over the raw body.
    async fn parse_operation(response: reqwest::Response) -> Result<Operation, GenerationError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .map(|envelope| envelope.error.message)
                .filter(|message| !message.is_empty())
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), %message, "Veo API request failed");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<Operation>().await?)
    }
}

#[async_trait]
impl VideoService for VeoApi {
    async fn start_generation(
        &self,
        request: &VideoGenerationRequest,
    ) -> Result<Operation, GenerationError> {
        let response = self
            .client
            .post(self.predict_endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&PredictRequest::from(request))
            .send()
            .await?;
        Self::parse_operation(response).await
    }

    async fn refresh_operation(&self, operation: &Operation) -> Result<Operation, GenerationError> {
        let response = self
            .client
            .get(self.operation_endpoint(&operation.name))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        Self::parse_operation(response).await
    }
}

/// Connects [`VeoApi`] handles that share one HTTP connection pool.
#[derive(Clone)]
pub struct VeoConnector {
    client: reqwest::Client,
    api_base: String,
    model: String,
}

impl VeoConnector {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            model: model.into(),
        }
    }
}

impl VideoServiceConnector for VeoConnector {
    fn connect(&self, api_key: &str) -> Box<dyn VideoService> {
        Box::new(VeoApi::with_client(
            self.client.clone(),
            self.api_base.clone(),
            self.model.clone(),
            api_key,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::veo::{VideoGenerationConfig, build_request};
    use shared::models::Character;

    #[test]
    fn request_body_matches_predict_long_running_shape() {
        let character = Character::new(
            "Mira",
            vec![
                "data:image/jpeg;base64,AQID".to_string(),
                "BAUG".to_string(),
            ],
        );
        let request = build_request("a cat walking", Some(&character)).unwrap();

        let body = serde_json::to_value(PredictRequest::from(&request)).unwrap();

        assert_eq!(body["instances"][0]["prompt"], "a cat walking");
        let refs = body["instances"][0]["referenceImages"].as_array().unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0]["referenceType"], "asset");
        assert_eq!(refs[0]["image"]["mimeType"], "image/jpeg");
        assert_eq!(refs[0]["image"]["bytesBase64Encoded"], "AQID");
        assert_eq!(refs[1]["image"]["mimeType"], "image/png");
        assert_eq!(body["parameters"]["sampleCount"], 1);
        assert_eq!(body["parameters"]["resolution"], "720p");
        assert_eq!(body["parameters"]["aspectRatio"], "16:9");
    }

    #[test]
    fn reference_images_are_omitted_when_empty() {
        let request = VideoGenerationRequest {
            prompt: "sunrise".to_string(),
            config: VideoGenerationConfig::default(),
        };

        let body = serde_json::to_value(PredictRequest::from(&request)).unwrap();

        assert!(body["instances"][0].get("referenceImages").is_none());
    }

    #[test]
    fn endpoints_join_base_model_and_operation_name() {
        let api = VeoApi::new("http://localhost:9999/", "veo-test", "k");

        assert_eq!(
            api.predict_endpoint(),
            "http://localhost:9999/v1beta/models/veo-test:predictLongRunning"
        );
        assert_eq!(
            api.operation_endpoint("models/veo-test/operations/42"),
            "http://localhost:9999/v1beta/models/veo-test/operations/42"
        );
    }
}
