//! Shared helpers for the backend integration tests.
//!
//! [`FakeVeo`] stands in for the Gemini API. Each prompt gets its own
//! script of [`Step`]s: the first step answers the start call, every
//! following step answers one status refresh.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use backend::gate::SessionCredentials;
use backend::studio::Studio;
use backend::veo::{
    GenerateVideoResponse, GeneratedSample, GenerationError, Operation, OperationResponse,
    OperationStatus, PollPolicy, VideoFile, VideoGenerationRequest, VideoService,
    VideoServiceConnector,
};
use http_body_util::BodyExt;
use shared::models::GeneratedVideo;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_KEY: &str = "test-key";
const OPERATION_PREFIX: &str = "models/veo-3.1-generate-preview/operations/";

#[derive(Clone, Debug)]
pub enum Step {
    /// Operation still running
    Pending,
    /// Operation finished with this video URI
    Done(&'static str),
    /// Operation finished without any generated video
    DoneEmpty,
    /// Operation finished with an operation-level error
    DoneWithError(&'static str),
    /// The call itself fails with an HTTP error
    Fail(u16, &'static str),
}

#[derive(Default)]
struct FakeState {
    scripts: HashMap<String, VecDeque<Step>>,
    requests: Vec<VideoGenerationRequest>,
    keys: Vec<String>,
    refreshes: usize,
}

#[derive(Clone, Default)]
pub struct FakeVeo {
    state: Arc<Mutex<FakeState>>,
}

impl FakeVeo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, prompt: &str, steps: impl IntoIterator<Item = Step>) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(prompt.to_string(), steps.into_iter().collect());
    }

    /// Start requests in the order they arrived
    pub fn requests(&self) -> Vec<VideoGenerationRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// API keys each connection was made with
    pub fn keys(&self) -> Vec<String> {
        self.state.lock().unwrap().keys.clone()
    }

    pub fn refreshes(&self) -> usize {
        self.state.lock().unwrap().refreshes
    }

    fn next_step(&self, prompt: &str) -> Result<Operation, GenerationError> {
        let step = self
            .state
            .lock()
            .unwrap()
            .scripts
            .get_mut(prompt)
            .and_then(|script| script.pop_front());
        let name = format!("{OPERATION_PREFIX}{prompt}");
        match step {
            Some(Step::Pending) => Ok(Operation {
                name,
                ..Default::default()
            }),
            Some(Step::Done(uri)) => Ok(completed(name, Some(uri))),
            Some(Step::DoneEmpty) => Ok(completed(name, None)),
            Some(Step::DoneWithError(message)) => Ok(Operation {
                name,
                done: true,
                response: None,
                error: Some(OperationStatus {
                    code: 3,
                    message: message.to_string(),
                }),
            }),
            Some(Step::Fail(status, message)) => Err(GenerationError::Api {
                status,
                message: message.to_string(),
            }),
            None => Err(GenerationError::Api {
                status: 500,
                message: format!("script exhausted for {prompt:?}"),
            }),
        }
    }
}

fn completed(name: String, uri: Option<&str>) -> Operation {
    Operation {
        name,
        done: true,
        response: Some(OperationResponse {
            generate_video_response: Some(GenerateVideoResponse {
                generated_samples: uri
                    .map(|uri| GeneratedSample {
                        video: Some(VideoFile {
                            uri: Some(uri.to_string()),
                        }),
                    })
                    .into_iter()
                    .collect(),
            }),
        }),
        error: None,
    }
}

#[async_trait]
impl VideoService for FakeVeo {
    async fn start_generation(
        &self,
        request: &VideoGenerationRequest,
    ) -> Result<Operation, GenerationError> {
        self.state.lock().unwrap().requests.push(request.clone());
        self.next_step(&request.prompt)
    }

    async fn refresh_operation(&self, operation: &Operation) -> Result<Operation, GenerationError> {
        self.state.lock().unwrap().refreshes += 1;
        let prompt = operation
            .name
            .strip_prefix(OPERATION_PREFIX)
            .unwrap_or(&operation.name);
        self.next_step(prompt)
    }
}

impl VideoServiceConnector for FakeVeo {
    fn connect(&self, api_key: &str) -> Box<dyn VideoService> {
        self.state.lock().unwrap().keys.push(api_key.to_string());
        Box::new(self.clone())
    }
}

/// A studio wired to `fake`, with the startup key check already done.
pub async fn studio_with(fake: &FakeVeo, api_key: Option<&str>, poll: PollPolicy) -> Arc<Studio> {
    let studio = Arc::new(Studio::new(
        Box::new(fake.clone()),
        Box::new(SessionCredentials::new(api_key.map(str::to_string))),
        poll,
    ));
    studio.gate.check().await;
    studio
}

pub async fn studio(fake: &FakeVeo) -> Arc<Studio> {
    studio_with(fake, Some(TEST_KEY), PollPolicy::default()).await
}

/// Wait for the background task to settle a job.
pub async fn wait_until_settled(studio: &Studio, video_id: uuid::Uuid) -> GeneratedVideo {
    loop {
        let video = studio.videos.get(video_id).await.expect("job exists");
        if !video.is_pending() {
            return video;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

pub fn png(n: u8) -> String {
    backend::veo::to_data_url("image/png", &[0x89, b'P', b'N', b'G', n])
}

pub async fn send(app: axum::Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: axum::Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: axum::Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
