// ABOUTME: Recording mock backend for exercising generation flows in tests
// ABOUTME: Queues canned responses and captures every request in arrival order

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::{
    BinaryPart, GenerationBackend, GenerationRequest, GenerationResponse, ImageRequest,
    OperationHandle, OperationStatus, VideoRequest,
};
use crate::error::{GenerationError, GenerationResult};

/// Backend double that replays queued responses and records requests.
/// Panics when a test drains the queue, which is always a broken fixture.
#[derive(Default)]
pub struct MockBackend {
    responses: Mutex<VecDeque<GenerationResult<GenerationResponse>>>,
    image_batches: Mutex<VecDeque<Vec<BinaryPart>>>,
    poll_results: Mutex<VecDeque<GenerationResult<OperationStatus>>>,
    recorded: Mutex<Vec<GenerationRequest>>,
    recorded_videos: Mutex<Vec<VideoRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text reply whose body is the JSON rendering of `value`
    pub fn push_json(&self, value: Value) {
        self.push_text(value.to_string());
    }

    /// Queue a plain text reply
    pub fn push_text(&self, text: impl Into<String>) {
        let response = GenerationResponse {
            text: Some(text.into()),
            ..Default::default()
        };
        self.push_response(response);
    }

    pub fn push_response(&self, response: GenerationResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, error: GenerationError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Queue one batch of image parts for a `generate_images` call
    pub fn push_image_batch(&self, parts: Vec<BinaryPart>) {
        self.image_batches.lock().unwrap().push_back(parts);
    }

    /// Queue one poll outcome for a video operation
    pub fn push_poll(&self, status: OperationStatus) {
        self.poll_results.lock().unwrap().push_back(Ok(status));
    }

    pub fn push_poll_error(&self, error: GenerationError) {
        self.poll_results.lock().unwrap().push_back(Err(error));
    }

    /// Every `execute` request seen so far, in call order
    pub fn recorded(&self) -> Vec<GenerationRequest> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    pub fn recorded_videos(&self) -> Vec<VideoRequest> {
        self.recorded_videos.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn execute(&self, request: GenerationRequest) -> GenerationResult<GenerationResponse> {
        self.recorded.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                panic!(
                    "MockBackend: no queued response for request with profile {:?}",
                    request.profile
                )
            })
    }

    async fn start_video(&self, request: VideoRequest) -> GenerationResult<OperationHandle> {
        self.recorded_videos.lock().unwrap().push(request);
        Ok(OperationHandle {
            name: "operations/mock".to_string(),
        })
    }

    async fn poll_video(&self, handle: &OperationHandle) -> GenerationResult<OperationStatus> {
        self.poll_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("MockBackend: no queued poll result for {}", handle.name))
    }

    async fn generate_images(&self, _request: ImageRequest) -> GenerationResult<Vec<BinaryPart>> {
        Ok(self
            .image_batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("MockBackend: no queued image batch")))
    }
}
