//! # Mock Completion Model for Testing
//!
//! Provides a `MockCompletionModel` that implements the `CompletionModel` trait
//! for use in tests. Responses are queued and handed out one per call (the last
//! one repeats), an error can be injected, and every request's preamble and
//! temperature is recorded.

use rig::{
    completion::{
        AssistantContent, CompletionError, CompletionModel, CompletionRequest, CompletionResponse,
    },
    one_or_many::OneOrMany,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What the mock saw for one completion call
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub preamble: Option<String>,
    pub temperature: Option<f64>,
}

/// A mock completion model for testing purposes.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionModel {
    responses: Arc<Mutex<VecDeque<String>>>,
    error: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockCompletionModel {
    /// Creates a new mock model that answers with an empty text response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text response; the last queued response is reused once the queue drains.
    pub async fn set_text_response(&self, text: &str) {
        self.responses.lock().await.push_back(text.to_string());
    }

    /// Make every following call fail with a provider error.
    pub async fn set_error(&self, message: &str) {
        *self.error.lock().await = Some(message.to_string());
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

impl CompletionModel for MockCompletionModel {
    type Response = String;

    async fn completion(
        &self,
        completion_request: CompletionRequest,
    ) -> Result<CompletionResponse<Self::Response>, CompletionError> {
        self.requests.lock().await.push(RecordedRequest {
            preamble: completion_request.preamble.clone(),
            temperature: completion_request.temperature,
        });

        if let Some(message) = self.error.lock().await.clone() {
            return Err(CompletionError::ProviderError(message));
        }

        let text = {
            let mut queue = self.responses.lock().await;
            if queue.len() > 1 {
                queue.pop_front().unwrap_or_default()
            } else {
                queue.front().cloned().unwrap_or_default()
            }
        };

        Ok(CompletionResponse {
            choice: OneOrMany::one(AssistantContent::text(text)),
            raw_response: "".to_string(),
        })
    }
}
