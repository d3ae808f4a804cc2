use std::sync::Mutex;

use reqwest::StatusCode;

use super::base::{ChatProvider, EventStream};
use super::types::{event::StreamEvent, message::ChatRequest};
use crate::errors::ChatError;

pub enum MockResponse {
    Events(Vec<StreamEvent>),
    Fail(StatusCode),
}

/// A mock provider that replays pre-configured streams and keeps every request it saw
pub struct MockProvider {
    responses: Mutex<Vec<MockResponse>>,
    received: Mutex<Vec<ChatRequest>>,
}

impl MockProvider {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Same stream for each of `count` requests
    pub fn repeating(events: Vec<StreamEvent>, count: usize) -> Self {
        Self::new((0..count).map(|_| MockResponse::Events(events.clone())).collect())
    }

    pub fn received(&self) -> Vec<ChatRequest> {
        self.received.lock().unwrap().clone()
    }
}

impl ChatProvider for MockProvider {
    fn chat_stream(&self, request: &ChatRequest) -> Result<EventStream, ChatError> {
        self.received.lock().unwrap().push(request.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // An exhausted mock streams nothing
            return Ok(Box::new(std::iter::empty::<Result<StreamEvent, ChatError>>()));
        }
        match responses.remove(0) {
            MockResponse::Events(events) => {
                Ok(Box::new(events.into_iter().map(Ok::<StreamEvent, ChatError>)))
            }
            MockResponse::Fail(status) => Err(ChatError::Server { status }),
        }
    }
}
