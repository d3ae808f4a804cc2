use std::io::BufReader;
use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::{Client, Response}; // blocking API, the stream is consumed synchronously
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use super::{
    base::{ChatProvider, EventStream},
    types::message::ChatRequest,
    utils::{chat_request_to_cohere_spec, read_event_stream},
};
use crate::configs::cohere::CohereProviderConfig;
use crate::errors::ChatError;

pub struct CohereProvider {
    client: Client,
    config: CohereProviderConfig,
}

impl CohereProvider {
    pub fn new(config: CohereProviderConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    fn post(&self, payload: Value) -> Result<Response, ChatError> {
        let url = format!("{}/v1/chat", self.config.host.trim_end_matches('/'));
        debug!(%url, "posting chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()?;

        match response.status() {
            status if status.is_success() => Ok(response),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() => {
                Err(ChatError::Server { status })
            }
            status => {
                let body = response.text().unwrap_or_default();
                Err(ChatError::Rejected { status, body })
            }
        }
    }
}

impl ChatProvider for CohereProvider {
    fn model(&self) -> Option<&str> {
        self.config.model.as_deref()
    }

    fn chat_stream(&self, request: &ChatRequest) -> Result<EventStream, ChatError> {
        let payload = chat_request_to_cohere_spec(request, self.model());
        let response = self.post(payload)?;
        Ok(read_event_stream(BufReader::new(response)))
    }
}
