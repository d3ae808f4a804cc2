use serde::{Deserialize, Serialize};

use super::types::{event::StreamEvent, message::ChatRequest};
use crate::errors::ChatError;

/// Events of one streamed response, in arrival order.
pub type EventStream = Box<dyn Iterator<Item = Result<StreamEvent, ChatError>>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// A chat backend that answers with a stream of events.
pub trait ChatProvider {
    /// Model name sent with each request, if one was configured
    fn model(&self) -> Option<&str> {
        None
    }

    /// Start a streaming chat request. The returned iterator blocks on the
    /// network as it is advanced.
    fn chat_stream(&self, request: &ChatRequest) -> Result<EventStream, ChatError>;
}
