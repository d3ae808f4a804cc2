use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::helpers::get_iso_time;
use crate::providers::base::Usage;
use crate::providers::types::message::{ChatMessage, ChatRequest};

pub const LLM_EVENT_TYPE: &str = "llms";

/// Record of one chat call, reported to the telemetry session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmEvent {
    pub id: Uuid,
    pub event_type: String,
    pub init_timestamp: String,
    pub end_timestamp: Option<String>,
    pub model: Option<String>,
    pub prompt: Vec<ChatMessage>,
    pub completion: Option<String>,
    pub prompt_tokens: Option<i32>,
    pub completion_tokens: Option<i32>,
}

impl LlmEvent {
    /// Open an event at the moment the request is sent
    pub fn start(request: &ChatRequest, model: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: LLM_EVENT_TYPE.to_string(),
            init_timestamp: get_iso_time(),
            end_timestamp: None,
            model: model.map(str::to_string),
            prompt: request.prompt(),
            completion: None,
            prompt_tokens: None,
            completion_tokens: None,
        }
    }

    pub fn finish(mut self, completion: &str, usage: &Usage) -> Self {
        self.end_timestamp = Some(get_iso_time());
        self.completion = Some(completion.to_string());
        self.prompt_tokens = usage.input_tokens;
        self.completion_tokens = usage.output_tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::helpers::safe_serialize;
    use anyhow::Result;

    #[test]
    fn test_start_captures_prompt() {
        let request = ChatRequest::new("Question")
            .with_history(vec![ChatMessage::system("Persona")]);
        let event = LlmEvent::start(&request, Some("command-r"));

        assert_eq!(event.event_type, "llms");
        assert_eq!(event.prompt, request.prompt());
        assert_eq!(event.model.as_deref(), Some("command-r"));
        assert!(event.end_timestamp.is_none());
        assert!(event.completion.is_none());
    }

    #[test]
    fn test_finish_fills_completion_and_tokens() {
        let event = LlmEvent::start(&ChatRequest::new("Hi"), None)
            .finish("Hello", &Usage::new(Some(4), Some(1), Some(5)));

        assert_eq!(event.completion.as_deref(), Some("Hello"));
        assert_eq!(event.prompt_tokens, Some(4));
        assert_eq!(event.completion_tokens, Some(1));
        assert!(event.end_timestamp.is_some());
    }

    #[test]
    fn test_serialized_event_omits_unknowns() -> Result<()> {
        let event = LlmEvent::start(&ChatRequest::new("Hi"), None).finish("", &Usage::default());
        let value = safe_serialize(&event)?;

        assert!(value.get("model").is_none());
        assert!(value.get("prompt_tokens").is_none());
        assert_eq!(value["completion"], "");
        assert_eq!(value["prompt"][0]["role"], "USER");
        Ok(())
    }
}
