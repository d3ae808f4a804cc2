use serde_json::{json, Value};

use crate::errors::ChatError;

pub const TEXT_GENERATION: &str = "text-generation";
pub const STREAM_END: &str = "stream-end";

/// One event of a streamed chat response, classified by its `event_type` tag.
///
/// Only token text and the completion marker are interpreted. Everything else
/// (stream start, search queries, search results, citations, ...) is kept as
/// `Other` so callers can decide whether to surface it.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    TextGeneration { text: String },
    /// The full terminal event object, kept verbatim for printing.
    StreamEnd(Value),
    Other { event_type: String, payload: Value },
}

impl StreamEvent {
    pub fn from_value(value: Value) -> Result<Self, ChatError> {
        let event_type = value
            .get("event_type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                ChatError::MalformedEvent(format!("missing event_type in {}", value))
            })?
            .to_string();

        match event_type.as_str() {
            TEXT_GENERATION => {
                let text = value
                    .get("text")
                    .and_then(|t| t.as_str())
                    .ok_or_else(|| {
                        let detail = format!("text-generation without text: {}", value);
                        ChatError::MalformedEvent(detail)
                    })?;
                Ok(StreamEvent::TextGeneration {
                    text: text.to_string(),
                })
            }
            STREAM_END => Ok(StreamEvent::StreamEnd(value)),
            _ => Ok(StreamEvent::Other {
                event_type,
                payload: value,
            }),
        }
    }

    pub fn text_generation(text: &str) -> Self {
        StreamEvent::TextGeneration {
            text: text.to_string(),
        }
    }

    /// Build a stream-end event from its non-tag fields.
    pub fn stream_end(fields: Value) -> Self {
        let mut payload = json!({ "event_type": STREAM_END });
        if let (Some(target), Value::Object(fields)) = (payload.as_object_mut(), fields) {
            target.extend(fields);
        }
        StreamEvent::StreamEnd(payload)
    }

    pub fn event_type(&self) -> &str {
        match self {
            StreamEvent::TextGeneration { .. } => TEXT_GENERATION,
            StreamEvent::StreamEnd(_) => STREAM_END,
            StreamEvent::Other { event_type, .. } => event_type,
        }
    }
}
