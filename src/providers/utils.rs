use std::io::BufRead;

use serde_json::{json, Map, Value};

use super::base::{EventStream, Usage};
use super::types::{event::StreamEvent, message::ChatRequest};
use crate::errors::ChatError;

/// Convert a ChatRequest to the body of a streaming Cohere `/v1/chat` call
pub fn chat_request_to_cohere_spec(request: &ChatRequest, model: Option<&str>) -> Value {
    let mut payload = Map::new();
    payload.insert("message".to_string(), json!(request.message));

    if !request.chat_history.is_empty() {
        payload.insert("chat_history".to_string(), json!(request.chat_history));
    }
    if !request.connectors.is_empty() {
        payload.insert("connectors".to_string(), json!(request.connectors));
    }
    if let Some(model) = model {
        payload.insert("model".to_string(), json!(model));
    }
    payload.insert("stream".to_string(), json!(true));

    Value::Object(payload)
}

/// Parse one line of a newline-delimited JSON event stream. Blank lines
/// (keep-alives) yield `None`.
pub fn parse_stream_line(line: &str) -> Result<Option<StreamEvent>, ChatError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(line)
        .map_err(|e| ChatError::MalformedEvent(format!("{}: {}", e, line)))?;
    StreamEvent::from_value(value).map(Some)
}

/// Lazily decode events from a newline-delimited JSON body.
pub fn read_event_stream<R: BufRead + 'static>(reader: R) -> EventStream {
    Box::new(reader.lines().filter_map(|line| match line {
        Ok(line) => parse_stream_line(&line).transpose(),
        Err(e) => Some(Err(ChatError::Io(e))),
    }))
}

/// Token counts billed for a response, read from its stream-end event
pub fn get_usage(stream_end: &Value) -> Usage {
    let billed = &stream_end["response"]["meta"]["billed_units"];

    let input_tokens = billed
        .get("input_tokens")
        .and_then(|v| v.as_i64())
        .and_then(|v| i32::try_from(v).ok());

    let output_tokens = billed
        .get("output_tokens")
        .and_then(|v| v.as_i64())
        .and_then(|v| i32::try_from(v).ok());

    let total_tokens = billed
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .and_then(|v| i32::try_from(v).ok())
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => input.checked_add(output),
            _ => None,
        });

    Usage::new(input_tokens, output_tokens, total_tokens)
}
