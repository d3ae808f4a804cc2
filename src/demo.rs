//! The scripted run: two streamed chat requests reported to one telemetry session.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::configs::{agentops::AgentOpsConfig, cohere::CohereProviderConfig};
use crate::errors::ChatError;
use crate::providers::cohere::CohereProvider;
use crate::providers::base::{ChatProvider, Usage};
use crate::providers::types::event::StreamEvent;
use crate::providers::types::message::{ChatMessage, ChatRequest, Connector};
use crate::providers::utils::get_usage;
use crate::render::StreamSink;
use crate::telemetry::agentops::AgentOps;
use crate::telemetry::base::{EndState, Telemetry};
use crate::telemetry::event::LlmEvent;

pub const OPENING_MESSAGE: &str = "Tell me everything you can about AgentOps";
pub const PERSONA: &str =
    "You are Adam Silverman: die-hard advocate of AgentOps, leader in AI Agent observability";
pub const PRIOR_REPLY: &str = "How's your day going? I'd like to tell you about AgentOps";
pub const FOLLOW_UP_MESSAGE: &str = "Based on your newfound knowledge of AgentOps, \
    is Cohere a suitable partner for them and how could they integrate?";

pub fn opening_request() -> ChatRequest {
    ChatRequest::new(OPENING_MESSAGE).with_connector(Connector::web_search())
}

pub fn follow_up_history() -> Vec<ChatMessage> {
    vec![ChatMessage::system(PERSONA), ChatMessage::chatbot(PRIOR_REPLY)]
}

pub fn follow_up_request() -> ChatRequest {
    ChatRequest::new(FOLLOW_UP_MESSAGE)
        .with_history(follow_up_history())
        .with_connector(Connector::web_search())
}

pub fn default_requests() -> Vec<ChatRequest> {
    vec![opening_request(), follow_up_request()]
}

/// Build the chat client, then open the telemetry session.
///
/// The client comes first so that a setup failure never leaves a session open.
pub fn connect(
    cohere: CohereProviderConfig,
    agentops: AgentOpsConfig,
) -> Result<(CohereProvider, AgentOps)> {
    let provider = CohereProvider::new(cohere).context("Failed to set up the Cohere client")?;
    let telemetry = AgentOps::init(agentops).context("Failed to set up the AgentOps client")?;
    Ok((provider, telemetry))
}

/// What one stream produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamOutcome {
    /// Concatenated text of every text-generation event
    pub text: String,
    pub stream_end: Option<Value>,
    pub ignored: usize,
}

impl StreamOutcome {
    pub fn usage(&self) -> Usage {
        self.stream_end.as_ref().map(get_usage).unwrap_or_default()
    }
}

/// Drain a stream into the sink. Tokens are written as they arrive, the
/// stream-end object is written whole, other kinds never touch the text.
pub fn consume_stream<I, S>(events: I, sink: &mut S) -> Result<StreamOutcome>
where
    I: IntoIterator<Item = Result<StreamEvent, ChatError>>,
    S: StreamSink + ?Sized,
{
    let mut outcome = StreamOutcome::default();

    for event in events {
        match event? {
            StreamEvent::TextGeneration { text } => {
                sink.token(&text)?;
                outcome.text.push_str(&text);
            }
            StreamEvent::StreamEnd(payload) => {
                sink.stream_end(&payload)?;
                outcome.stream_end = Some(payload);
            }
            StreamEvent::Other {
                event_type,
                payload,
            } => {
                debug!(%event_type, %payload, "skipping stream event");
                sink.ignored(&event_type)?;
                outcome.ignored += 1;
            }
        }
    }

    Ok(outcome)
}

/// Send one request, print its stream and report it as an LLM event.
pub fn send_request<P, T, S>(
    provider: &P,
    telemetry: &mut T,
    sink: &mut S,
    request: &ChatRequest,
) -> Result<StreamOutcome>
where
    P: ChatProvider + ?Sized,
    T: Telemetry + ?Sized,
    S: StreamSink + ?Sized,
{
    let event = LlmEvent::start(request, provider.model());
    let stream = provider.chat_stream(request)?;
    let outcome = consume_stream(stream, sink)?;

    if outcome.stream_end.is_none() {
        debug!("stream closed without a stream-end event");
    }
    telemetry.record(event.finish(&outcome.text, &outcome.usage()));

    Ok(outcome)
}

/// Run every request in order, then close the session.
///
/// The session ends as `Success` whenever all requests complete, whether or not
/// they produced text. A failed request ends it as `Fail` and aborts the run.
pub fn run<P, T, S>(
    provider: &P,
    telemetry: &mut T,
    sink: &mut S,
    requests: &[ChatRequest],
) -> Result<Vec<StreamOutcome>>
where
    P: ChatProvider + ?Sized,
    T: Telemetry + ?Sized,
    S: StreamSink + ?Sized,
{
    let mut outcomes = Vec::with_capacity(requests.len());

    for (index, request) in requests.iter().enumerate() {
        info!(request = index + 1, of = requests.len(), "sending chat request");
        match send_request(provider, telemetry, sink, request) {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                telemetry.end_session(EndState::Fail, Some(&err.to_string()));
                return Err(err).context(format!("Chat request {} failed", index + 1));
            }
        }
    }

    telemetry.end_session(EndState::Success, None);
    Ok(outcomes)
}
