use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the chat API or reading its event stream.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: {status}")]
    Server { status: StatusCode },

    #[error("Request failed: {status}\n{body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Failed to read event stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed stream event: {0}")]
    MalformedEvent(String),
}

/// Failures talking to the telemetry service. These are logged, not propagated
/// out of a run.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Telemetry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telemetry service rejected {path}: {status}")]
    Rejected { path: String, status: StatusCode },

    #[error("Could not decode telemetry response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No session token in create_session response")]
    MissingToken,
}
