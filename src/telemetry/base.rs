use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::LlmEvent;

/// Final status a session is closed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndState {
    Success,
    Fail,
}

impl EndState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndState::Success => "Success",
            EndState::Fail => "Fail",
        }
    }
}

impl fmt::Display for EndState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recording session with an observability backend.
///
/// Reporting is best effort: implementations log their own failures and never
/// interrupt the run being observed.
pub trait Telemetry {
    fn record(&mut self, event: LlmEvent);

    fn end_session(&mut self, end_state: EndState, reason: Option<&str>);
}
