use super::base::{EndState, Telemetry};
use super::event::LlmEvent;

/// Telemetry that keeps everything it is told, for assertions
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    pub events: Vec<LlmEvent>,
    pub ended: Vec<(EndState, Option<String>)>,
}

impl Telemetry for RecordingTelemetry {
    fn record(&mut self, event: LlmEvent) {
        self.events.push(event);
    }

    fn end_session(&mut self, end_state: EndState, reason: Option<&str>) {
        self.ended.push((end_state, reason.map(str::to_string)));
    }
}
