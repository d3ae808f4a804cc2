use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::base::{EndState, Telemetry};
use super::event::LlmEvent;
use super::helpers::{get_iso_time, remove_unwanted_items, safe_serialize};
use crate::configs::agentops::AgentOpsConfig;
use crate::errors::TelemetryError;

pub const REPLAY_URL: &str = "https://app.agentops.ai/drilldown";

struct ActiveSession {
    session_id: Uuid,
    jwt: String,
    ended: bool,
}

/// Client for the AgentOps session API. Holds at most one session.
pub struct AgentOps {
    client: Client,
    config: AgentOpsConfig,
    session: Option<ActiveSession>,
}

impl AgentOps {
    /// Build the client and start a session. A session that cannot be started
    /// is logged and leaves the client inactive; only a broken HTTP client is
    /// an error.
    pub fn init(config: AgentOpsConfig) -> Result<Self, TelemetryError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let mut agentops = Self {
            client,
            config,
            session: None,
        };

        match agentops.start_session() {
            Ok(session) => {
                info!(
                    session_id = %session.session_id,
                    "Session Replay: {}?session_id={}",
                    REPLAY_URL,
                    session.session_id
                );
                agentops.session = Some(session);
            }
            Err(e) => warn!("Could not start session: {}", e),
        }

        Ok(agentops)
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.session_id)
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.ended)
    }

    fn start_session(&self) -> Result<ActiveSession, TelemetryError> {
        let session_id = Uuid::new_v4();
        let body = json!({
            "session": {
                "session_id": session_id,
                "init_timestamp": get_iso_time(),
                "tags": self.config.tags,
                "host_env": host_env(),
            }
        });

        let response = self.post("/v2/create_session", body, None)?;
        let jwt = response
            .get("jwt")
            .and_then(|j| j.as_str())
            .ok_or(TelemetryError::MissingToken)?;

        Ok(ActiveSession {
            session_id,
            jwt: jwt.to_string(),
            ended: false,
        })
    }

    /// Open session credentials, or `None` when there is nothing to report to
    fn live_session(&self) -> Option<(Uuid, String)> {
        match &self.session {
            Some(session) if !session.ended => Some((session.session_id, session.jwt.clone())),
            _ => None,
        }
    }

    fn post(&self, path: &str, body: Value, jwt: Option<&str>) -> Result<Value, TelemetryError> {
        let url = format!("{}{}", self.config.endpoint.trim_end_matches('/'), path);
        debug!(%url, "posting telemetry");

        let mut request = self
            .client
            .post(&url)
            .header("X-Agentops-Api-Key", &self.config.api_key)
            .json(&remove_unwanted_items(body));
        if let Some(jwt) = jwt {
            request = request.bearer_auth(jwt);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Rejected {
                path: path.to_string(),
                status,
            });
        }

        let text = response.text()?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl Telemetry for AgentOps {
    fn record(&mut self, event: LlmEvent) {
        let Some((_, jwt)) = self.live_session() else {
            debug!(event_id = %event.id, "no active session, dropping event");
            return;
        };

        let body = match events_body(&event) {
            Ok(body) => body,
            Err(e) => {
                warn!(event_id = %event.id, "Could not serialize event: {}", e);
                return;
            }
        };
        if let Err(e) = self.post("/v2/create_events", body, Some(&jwt)) {
            warn!("Could not record event: {}", e);
        }
    }

    fn end_session(&mut self, end_state: EndState, reason: Option<&str>) {
        let Some((session_id, jwt)) = self.live_session() else {
            warn!("Tried to end a session that is not active");
            return;
        };

        let body = json!({
            "session": {
                "session_id": session_id,
                "end_timestamp": get_iso_time(),
                "end_state": end_state,
                "end_state_reason": reason,
            }
        });
        let result = self.post("/v2/update_session", body, Some(&jwt));

        if let Some(session) = self.session.as_mut() {
            session.ended = true;
        }

        match result {
            Ok(response) => {
                info!(%session_id, %end_state, "Session ended");
                if let Some(cost) = response.get("token_cost") {
                    info!("Session token cost: {}", cost);
                }
            }
            Err(e) => warn!("Could not end session: {}", e),
        }
    }
}

/// Body of a `create_events` call carrying one event
fn events_body(event: &LlmEvent) -> Result<Value, TelemetryError> {
    Ok(json!({ "events": [safe_serialize(event)?] }))
}

fn host_env() -> Value {
    json!({
        "OS": {
            "OS": std::env::consts::OS,
            "Arch": std::env::consts::ARCH,
        },
        "SDK": {
            "Name": env!("CARGO_PKG_NAME"),
            "Version": env!("CARGO_PKG_VERSION"),
        },
    })
}
