use super::base::{EnvConfig, EnvLookup};
use anyhow::Result;

pub const AGENTOPS_ENDPOINT: &str = "https://api.agentops.ai";
pub const AGENTOPS_API_KEY_PLACEHOLDER: &str = "<your_agentops_key>";
pub const DEFAULT_TAGS: &[&str] = &["cohere-example"];

#[derive(Debug, Clone)]
pub struct AgentOpsConfig {
    pub api_key: String,
    pub endpoint: String,
    pub tags: Vec<String>,
}

impl AgentOpsConfig {
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Replace the session tags. An empty list keeps the defaults.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        if !tags.is_empty() {
            self.tags = tags;
        }
        self
    }
}

impl EnvConfig for AgentOpsConfig {
    fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self> {
        let api_key = Self::get_env_or(lookup, "AGENTOPS_API_KEY", AGENTOPS_API_KEY_PLACEHOLDER)?;
        let endpoint = Self::get_env_or(lookup, "AGENTOPS_API_ENDPOINT", AGENTOPS_ENDPOINT)?;

        Ok(Self::new(api_key, endpoint))
    }
}
