use super::base::{EnvConfig, EnvLookup};
use anyhow::Result;

pub const COHERE_HOST: &str = "https://api.cohere.ai/";
pub const COHERE_API_KEY_PLACEHOLDER: &str = "<your_cohere_key>";

#[derive(Debug, Clone)]
pub struct CohereProviderConfig {
    pub api_key: String,
    pub host: String,
    pub model: Option<String>,
}

impl CohereProviderConfig {
    pub fn new(api_key: String, host: String) -> Self {
        Self {
            api_key,
            host,
            model: None,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

impl EnvConfig for CohereProviderConfig {
    fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self> {
        // A missing key is not an error here; the API rejects the placeholder at call time
        let api_key = Self::get_env_or(lookup, "COHERE_API_KEY", COHERE_API_KEY_PLACEHOLDER)?;
        let host = Self::get_env_or(lookup, "COHERE_API_HOST", COHERE_HOST)?;
        let model = Self::get_env(lookup, "COHERE_MODEL", false, None)?;

        Ok(Self::new(api_key, host).with_model(model))
    }
}
