use anyhow::{anyhow, Result};
use std::env::{self, VarError};

/// Source of configuration values, `std::env::var` outside of tests.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Result<String, VarError>;

pub trait EnvConfig: Sized {
    /// Load configuration through an arbitrary lookup
    fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self>;

    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(&|key: &str| env::var(key))
    }

    /// Helper function to get environment variables with error handling
    fn get_env(
        lookup: EnvLookup<'_>,
        key: &str,
        required: bool,
        default: Option<String>,
    ) -> Result<Option<String>> {
        match lookup(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) if !required => Ok(default),
            Err(VarError::NotPresent) => Err(anyhow!(
                "Environment variable '{}' is required but not set.",
                key
            )),
            Err(e) => Err(anyhow!("Environment variable '{}' is invalid: {}", key, e)),
        }
    }

    /// Optional value that falls back to `default` when unset
    fn get_env_or(lookup: EnvLookup<'_>, key: &str, default: &str) -> Result<String> {
        Ok(Self::get_env(lookup, key, false, Some(default.to_string()))?
            .unwrap_or_else(|| default.to_string()))
    }
}
