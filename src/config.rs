use std::env;

use crate::error::ConfigError;

pub const DEFAULT_REGION: &str = "us-east-1";

/// Region and agent identity, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub region: String,
    pub agent_id: String,
    pub agent_alias_id: String,
}

impl Config {
    /// Load the configuration from the process environment.
    ///
    /// `AWS_REGION` falls back to [`DEFAULT_REGION`]. `AGENT_ID` and
    /// `AGENT_ALIAS_ID` are required so a misconfigured shell never talks to
    /// the wrong agent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let region = read("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let agent_id = read("AGENT_ID").ok_or(ConfigError::MissingVar("AGENT_ID"))?;
        let agent_alias_id =
            read("AGENT_ALIAS_ID").ok_or(ConfigError::MissingVar("AGENT_ALIAS_ID"))?;

        Ok(Self {
            region,
            agent_id,
            agent_alias_id,
        })
    }
}
