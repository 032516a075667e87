use std::string::FromUtf8Error;

/// Errors raised while loading the startup configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),
}

/// Errors from a call to the remote agent
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The request never produced a response stream (auth, network, throttling, ...)
    #[error("agent request failed: {0}")]
    Service(String),

    /// The response stream broke off or carried an error event
    #[error("agent response stream failed: {0}")]
    Stream(String),

    #[error("response chunk is not valid UTF-8: {0}")]
    Decode(#[from] FromUtf8Error),

    #[error("failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
}
