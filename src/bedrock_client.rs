use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockagentruntime::config::Region;
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::primitives::Blob;
use aws_sdk_bedrockagentruntime::types::ResponseStream;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AgentError;
use crate::extract::extract_answer;

/// One `InvokeAgent` call, named the way the service names its fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    pub agent_id: String,
    pub agent_alias_id: String,
    pub session_id: String,
    pub input_text: String,
}

/// A single event from the agent's completion stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionEvent {
    /// A piece of the answer, if the chunk carried a payload
    Chunk(Option<Vec<u8>>),
    /// Trace, return-control and other events that carry no answer text
    Other(&'static str),
}

pub type CompletionStream = BoxStream<'static, Result<CompletionEvent, AgentError>>;

/// Sends a request to the remote agent and hands back its event stream
#[async_trait]
pub trait AgentTransport: Send + Sync {
    async fn invoke(&self, request: &InvokeRequest) -> Result<CompletionStream, AgentError>;
}

/// Transport backed by the Bedrock Agent Runtime SDK
pub struct BedrockTransport {
    client: aws_sdk_bedrockagentruntime::Client,
}

impl BedrockTransport {
    /// Build an SDK client for the configured region using the default
    /// AWS credential chain.
    pub async fn connect(config: &Config) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self {
            client: aws_sdk_bedrockagentruntime::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl AgentTransport for BedrockTransport {
    async fn invoke(&self, request: &InvokeRequest) -> Result<CompletionStream, AgentError> {
        let output = self
            .client
            .invoke_agent()
            .agent_id(&request.agent_id)
            .agent_alias_id(&request.agent_alias_id)
            .session_id(&request.session_id)
            .input_text(&request.input_text)
            .send()
            .await
            .map_err(|err| AgentError::Service(DisplayErrorContext(&err).to_string()))?;

        // The receiver is dropped after the first stream error.
        let events = stream::unfold(Some(output.completion), |receiver| async move {
            let Some(mut receiver) = receiver else {
                return None;
            };
            match receiver.recv().await {
                Ok(Some(event)) => Some((Ok(CompletionEvent::from(event)), Some(receiver))),
                Ok(None) => None,
                Err(err) => Some((
                    Err(AgentError::Stream(DisplayErrorContext(&err).to_string())),
                    None,
                )),
            }
        });

        Ok(events.boxed())
    }
}

impl From<ResponseStream> for CompletionEvent {
    fn from(event: ResponseStream) -> Self {
        match event {
            ResponseStream::Chunk(part) => CompletionEvent::Chunk(part.bytes.map(Blob::into_inner)),
            ResponseStream::Trace(_) => CompletionEvent::Other("trace"),
            ResponseStream::ReturnControl(_) => CompletionEvent::Other("return_control"),
            _ => CompletionEvent::Other("unknown"),
        }
    }
}

/// Client for one configured agent alias
pub struct AgentClient {
    agent_id: String,
    agent_alias_id: String,
    transport: Box<dyn AgentTransport>,
}

impl AgentClient {
    pub async fn connect(config: &Config) -> Self {
        info!(region = %config.region, "Connecting to Bedrock Agent Runtime");
        Self::new(config, BedrockTransport::connect(config).await)
    }

    pub fn new<T>(config: &Config, transport: T) -> Self
    where
        T: AgentTransport + 'static,
    {
        Self {
            agent_id: config.agent_id.clone(),
            agent_alias_id: config.agent_alias_id.clone(),
            transport: Box::new(transport),
        }
    }

    /// Ask the agent a question within `session_id` and return the
    /// extracted answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected, the response stream
    /// fails part way, or a chunk is not valid UTF-8. Nothing is retried.
    pub async fn ask(&self, user_text: &str, session_id: &str) -> Result<String, AgentError> {
        let request = InvokeRequest {
            agent_id: self.agent_id.clone(),
            agent_alias_id: self.agent_alias_id.clone(),
            session_id: session_id.to_string(),
            input_text: user_text.to_string(),
        };

        debug!("Sending request to Bedrock Agent: {}", serde_json::to_string_pretty(&request)?);

        let mut events = self.transport.invoke(&request).await?;
        let mut chunks = Vec::new();

        while let Some(event) = events.try_next().await? {
            match event {
                CompletionEvent::Chunk(Some(bytes)) => chunks.push(String::from_utf8(bytes)?),
                CompletionEvent::Chunk(None) => debug!("Skipping chunk without payload"),
                CompletionEvent::Other(kind) => debug!("Skipping {} event", kind),
            }
        }

        let full = chunks.concat();
        debug!("Received {} chunks ({} bytes) from Bedrock Agent", chunks.len(), full.len());

        Ok(extract_answer(&full))
    }
}
