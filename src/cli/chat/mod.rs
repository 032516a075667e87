pub mod conversation_state;
pub mod prompt;
pub mod render;

use std::process::ExitCode;

use conversation_state::{Role, Session};
use eyre::Result;
use prompt::generate_prompt;
use render::Renderer;
use rustyline::error::ReadlineError;
use tracing::{debug, error, info};

use crate::bedrock_client::AgentClient;
use crate::config::Config;

pub struct ChatContext {
    renderer: Renderer,
    input: Option<String>,
    config: Config,
    session: Session,
    client: AgentClient,
}

impl ChatContext {
    pub fn new(
        renderer: Renderer,
        input: Option<String>,
        config: Config,
        client: AgentClient,
    ) -> Self {
        Self {
            renderer,
            input,
            config,
            session: Session::new(),
            client,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        // Single question from the command line: print the answer and stop
        if let Some(input) = self.input.take() {
            self.ask(&input).await?;
            if let Some(answer) = self.session.state().messages().last() {
                let content = answer.content().to_string();
                self.renderer.line(&content)?;
            }
            return Ok(ExitCode::SUCCESS);
        }

        self.redraw()?;
        self.run_interactive().await?;

        Ok(ExitCode::SUCCESS)
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(None);
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    match line.trim() {
                        "/quit" => break,
                        "/help" => self.renderer.help(&self.config)?,
                        _ => self.submit(&line).await?,
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    self.renderer.line(&format!("Error: {}", e))?;
                    break;
                }
            }
        }

        info!("Chat session ended");
        Ok(())
    }

    /// Handle one submitted question and redraw the page.
    pub async fn submit(&mut self, input: &str) -> Result<()> {
        if !self.ask(input).await? {
            return Ok(());
        }
        self.redraw()
    }

    /// Record the question and the agent's reply in the transcript.
    ///
    /// A failed agent call becomes an assistant message so the conversation
    /// can carry on. Returns `false` when the input was blank and nothing
    /// was recorded.
    async fn ask(&mut self, input: &str) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(false);
        }

        self.session.state().append(Role::User, input);
        self.renderer.busy()?;

        let session_id = self.session.state().session_id().to_string();
        debug!(session_id = %session_id, "Asking Bedrock Agent");

        let answer = match self.client.ask(input, &session_id).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Bedrock Agent call failed: {}", e);
                format!("Error calling Bedrock Agent:\n\n`{}`", e)
            }
        };

        self.session.state().append(Role::Assistant, answer);
        Ok(true)
    }

    fn redraw(&mut self) -> Result<()> {
        let state = self.session.state();
        self.renderer.page(&self.config, state.messages())
    }
}

#[cfg(test)]
mod tests {
    use super::conversation_state::Message;
    use super::render::test_support::SharedBuffer;
    use super::render::BUSY_TEXT;
    use super::*;
    use crate::bedrock_client::test_support::{test_config, ScriptedTransport};
    use crate::error::AgentError;

    fn chat(transport: ScriptedTransport, input: Option<&str>) -> (ChatContext, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let config = test_config();
        let client = AgentClient::new(&config, transport);
        let renderer = Renderer::new(Box::new(buffer.clone()), false);
        let context = ChatContext::new(renderer, input.map(str::to_string), config, client);
        (context, buffer)
    }

    fn transcript(context: &mut ChatContext) -> Vec<(Role, String)> {
        context
            .session
            .state()
            .messages()
            .iter()
            .map(|m: &Message| (m.role(), m.content().to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_submit_appends_question_and_answer() {
        let transport = ScriptedTransport::new()
            .reply_text("noise <answer>  Total RTV COGS: $12,345 </answer> trailing");
        let (mut context, buffer) = chat(transport, None);

        context.submit("RTV COGS for Dec 2024?").await.unwrap();

        assert_eq!(
            transcript(&mut context),
            vec![
                (Role::User, "RTV COGS for Dec 2024?".to_string()),
                (Role::Assistant, "Total RTV COGS: $12,345".to_string()),
            ]
        );

        let out = buffer.contents();
        assert!(out.contains(BUSY_TEXT));
        assert!(out.contains("Total RTV COGS: $12,345"));
    }

    #[tokio::test]
    async fn test_blank_submit_is_ignored() {
        let transport = ScriptedTransport::new();
        let (mut context, buffer) = chat(transport.clone(), None);

        context.submit("   ").await.unwrap();

        assert!(transcript(&mut context).is_empty());
        assert!(transport.requests().is_empty());
        assert!(buffer.contents().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_becomes_assistant_message() {
        let transport = ScriptedTransport::new()
            .fail(AgentError::Service("UnrecognizedClientException".to_string()));
        let (mut context, _buffer) = chat(transport, None);

        context.submit("Top 5 reason_code").await.unwrap();

        let messages = transcript(&mut context);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].0, Role::User);

        let (role, content) = &messages[1];
        assert_eq!(*role, Role::Assistant);
        assert!(content.starts_with("Error calling Bedrock Agent:"));
        assert!(content.contains("UnrecognizedClientException"));
    }

    #[tokio::test]
    async fn test_conversation_continues_after_error() {
        let transport = ScriptedTransport::new()
            .fail(AgentError::Stream("timed out".to_string()))
            .reply_text("<answer>retry worked</answer>");
        let (mut context, _buffer) = chat(transport, None);

        context.submit("first").await.unwrap();
        context.submit("second").await.unwrap();

        let messages = transcript(&mut context);
        assert_eq!(messages.len(), 4);
        assert!(messages[1].1.starts_with("Error calling Bedrock Agent:"));
        assert_eq!(messages[3], (Role::Assistant, "retry worked".to_string()));
    }

    #[tokio::test]
    async fn test_session_id_is_stable_across_calls() {
        let transport = ScriptedTransport::new()
            .reply_text("one")
            .reply_text("two")
            .reply_text("three");
        let (mut context, _buffer) = chat(transport.clone(), None);

        for question in ["a", "b", "c"] {
            context.submit(question).await.unwrap();
        }

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        let expected = context.session.state().session_id().to_string();
        assert!(requests.iter().all(|r| r.session_id == expected));
    }

    #[tokio::test]
    async fn test_single_shot_prints_answer() {
        let transport = ScriptedTransport::new().reply_text("<answer>DE: 42</answer>");
        let (mut context, buffer) = chat(transport, Some("Germany RTV?"));

        context.run().await.unwrap();

        assert!(buffer.contents().ends_with("DE: 42\n"));
        assert_eq!(transcript(&mut context).len(), 2);
    }
}
