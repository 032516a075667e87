mod bedrock_client;
mod cli;
mod config;
mod error;
mod extract;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use eyre::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crate::bedrock_client::AgentClient;
use crate::cli::chat::ChatContext;
use crate::cli::chat::render::Renderer;
use crate::config::Config;

/// DASH – Dynamic Analytics & Semantic Handling
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ask a single question, print the answer and exit
    #[arg(short, long)]
    input: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    // Logs go to stderr so they stay out of the redrawn page
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Nothing is drawn until the agent identity is known
    let config = Config::from_env()?;

    info!(
        region = %config.region,
        agent_id = %config.agent_id,
        agent_alias_id = %config.agent_alias_id,
        "Starting DASH"
    );

    let client = AgentClient::connect(&config).await;
    let interactive = cli.input.is_none();
    let renderer = Renderer::new(Box::new(io::stdout()), interactive);

    let mut chat_context = ChatContext::new(renderer, cli.input, config, client);
    chat_context.run().await
}
