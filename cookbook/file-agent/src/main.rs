//! Interactive front end: read a line of user text, print the agent's reply.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use scribe_engine::{file_toolkit, Agent, AgentConfig, EngineError, HttpGateway};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "file-agent",
    about = "Chat with a local model that can read, list and edit files"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "agent.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> scribe_engine::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match AgentConfig::from_path(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, path = %cli.config.display(), "using default configuration");
            AgentConfig::default()
        }
    };

    let capabilities = file_toolkit();
    for capability in capabilities.describe() {
        println!("{:<12} {}", capability.name, capability.description);
    }

    let gateway = Arc::new(HttpGateway::from_config(&config)?);
    let mut agent = Agent::new(gateway)
        .with_capabilities(capabilities)
        .with_system_prompt(config.system_prompt.clone())
        .with_input_limit(config.input_limit)
        .with_max_rounds(config.max_rounds);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match agent.respond(line.trim()).await {
            Ok(reply) => println!("{reply}"),
            Err(EngineError::InputTooLong { limit }) => {
                println!("input too long (max {limit} characters)");
            }
            Err(EngineError::RoundLimitExceeded { limit }) => {
                println!("stopped after {limit} tool rounds without a final reply");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}
