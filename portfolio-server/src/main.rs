//! `portfolio` binary: run the server or inspect stored contact messages.

use anyhow::Result;
use clap::Parser;
use portfolio_server::cli::format_message;
use portfolio_server::state::build_store;
use portfolio_server::{init_tracing, recent_messages, start_server, AppConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    config.validate()?;
    init_tracing(config.log_file.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            start_server(config).await
        }
        Commands::Messages { limit } => {
            let store = build_store(&config).await?;
            for message in recent_messages(store.as_ref(), limit).await? {
                println!("{}", format_message(&message));
            }
            Ok(())
        }
    }
}
