//! CLI parser and the admin message listing.

use clap::{Parser, Subcommand};
use storage::{ContactMessage, ContactStore, StorageError};

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Portfolio site backend: contact form and GitHub proxy", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (config from env; port can override PORT).
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the most recent contact messages, oldest first.
    Messages {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// The last `limit` messages in creation order.
pub async fn recent_messages(
    store: &dyn ContactStore,
    limit: usize,
) -> Result<Vec<ContactMessage>, StorageError> {
    let mut messages = store.list_all().await?;
    let skip = messages.len().saturating_sub(limit);
    messages.drain(..skip);
    Ok(messages)
}

/// One-line rendering for terminal output.
pub fn format_message(message: &ContactMessage) -> String {
    format!(
        "#{} {} {} <{}> [{}] {}",
        message.id,
        message.created_at.format("%Y-%m-%d %H:%M:%S"),
        message.name,
        message.email,
        message.subject,
        message.message.replace('\n', " "),
    )
}
