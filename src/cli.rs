//! CLI interface for ghostlab

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{self, Config};
use crate::server;

#[derive(Parser)]
#[command(name = "ghostlab")]
#[command(about = "Room comfort and energy cost prediction service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default when no command given)
    Serve {
        /// Port to listen on (default: from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind to (default: from config)
        #[arg(long)]
        host: Option<String>,
        /// Path to the SQLite database (default: from config)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Show the current configuration
    Config,
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => serve(None, None, None).await,
        Some(Commands::Serve { port, host, db }) => serve(host, port, db).await,
        Some(Commands::Config) => config::show_config(),
    }
}

/// Resolve flags against the config file and start the server.
async fn serve(host: Option<String>, port: Option<u16>, db: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let db_path = db.unwrap_or_else(|| config.storage.database_path.clone());

    server::start(config, &host, port, &db_path).await
}
