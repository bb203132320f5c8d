use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use startlog::commands;

#[derive(Parser)]
#[command(name = "startlog", about = "Gliding club flight-log dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard web server
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
        /// Field coordinates TOML; bundled table used when omitted
        #[arg(long)]
        fields: Option<PathBuf>,
    },
    /// Print a summary of a Startadministratie export without serving
    Summarize {
        /// Path to the .xlsx export
        file: PathBuf,
        #[arg(long)]
        fields: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { host, port, fields } => commands::handle_serve(host, port, fields).await,
        Commands::Summarize { file, fields } => commands::handle_summarize(file, fields),
    }
}
