//! MaskRAG CLI: the main entry point.
//!
//! Commands:
//! - `serve`   — Start the HTTP gateway
//! - `ask`     — Answer one query over masked messages
//! - `prompt`  — Print the compiled prompt without calling the backend
//! - `modes`   — List the available modes
//! - `doctor`  — Diagnose configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "maskrag",
    about = "MaskRAG — privacy-masked RAG prompt service",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override the bind address
        #[arg(long)]
        host: Option<String>,
    },

    /// Answer a query over masked context messages
    Ask {
        #[command(flatten)]
        input: QueryArgs,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the compiled prompt without calling the backend
    Prompt {
        #[command(flatten)]
        input: QueryArgs,
    },

    /// List available modes
    Modes,

    /// Diagnose configuration
    Doctor,
}

/// Query, context messages and mode shared by `ask` and `prompt`.
#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    /// The user's question
    pub query: String,

    /// A masked context message (repeatable, order is kept)
    #[arg(short = 'm', long = "message")]
    pub messages: Vec<String>,

    /// general, private_finance or learning (anything else means general)
    #[arg(long)]
    pub mode: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::Ask { input, json } => commands::ask::run(input, json).await?,
        Commands::Prompt { input } => commands::prompt::run(input)?,
        Commands::Modes => commands::modes::run(),
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
