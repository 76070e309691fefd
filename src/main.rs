//! Feedback Sentiment - command-line entry point
//!
//! Submits and inspects feedback against a local or remote libSQL database,
//! and serves the HTTP API.

mod cli;

use clap::{Parser, Subcommand};
use cli::helpers::CliContext;
use feedback_core::{error::Result, FeedbackConfig};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "feedback")]
#[command(about = "Collect feedback, classify its sentiment, and report on it", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    /// Database path (overrides FEEDBACK_DB_PATH and the config file)
    #[arg(long, global = true)]
    db_path: Option<String>,

    /// Config file (defaults to ./feedback.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize database
    Init {
        /// Database path
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Submit feedback
    Submit {
        /// Your name
        #[arg(short, long)]
        name: String,

        /// Your feedback
        #[arg(short, long)]
        text: String,
    },

    /// List all submitted feedback
    List {
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Search feedback by keyword (case-insensitive)
    Search {
        /// Keyword or pattern
        keyword: String,

        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the sentiment distribution
    Stats {
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show submissions per day
    Trend {
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Export all feedback to CSV
    Export {
        /// Output path ("-" for stdout, default feedback.csv)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Delete all feedback
    DeleteAll {
        /// Confirm the irreversible delete
        #[arg(long)]
        yes: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Server address (defaults to the configured address)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::new(format!(
        "feedback_core={level},feedback={level},tower_http={level},libsql=warn",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("feedback v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = CliContext {
        config: FeedbackConfig::load(cli.config.as_deref())?,
        db_path: cli.db_path,
    };

    match cli.command {
        Commands::Init { database } => cli::init::handle(&ctx, database).await,
        Commands::Submit { name, text } => cli::submit::handle(&ctx, name, text).await,
        Commands::List { format } => cli::list::handle_list(&ctx, &format).await,
        Commands::Search { keyword, format } => {
            cli::list::handle_search(&ctx, &keyword, &format).await
        }
        Commands::Stats { format } => cli::stats::handle_distribution(&ctx, &format).await,
        Commands::Trend { format } => cli::stats::handle_trend(&ctx, &format).await,
        Commands::Export { output } => cli::export::handle(&ctx, output).await,
        Commands::DeleteAll { yes } => cli::delete::handle(&ctx, yes).await,
        Commands::Serve { addr } => cli::serve::handle(&ctx, addr).await,
    }
}
