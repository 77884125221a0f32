use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use copilot_agent::SessionSortKey;
use copilot_agent::config::Settings;

mod cli;

#[derive(Parser)]
#[command(name = "copilot-agent")]
#[command(about = "Run GitHub Copilot CLI prompts and inspect its sessions")]
#[command(version)]
struct Cli {
    /// Path to the settings file (defaults to ~/.copilot-agent/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a prompt to Copilot and print the answer
    Prompt {
        /// Prompt text
        text: String,

        /// Model to use (e.g. gpt-5-mini, claude-sonnet-4.5)
        #[arg(long)]
        model: Option<String>,

        /// Resume this session
        #[arg(long, conflicts_with = "continue_last")]
        resume: Option<String>,

        /// Continue the most recent session
        #[arg(long = "continue")]
        continue_last: bool,

        /// Allow all tools, paths and URLs without asking
        #[arg(long)]
        allow_all: bool,

        /// Print output as it arrives
        #[arg(long, conflicts_with = "json")]
        stream: bool,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect stored Copilot sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Create the settings file with defaults
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// List sessions, newest first
    List {
        /// Maximum number of sessions to show
        #[arg(long)]
        limit: Option<usize>,

        /// Sort by "created" or "updated"
        #[arg(long, default_value = "updated")]
        sort: SessionSortKey,

        /// Oldest first
        #[arg(long)]
        asc: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one session
    Show {
        /// Session id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the most recently updated session
    Latest {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Prompt {
            text,
            model,
            resume,
            continue_last,
            allow_all,
            stream,
            json,
        } => {
            let settings = load_settings(cli.config.as_deref())?;
            let args = cli::prompt::PromptArgs {
                text,
                model,
                resume,
                continue_last,
                allow_all,
                stream,
                json,
            };
            cli::prompt::prompt_command(&settings, args).await?;
        }
        Commands::Sessions { command } => {
            let settings = load_settings(cli.config.as_deref())?;
            let store = cli::session::store_dir(&settings);
            match command {
                SessionCommands::List {
                    limit,
                    sort,
                    asc,
                    json,
                } => cli::session::list(&store, limit, sort, asc, json).await?,
                SessionCommands::Show { id, json } => cli::session::show(&store, &id, json).await?,
                SessionCommands::Latest { json } => cli::session::latest(&store, json).await?,
            }
        }
        Commands::Init { force } => {
            cli::init::init_command(cli.config, force)?;
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}
