//! Warden CLI - manage a GitHub account's repositories from the terminal.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

use crate::commands::repos::OutputFormat;

#[derive(Parser)]
#[command(name = "warden")]
#[command(version)]
#[command(about = "Manage your GitHub repositories")]
#[command(
    long_about = "Warden lists, creates, edits, and deletes the authenticated user's GitHub \
repositories, keeping the rendered list consistent with server state."
)]
#[command(after_long_help = r#"EXAMPLES
    List your repositories:
        $ warden list

    Create a repository:
        $ warden create tooling -d "Internal tooling"

    Rename a repository and change its description:
        $ warden update acme widget --rename gadget -d "Now a gadget"

    Delete a repository without the confirmation prompt:
        $ warden delete acme widget --yes

    Generate shell completions:
        $ warden completions bash > ~/.local/share/bash-completion/completions/warden

CONFIGURATION
    Warden reads configuration from:
      1. ~/.config/warden/config.toml (or $XDG_CONFIG_HOME/warden/config.toml)
      2. ./warden.toml
      3. Environment variables (WARDEN_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    WARDEN_GITHUB_TOKEN    GitHub personal access token
    WARDEN_GITHUB_HOST     API host (default: https://api.github.com)
"#)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List your repositories
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Create a repository
    Create {
        /// Repository name (no whitespace)
        name: String,

        /// Repository description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Update a repository's name and description
    Update {
        /// Owner login
        owner: String,

        /// Current repository name
        name: String,

        /// New repository name (defaults to the current name)
        #[arg(long)]
        rename: Option<String>,

        /// New repository description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a repository
    Delete {
        /// Owner login
        owner: String,

        /// Repository name
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Structured logging for non-TTY use; interactive runs stay quiet.
    if !Term::stdout().is_term() {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warden=info,warden_cli=info"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();
    let cli = Cli::parse();

    if let Err(err) = run(cli, &config).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &config::Config) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Completions { shell } = &cli.command {
        commands::meta::handle_completions(*shell);
        return Ok(());
    }

    let session = commands::Session::new(config)?;

    match cli.command {
        Commands::List { output } => commands::repos::handle_list(&session, output).await,
        Commands::Create { name, description } => {
            commands::repos::handle_create(&session, name, description).await
        }
        Commands::Update {
            owner,
            name,
            rename,
            description,
        } => commands::repos::handle_update(&session, &owner, &name, rename, description).await,
        Commands::Delete { owner, name, yes } => {
            commands::repos::handle_delete(&session, &owner, &name, yes).await
        }
        Commands::Completions { .. } => Ok(()),
    }
}
