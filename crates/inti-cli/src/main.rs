//! `inti` - integration snippet catalog
//!
//! With no subcommand (or `serve`) it runs the MCP server on stdio. The
//! other subcommands browse the same catalog from a terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use inti_core::{BackendKind, ConfigFile, ConfigLoader};
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "INTI_LOG";

#[derive(Debug, Parser)]
#[command(name = "inti", version, about = "Vendor integration snippets for agents and humans")]
struct Cli {
    /// Storage backend: local or remote
    #[arg(long, global = true)]
    backend: Option<BackendKind>,

    /// Snippet tree root for the local backend
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Origin URL for the remote backend
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Also read <DIR>/.config/inti/config.yaml
    #[arg(long, global = true, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Run the MCP server on stdin/stdout (default)
    Serve,
    /// List vendors in the catalog
    List {
        /// Only vendors whose name or topics contain this text
        #[arg(short, long)]
        query: Option<String>,
        /// Print the raw JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the markdown snippet for a slug
    Get {
        /// Vendor and language slug, e.g. acme/python
        slug: String,
    },
    /// List the selectable storage backends
    Backends,
}

impl Cli {
    /// User file and environment, plus the workspace file when `--workspace` is given
    fn loader(&self) -> ConfigLoader {
        match &self.workspace {
            Some(workspace) => ConfigLoader::new().with_workspace(workspace),
            None => ConfigLoader::new(),
        }
    }

    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            backend: self.backend,
            root: self.root.clone(),
            origin: self.origin.clone(),
        }
    }
}

fn init_tracing(command: &Command, verbose: bool) {
    let default_level = match (verbose, command) {
        (true, _) => "debug",
        (false, Command::Serve) => "info",
        (false, _) => "warn",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout belongs to the MCP transport and to command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Serve);
    init_tracing(&command, cli.verbose);

    match commands::run(&cli.loader(), &cli.overrides(), command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("inti: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["inti"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.overrides(), ConfigFile::default());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "inti",
            "list",
            "--query",
            "billing",
            "--backend",
            "remote",
            "--origin",
            "https://cdn.example.com",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Some(Command::List { ref query, json: false }) if query.as_deref() == Some("billing")
        ));
        let overrides = cli.overrides();
        assert_eq!(overrides.backend, Some(BackendKind::Remote));
        assert_eq!(overrides.origin.as_deref(), Some("https://cdn.example.com"));
    }

    #[test]
    fn test_parse_rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["inti", "--backend", "ftp", "backends"]).is_err());
    }

    #[test]
    fn test_parse_get_requires_slug() {
        assert!(Cli::try_parse_from(["inti", "get"]).is_err());
        let cli = Cli::try_parse_from(["inti", "get", "acme/python"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Get { ref slug }) if slug == "acme/python"));
    }
}
