//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for tinylink using clap's derive macros.

use clap::{Parser, Subcommand};

/// TinyLink - create and inspect short links from the terminal
#[derive(Parser)]
#[command(name = "tinylink")]
#[command(version)]
#[command(about = "Create, list and inspect TinyLink short URLs", long_about = None)]
pub struct Cli {
    /// Override the link API base URL (default: api.base_url from config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create a short link
    Create {
        /// Destination URL
        long_url: String,

        /// Custom short code (6-8 letters or digits)
        short_code: String,

        /// Copy the new short URL to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// List links created from this machine, with live click counts
    List {
        /// Filter by short code or destination (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,

        /// Skip fetching live data from the server
        #[arg(long)]
        offline: bool,
    },

    /// List every link known to the server
    All {
        /// Filter by short code or destination (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show the analytics dashboard for a short code
    Stats {
        /// Short code to inspect
        code: String,

        /// Seed for reproducible synthetic series
        #[arg(long)]
        seed: Option<u64>,

        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a link created from this machine
    Delete {
        /// Registry id of the link (see `list`)
        id: String,

        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Copy a short URL to the clipboard
    Copy {
        /// Short code whose URL should be copied
        code: String,
    },

    /// Check link API health and latency
    Health,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: tinylink.example.toml)
        output_path: Option<String>,

        /// Overwrite without asking
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from(["tinylink", "create", "https://example.com", "abc123"]).unwrap();
        match cli.command {
            Commands::Create {
                long_url,
                short_code,
                copy,
            } => {
                assert_eq!(long_url, "https://example.com");
                assert_eq!(short_code, "abc123");
                assert!(!copy);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_global_api_url() {
        let cli = Cli::try_parse_from(["tinylink", "health", "--api-url", "https://sho.rt"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("https://sho.rt"));
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = Cli::try_parse_from(["tinylink", "delete", "7", "-y"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { yes: true, .. }));
    }
}
