//! CLI interface module
//!
//! Each command drives the core (registry, enricher, analytics) and renders
//! the resulting [`ViewState`](crate::view::ViewState).

pub mod commands;
mod context;

pub use context::CliContext;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::TinyLinkError;
use commands::{
    all_links, config_generate, copy_link, create_link, delete_link, health_check, list_links,
    show_stats,
};

#[derive(Debug)]
pub enum CliError {
    /// Error from the client core, shown with its code
    Link(TinyLinkError),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::Link(e) => e.format_simple(),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::Link(e) => e.format_colored(),
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<TinyLinkError> for CliError {
    fn from(err: TinyLinkError) -> Self {
        CliError::Link(err)
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, ctx: &CliContext) -> Result<(), CliError> {
    match cmd {
        Commands::Create {
            long_url,
            short_code,
            copy,
        } => create_link(ctx, &long_url, &short_code, copy).await,

        Commands::List { search, offline } => {
            list_links(ctx, search.as_deref().unwrap_or(""), offline).await
        }

        Commands::All { search } => all_links(ctx, search.as_deref().unwrap_or("")).await,

        Commands::Stats { code, seed, json } => show_stats(ctx, &code, seed, json).await,

        Commands::Delete { id, yes } => delete_link(ctx, &id, yes).await,

        Commands::Copy { code } => copy_link(ctx, &code),

        Commands::Health => health_check(ctx).await,

        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => {
                config_generate(output_path, force)
            }
        },
    }
}
