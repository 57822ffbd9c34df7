//! CLI command definitions and dispatch.

pub mod browse;
pub mod demo;
pub mod rows;
pub mod views;

use clap::{Parser, Subcommand};

use cloudvault_core::result::AppResult;
use cloudvault_service::Vault;

use crate::output::OutputFormat;

/// CloudVault: a simulated cloud drive
#[derive(Debug, Parser)]
#[command(name = "cloudvault", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the contents of a folder (root by default)
    Ls(browse::LsArgs),
    /// Show the whole folder tree
    Tree,
    /// Recently modified files
    Recent(views::RecentArgs),
    /// Files shared by link
    Shared(views::SearchArgs),
    /// Files in the trash
    Trash(views::SearchArgs),
    /// Starred files
    Starred,
    /// Share links past their expiry
    Expired,
    /// Walk through a scripted session against the sample drive
    Demo,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, vault: &Vault) -> AppResult<()> {
        match &self.command {
            Commands::Ls(args) => browse::list(vault, args, self.format).await,
            Commands::Tree => browse::tree(vault, self.format).await,
            Commands::Recent(args) => views::recent(vault, args, self.format).await,
            Commands::Shared(args) => views::shared(vault, args, self.format).await,
            Commands::Trash(args) => views::trash(vault, args, self.format).await,
            Commands::Starred => views::starred(vault, self.format).await,
            Commands::Expired => views::expired(vault, self.format).await,
            Commands::Demo => demo::execute(vault, self.format).await,
        }
    }
}
