// ABOUTME: CLI argument parsing and command routing for cloud-onboard
//
// Provides command-line interface for:
// - Running the interactive wizard (tui, default)
// - Printing the selectable catalog (catalog)
// - Submitting a request without the TUI (submit)

pub mod catalog;
pub mod submit;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Onboard a cloud subscription or tenant into the security integration
#[derive(Parser)]
#[command(name = "cloud-onboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file to use instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive wizard (default if no command given)
    Tui,

    /// Print the subscriptions, virtual networks and storage accounts
    Catalog,

    /// Fill in the wizard from flags and submit it
    Submit(SubmitArgs),
}

/// Arguments for the submit command
#[derive(clap::Args, Debug, Default)]
pub struct SubmitArgs {
    /// Onboard the whole tenant instead of one subscription
    #[arg(long)]
    pub tenant: bool,

    /// Subscription to onboard
    #[arg(long, conflicts_with = "tenant")]
    pub subscription: Option<String>,

    /// Directory (tenant) id
    #[arg(long)]
    pub tenant_id: Option<String>,

    /// App registration name
    #[arg(long)]
    pub app_name: Option<String>,

    /// Turn flow logs off
    #[arg(long)]
    pub no_flow_logs: bool,

    /// Virtual network to enable flow logs on (repeatable)
    #[arg(long = "vnet")]
    pub vnets: Vec<String>,

    /// Storage account to use (repeatable)
    #[arg(long = "storage")]
    pub storage_accounts: Vec<String>,
}
