//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{FieldsArgs, RenderArgs};

/// Render JSON data files as searchable, paginated tables.
#[derive(Parser, Debug)]
#[command(name = "griddle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a data file as a table
    Render(RenderArgs),
    /// List the fields a data file exposes
    Fields(FieldsArgs),
}
