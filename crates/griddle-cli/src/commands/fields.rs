//! Fields command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use griddle_core::Repository;
use griddle_mem::MemRepository;

#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Path to a JSON array or JSON-lines data file
    pub file: PathBuf,
}

pub fn run(args: FieldsArgs) -> Result<()> {
    let repository = MemRepository::from_json_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    if repository.schema().is_empty() {
        eprintln!("{}", "No fields found.".dimmed());
        return Ok(());
    }

    for field in repository.schema() {
        println!("{field}");
    }

    Ok(())
}
