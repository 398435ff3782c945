//! CLI interface for review-triage.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::config::Settings;
use crate::filter::{normalize, ExclusionMatcher, FileFilter};
use crate::review::{ReviewClient, ReviewOutcome, Reviewer};

/// review-triage: change-set triage and AI review dispatch.
#[derive(Parser)]
#[command(name = "review-triage")]
#[command(about = "Change-set triage and AI review dispatch", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Sends the filtered context and a prompt to the review backend.
    Ask(AskCommand),
    /// Normalizes the context and prints the filtered payload without
    /// calling the backend.
    Filter(FilterCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Ask(cmd) => cmd.execute().await,
            Commands::Filter(cmd) => cmd.execute(),
        }
    }
}

/// Sends the filtered context and a prompt to the review backend.
#[derive(Parser)]
pub struct AskCommand {
    /// Free-text review instruction.
    #[arg(long)]
    pub prompt: String,

    /// Context JSON file; reads stdin when omitted.
    #[arg(long)]
    pub context: Option<PathBuf>,
}

impl AskCommand {
    /// Executes the ask command.
    pub async fn execute(self) -> Result<()> {
        let context = read_context(self.context.as_deref())?;

        let settings = Settings::load()?;
        let client = ReviewClient::new(
            settings.api_key()?,
            settings.base_url(),
            settings.request_timeout(),
        )?;
        let filter = FileFilter::new(ExclusionMatcher::builtin()?);
        let reviewer = Reviewer::new(client, filter);

        match reviewer.review(&context, &self.prompt).await {
            ReviewOutcome::Completed(verdict) => println!("{verdict}"),
            degraded @ ReviewOutcome::Degraded(_) => println!("{}", degraded.into_verdict()),
            ReviewOutcome::Failed(e) => return Err(e).context("Review request failed"),
        }

        Ok(())
    }
}

/// Normalizes the context and prints the filtered payload.
#[derive(Parser)]
pub struct FilterCommand {
    /// Context JSON file; reads stdin when omitted.
    #[arg(long)]
    pub context: Option<PathBuf>,
}

impl FilterCommand {
    /// Executes the filter command.
    pub fn execute(self) -> Result<()> {
        let context = read_context(self.context.as_deref())?;
        let filter = FileFilter::new(ExclusionMatcher::builtin()?);

        let normalized = normalize(&context, &filter);
        println!("{}", serde_json::to_string_pretty(&normalized)?);

        Ok(())
    }
}

/// Reads the context from a file or stdin. Input that is not valid JSON is
/// treated as an opaque string context rather than rejected.
fn read_context(path: Option<&std::path::Path>) -> Result<Value> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read context file: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read context from stdin")?;
            buffer
        }
    };

    Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
}
