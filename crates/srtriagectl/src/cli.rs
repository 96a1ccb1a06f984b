//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SR Triage CLI
#[derive(Parser, Debug)]
#[command(name = "srtriagectl")]
#[command(about = "SR Triage - service request priority and team classification", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Daemon base URL (overrides [server].bind from the config)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Config file (overrides $SRTRIAGE_CONFIG and defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a query locally with the configured models
    Classify {
        /// Query text (prompted on stdin when omitted)
        query: Option<String>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Submit a request to the daemon (classified and logged there)
    Submit {
        #[arg(long)]
        query: String,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        employee_id: String,

        /// Attachment to upload (repeatable)
        #[arg(long = "file")]
        files: Vec<PathBuf>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Record a human correction of a triage result
    Correct {
        #[arg(long)]
        query: String,

        #[arg(long)]
        predicted_priority: String,

        #[arg(long, default_value = "")]
        predicted_team: String,

        #[arg(long)]
        corrected_priority: String,

        #[arg(long, default_value = "")]
        corrected_team: String,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        employee_id: String,
    },

    /// Show daemon health and loaded labels
    Health {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Training data helpers
    Dataset {
        #[command(subcommand)]
        action: DatasetCommands,
    },
}

/// Dataset subcommands
#[derive(Subcommand, Debug)]
pub enum DatasetCommands {
    /// Write the team-model training subset (awareness rows removed)
    TeamSplit {
        /// Labelled tickets CSV (sr_data_query, priority, team)
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,
    },
}
