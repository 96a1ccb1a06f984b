//! Command implementations

use crate::cli::{Cli, Commands, DatasetCommands};
use crate::client::{Attachment, SubmitForm, TriageClient};
use crate::output;
use anyhow::{Context, Result};
use srtriage_common::api::CorrectionRequest;
use srtriage_common::{dataset, Config, TriageEngine};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const QUERY_PROMPT: &str = "Please enter the service request query: ";

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Classify { query, json } => {
            let config = load_config(cli.config.as_deref())?;
            classify(&config, query, json)
        }
        Commands::Submit {
            query,
            name,
            employee_id,
            files,
            json,
        } => {
            let client = connect(cli.config.as_deref(), cli.server)?;
            submit(&client, query, name, employee_id, &files, json).await
        }
        Commands::Correct {
            query,
            predicted_priority,
            predicted_team,
            corrected_priority,
            corrected_team,
            name,
            employee_id,
        } => {
            let client = connect(cli.config.as_deref(), cli.server)?;
            let correction = CorrectionRequest {
                name,
                employee_id,
                query,
                predicted_priority,
                predicted_team,
                corrected_priority,
                corrected_team,
            };
            correct(&client, &correction).await
        }
        Commands::Health { json } => {
            let client = connect(cli.config.as_deref(), cli.server)?;
            health(&client, json).await
        }
        Commands::Dataset { action } => match action {
            DatasetCommands::TeamSplit { input, output } => team_split(&input, &output),
        },
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load configuration")
}

fn connect(config_path: Option<&Path>, server: Option<String>) -> Result<TriageClient> {
    let base_url = match server {
        Some(url) => url,
        None => load_config(config_path)?.server.base_url(),
    };
    debug!("Using daemon at {}", base_url);
    Ok(TriageClient::new(base_url)?)
}

/// Classify one query in-process
pub fn classify(config: &Config, query: Option<String>, json: bool) -> Result<()> {
    // Load before prompting so a missing model fails fast
    let engine = TriageEngine::from_config(&config.models).context("Failed to load classifiers")?;

    let query = match query {
        Some(query) => query,
        None => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            prompt_query(&mut stdin.lock(), &mut stdout)?
        }
    };

    let result = engine.classify(&query)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::display_triage(&result);
    }
    Ok(())
}

/// Print the query prompt and read one line, without its line ending
pub fn prompt_query(input: &mut impl BufRead, prompt_out: &mut impl Write) -> Result<String> {
    write!(prompt_out, "{}", QUERY_PROMPT)?;
    prompt_out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read query")?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

pub async fn submit(
    client: &TriageClient,
    query: String,
    name: String,
    employee_id: String,
    files: &[PathBuf],
    json: bool,
) -> Result<()> {
    let mut attachments = Vec::with_capacity(files.len());
    for path in files {
        attachments.push(read_attachment(path).await?);
    }

    let response = client
        .classify(SubmitForm {
            name,
            employee_id,
            query,
            attachments,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        output::display_submission(&response);
    }
    Ok(())
}

async fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read attachment {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Attachment { file_name, bytes })
}

pub async fn correct(client: &TriageClient, correction: &CorrectionRequest) -> Result<()> {
    client.correct(correction).await?;
    output::display_success("Correction recorded");
    Ok(())
}

pub async fn health(client: &TriageClient, json: bool) -> Result<()> {
    let health = client.health().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else {
        output::display_health(&health);
    }
    Ok(())
}

/// Write the team-model training subset of a labelled ticket file
pub fn team_split(input: &Path, output_path: &Path) -> Result<()> {
    let rows = dataset::read_tickets(input)?;
    let kept = dataset::team_training_set(&rows);
    dataset::write_tickets(output_path, &kept)?;

    output::display_success(&format!(
        "Kept {} of {} rows for team training ({} awareness rows dropped) -> {}",
        kept.len(),
        rows.len(),
        rows.len() - kept.len(),
        output_path.display()
    ));
    Ok(())
}
