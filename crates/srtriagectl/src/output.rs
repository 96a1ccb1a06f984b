//! Terminal output, ASCII only

use owo_colors::OwoColorize;
use srtriage_common::api::{ClassifyResponse, HealthResponse};
use srtriage_common::TriageResult;

/// Shown instead of a team when the priority stage returned awareness
pub const TEAM_SKIPPED: &str = "Team assignment skipped (awareness query)";

/// Plain lines describing a triage result
pub fn triage_lines(result: &TriageResult) -> Vec<String> {
    let mut lines = vec![
        format!("Query: {}", result.query),
        format!("Predicted Priority: {}", result.priority),
    ];
    match &result.team {
        Some(team) => lines.push(format!("Assigned Team: {}", team)),
        None => lines.push(TEAM_SKIPPED.to_string()),
    }
    lines
}

pub fn display_triage(result: &TriageResult) {
    println!();
    println!("{}", "[TRIAGE]".cyan());
    for line in triage_lines(result) {
        println!("  {}", line);
    }
    println!();
}

pub fn display_submission(response: &ClassifyResponse) {
    display_triage(&response.result);
    if !response.files.is_empty() {
        println!("{}", "[ATTACHMENTS]".cyan());
        for file in &response.files {
            println!("  * {}", file);
        }
        println!();
    }
    if response.logged {
        println!("{}", "Submission logged".dimmed());
    } else {
        println!(
            "[WARNING] {}",
            "Submission was classified but not logged".yellow()
        );
    }
}

pub fn display_health(health: &HealthResponse) {
    println!();
    println!("{}  srtriaged v{}", "[OK]".bright_green(), health.version);
    println!("  Status:          {}", health.status);
    println!("  Uptime:          {}s", health.uptime_seconds);
    println!("  Priority labels: {}", health.priority_labels.join(", "));
    println!("  Team labels:     {}", health.team_labels.join(", "));
    println!();
}

pub fn display_success(message: &str) {
    println!("{} {}", "[OK]".bright_green(), message);
}

pub fn display_error(message: &str) {
    eprintln!();
    eprintln!("[ERROR] {}", message.red());
    eprintln!();
}
