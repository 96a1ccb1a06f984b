//! Label conventions shared by routing and training-set filtering.

/// Priority label for requests that need no team routing.
pub const AWARENESS: &str = "awareness";

/// True when a priority label means the team stage must be skipped.
///
/// Comparison ignores case: models trained on "AWARENESS" and "awareness"
/// route identically.
pub fn skips_team(priority: &str) -> bool {
    priority.to_lowercase() == AWARENESS
}
