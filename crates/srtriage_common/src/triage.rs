//! Triage Engine - two-stage priority/team routing.
//!
//! Priority is always classified. The priority label then selects a
//! [`TeamRoute`]: awareness requests stop there, everything else is sent to
//! the team classifier exactly once. Nothing is cached and nothing is
//! retried; a classifier error ends the call without a result.

use crate::classifier::TextClassifier;
use crate::config::ModelsConfig;
use crate::error::TriageError;
use crate::labels;
use crate::model::LinearTextModel;
use crate::records::TriageResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stages of a single `classify` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageStage {
    PriorityPending,
    DoneWithTeam,
    DoneNoTeam,
}

/// What to do after the priority stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRoute {
    Assign,
    Skip,
}

impl TeamRoute {
    pub fn for_priority(priority: &str) -> Self {
        if labels::skips_team(priority) {
            TeamRoute::Skip
        } else {
            TeamRoute::Assign
        }
    }

    /// Terminal stage reached by taking this route
    pub fn terminal_stage(self) -> TriageStage {
        match self {
            TeamRoute::Assign => TriageStage::DoneWithTeam,
            TeamRoute::Skip => TriageStage::DoneNoTeam,
        }
    }
}

/// Routes queries through the priority and team classifiers
#[derive(Clone)]
pub struct TriageEngine {
    priority: Arc<dyn TextClassifier>,
    team: Arc<dyn TextClassifier>,
}

impl std::fmt::Debug for TriageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageEngine")
            .field("priority", &self.priority.name())
            .field("team", &self.team.name())
            .finish()
    }
}

impl TriageEngine {
    pub fn new(priority: Arc<dyn TextClassifier>, team: Arc<dyn TextClassifier>) -> Self {
        if !priority.labels().iter().any(|l| labels::skips_team(l)) {
            warn!(
                "Priority classifier '{}' has no '{}' label; every query will be routed to a team",
                priority.name(),
                labels::AWARENESS
            );
        }
        Self { priority, team }
    }

    /// Load both models from their configured artifacts
    pub fn from_config(models: &ModelsConfig) -> Result<Self, TriageError> {
        let priority = LinearTextModel::load("priority", &models.priority_model)?;
        let team = LinearTextModel::load("team", &models.team_model)?;
        Ok(Self::new(Arc::new(priority), Arc::new(team)))
    }

    pub fn priority_labels(&self) -> &[String] {
        self.priority.labels()
    }

    pub fn team_labels(&self) -> &[String] {
        self.team.labels()
    }

    /// Classify a query. The query is echoed unchanged and never validated.
    pub fn classify(&self, query: &str) -> Result<TriageResult, TriageError> {
        debug!("Triage stage {:?}", TriageStage::PriorityPending);

        let priority = predict_label(self.priority.as_ref(), query).map_err(|e| {
            warn!("Priority classification failed: {}", e);
            e
        })?;

        let route = TeamRoute::for_priority(&priority);
        let team = match route {
            TeamRoute::Skip => None,
            TeamRoute::Assign => Some(predict_label(self.team.as_ref(), query).map_err(|e| {
                warn!("Team classification failed: {}", e);
                e
            })?),
        };

        debug!(
            "Triage stage {:?} (priority={})",
            route.terminal_stage(),
            priority
        );

        Ok(TriageResult::assemble(query.to_string(), priority, team))
    }
}

/// Run one classifier and reject labels that cannot be routed or stored
fn predict_label(classifier: &dyn TextClassifier, query: &str) -> Result<String, TriageError> {
    let label = classifier.predict(query)?;
    if label.trim().is_empty() {
        return Err(TriageError::ClassifierInferenceFailure {
            classifier: classifier.name().to_string(),
            reason: format!("blank label {:?}", label),
        });
    }
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        label: &'static str,
        labels: Vec<String>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(label: &'static str) -> Arc<Self> {
            Arc::new(Self {
                label,
                labels: vec![label.to_string()],
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl TextClassifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _text: &str) -> Result<String, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.label.to_string())
        }

        fn labels(&self) -> &[String] {
            &self.labels
        }
    }

    #[test]
    fn test_route_for_priority() {
        assert_eq!(TeamRoute::for_priority("AWARENESS"), TeamRoute::Skip);
        assert_eq!(TeamRoute::for_priority("High"), TeamRoute::Assign);
        assert_eq!(TeamRoute::Skip.terminal_stage(), TriageStage::DoneNoTeam);
        assert_eq!(TeamRoute::Assign.terminal_stage(), TriageStage::DoneWithTeam);
    }

    #[test]
    fn test_awareness_skips_team() {
        let priority = Fixed::new("Awareness");
        let team = Fixed::new("TECH");
        let engine = TriageEngine::new(priority.clone(), team.clone());

        let result = engine.classify("reset my password").unwrap();
        assert_eq!(result.team, None);
        assert_eq!(result.stage(), TriageStage::DoneNoTeam);
        assert_eq!(priority.calls.load(Ordering::SeqCst), 1);
        assert_eq!(team.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blank_query_is_classified() {
        let engine = TriageEngine::new(Fixed::new("Low"), Fixed::new("PRODUCT"));
        let result = engine.classify("").unwrap();
        assert_eq!(result.query, "");
        assert_eq!(result.team.as_deref(), Some("PRODUCT"));
    }
}
