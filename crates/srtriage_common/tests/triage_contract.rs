//! Routing contract of the triage engine, checked with scripted classifiers.

use srtriage_common::{ClassifierError, TextClassifier, TriageEngine, TriageError, TriageStage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Classifier answering from a query -> label table
struct Scripted {
    name: &'static str,
    answers: HashMap<String, Result<String, ClassifierError>>,
    labels: Vec<String>,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(name: &'static str, answers: &[(&str, &str)]) -> Arc<Self> {
        let labels = answers.iter().map(|(_, l)| l.to_string()).collect();
        Arc::new(Self {
            name,
            answers: answers
                .iter()
                .map(|(q, l)| (q.to_string(), Ok(l.to_string())))
                .collect(),
            labels,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(name: &'static str, query: &str, error: ClassifierError) -> Arc<Self> {
        let mut answers = HashMap::new();
        answers.insert(query.to_string(), Err(error));
        Arc::new(Self {
            name,
            answers,
            labels: vec!["awareness".to_string()],
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextClassifier for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    fn predict(&self, text: &str) -> Result<String, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(text)
            .cloned()
            .unwrap_or_else(|| Err(ClassifierError::inference(self.name, "unscripted query")))
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[test]
fn awareness_in_any_casing_never_reaches_team_classifier() {
    for label in ["awareness", "Awareness", "AWARENESS", "aWARENESS"] {
        let priority = Scripted::new("priority", &[("reset my password", label)]);
        let team = Scripted::new("team", &[("reset my password", "TECH")]);
        let engine = TriageEngine::new(priority.clone(), team.clone());

        let result = engine.classify("reset my password").unwrap();

        assert_eq!(result.query, "reset my password");
        assert_eq!(result.priority, label);
        assert_eq!(result.team, None, "label {label}");
        assert_eq!(result.stage(), TriageStage::DoneNoTeam);
        assert_eq!(priority.calls(), 1);
        assert_eq!(team.calls(), 0, "team classifier called for {label}");
    }
}

#[test]
fn other_priorities_invoke_team_exactly_once() {
    for label in ["High", "Low", "Critical", "HIGH PRIORITY LONG TERM TECHNICAL"] {
        let priority = Scripted::new("priority", &[("database is down", label)]);
        let team = Scripted::new("team", &[("database is down", "Infra")]);
        let engine = TriageEngine::new(priority.clone(), team.clone());

        let result = engine.classify("database is down").unwrap();

        assert_eq!(result.priority, label);
        assert_eq!(result.team.as_deref(), Some("Infra"));
        assert_eq!(result.stage(), TriageStage::DoneWithTeam);
        assert_eq!(priority.calls(), 1);
        assert_eq!(team.calls(), 1);
    }
}

#[test]
fn critical_database_outage_routes_to_infra() {
    let priority = Scripted::new("priority", &[("database is down", "Critical")]);
    let team = Scripted::new("team", &[("database is down", "Infra")]);
    let engine = TriageEngine::new(priority, team);

    let result = engine.classify("database is down").unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "query": "database is down",
            "priority": "Critical",
            "team": "Infra"
        })
    );
}

#[test]
fn repeated_queries_are_not_cached() {
    let priority = Scripted::new("priority", &[("printer jam", "Low")]);
    let team = Scripted::new("team", &[("printer jam", "Facilities")]);
    let engine = TriageEngine::new(priority.clone(), team.clone());

    for _ in 0..3 {
        engine.classify("printer jam").unwrap();
    }
    assert_eq!(priority.calls(), 3);
    assert_eq!(team.calls(), 3);
}

#[test]
fn priority_failure_yields_no_result_and_skips_team() {
    let priority = Scripted::failing(
        "priority",
        "garbled",
        ClassifierError::inference("priority", "bad input"),
    );
    let team = Scripted::new("team", &[("garbled", "TECH")]);
    let engine = TriageEngine::new(priority.clone(), team.clone());

    let err = engine.classify("garbled").unwrap_err();

    assert!(matches!(err, TriageError::ClassifierInferenceFailure { .. }));
    assert_eq!(priority.calls(), 1);
    assert_eq!(team.calls(), 0);
}

#[test]
fn team_failure_discards_priority() {
    let priority = Scripted::new("priority", &[("vpn broken", "High")]);
    let team = Scripted::failing(
        "team",
        "vpn broken",
        ClassifierError::unavailable("team", "weights missing"),
    );
    let engine = TriageEngine::new(priority, team.clone());

    let err = engine.classify("vpn broken").unwrap_err();

    assert_eq!(
        err,
        TriageError::ClassifierUnavailable {
            classifier: "team".to_string(),
            reason: "weights missing".to_string(),
        }
    );
    // No retry
    assert_eq!(team.calls(), 1);
}

#[test]
fn engine_is_shareable_across_threads() {
    let priority = Scripted::new("priority", &[("a1", "awareness"), ("b2", "High")]);
    let team = Scripted::new("team", &[("b2", "TECH")]);
    let engine = TriageEngine::new(priority.clone(), team.clone());

    std::thread::scope(|scope| {
        for i in 0..8 {
            let engine = &engine;
            scope.spawn(move || {
                let query = if i % 2 == 0 { "a1" } else { "b2" };
                let result = engine.classify(query).unwrap();
                assert_eq!(result.team.is_some(), query == "b2");
            });
        }
    });

    assert_eq!(priority.calls(), 8);
    assert_eq!(team.calls(), 4);
}

#[test]
fn blank_priority_label_is_inference_failure_and_skips_team() {
    for label in ["", "   ", "\t\n"] {
        let priority = Scripted::new("priority", &[("q", label)]);
        let team = Scripted::new("team", &[("q", "TECH")]);
        let engine = TriageEngine::new(priority.clone(), team.clone());

        let err = engine.classify("q").unwrap_err();

        match err {
            TriageError::ClassifierInferenceFailure { classifier, .. } => {
                assert_eq!(classifier, "priority")
            }
            other => panic!("unexpected error for {label:?}: {other}"),
        }
        assert_eq!(priority.calls(), 1);
        assert_eq!(team.calls(), 0, "team classifier called after {label:?}");
    }
}

#[test]
fn blank_team_label_is_inference_failure() {
    for label in ["", "  "] {
        let priority = Scripted::new("priority", &[("q", "High")]);
        let team = Scripted::new("team", &[("q", label)]);
        let engine = TriageEngine::new(priority.clone(), team.clone());

        let err = engine.classify("q").unwrap_err();

        assert_eq!(err.kind(), "classifier_inference_failure");
        match err {
            TriageError::ClassifierInferenceFailure { classifier, .. } => {
                assert_eq!(classifier, "team")
            }
            other => panic!("unexpected error for {label:?}: {other}"),
        }
        assert_eq!(team.calls(), 1);
    }
}
