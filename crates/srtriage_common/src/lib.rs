//! SR Triage Common - Shared types and the triage core
//!
//! Holds the two-stage priority/team decision, the classifier seam, the
//! append-only submission and correction ledgers, and configuration shared
//! by the daemon and the control CLI.

pub mod api;
pub mod classifier;
pub mod config;
pub mod corrections;
pub mod dataset;
pub mod error;
pub mod labels;
pub mod ledger;
pub mod model;
pub mod records;
pub mod submissions;
pub mod triage;

pub use classifier::{ClassifierError, TextClassifier};
pub use config::Config;
pub use corrections::CorrectionLog;
pub use error::{StorageError, TriageError};
pub use records::{CorrectionRecord, SubmissionRecord, Submitter, TriageResult};
pub use submissions::SubmissionLog;
pub use triage::{TeamRoute, TriageEngine, TriageStage};
