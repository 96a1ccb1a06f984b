//! Error types for SR Triage.
//!
//! Classification and storage failures are separate enums: a ledger write
//! failing never turns into a triage failure, and the reverse.

use crate::classifier::ClassifierError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a `classify` call. No partial result accompanies it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriageError {
    #[error("Classifier unavailable ({classifier}): {reason}")]
    ClassifierUnavailable { classifier: String, reason: String },

    #[error("Classifier inference failure ({classifier}): {reason}")]
    ClassifierInferenceFailure { classifier: String, reason: String },
}

impl TriageError {
    /// Stable machine-readable kind, used in HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            TriageError::ClassifierUnavailable { .. } => "classifier_unavailable",
            TriageError::ClassifierInferenceFailure { .. } => "classifier_inference_failure",
        }
    }
}

impl From<ClassifierError> for TriageError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::Unavailable { name, reason } => TriageError::ClassifierUnavailable {
                classifier: name,
                reason,
            },
            ClassifierError::InferenceFailure { name, reason } => {
                TriageError::ClassifierInferenceFailure {
                    classifier: name,
                    reason,
                }
            }
        }
    }
}

/// Failure of an append-only ledger.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage write failure at {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Storage read failure at {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Storage lock poisoned for {}", path.display())]
    LockPoisoned { path: PathBuf },

    /// Attachment references are stored `;`-separated, so they must be
    /// non-empty and free of `;` to read back unchanged
    #[error("Attachment reference {reference:?} cannot be stored (empty or contains ';')")]
    InvalidAttachment { reference: String },

    #[error("Refusing to log inconsistent result: priority {priority:?} with team {team:?}")]
    InconsistentResult {
        priority: String,
        team: Option<String>,
    },
}

impl StorageError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        StorageError::WriteFailure {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        StorageError::ReadFailure {
            path: path.into(),
            source: source.into(),
        }
    }
}
