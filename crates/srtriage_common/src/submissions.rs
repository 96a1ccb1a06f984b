//! Submission Log - one row per triage call

use crate::error::StorageError;
use crate::ledger::CsvLedger;
use crate::records::{attachment_list, SubmissionRecord, Submitter, TriageResult};
use std::path::{Path, PathBuf};
use tracing::info;

/// Append-only log of triage decisions
#[derive(Debug)]
pub struct SubmissionLog {
    ledger: CsvLedger<SubmissionRecord>,
}

impl SubmissionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            ledger: CsvLedger::new(path),
        }
    }

    /// Record a triage decision with its submitter and attachments.
    ///
    /// Attachment references must be non-empty and must not contain `;`.
    /// A result whose team does not match its priority is refused. Nothing is
    /// written in either case. A failure here says nothing about the
    /// classification itself.
    pub fn record(
        &self,
        result: &TriageResult,
        submitter: &Submitter,
        attachments: &[String],
    ) -> Result<SubmissionRecord, StorageError> {
        if !result.is_consistent() {
            return Err(StorageError::InconsistentResult {
                priority: result.priority.clone(),
                team: result.team.clone(),
            });
        }
        if let Some(bad) = attachments
            .iter()
            .find(|a| !attachment_list::is_storable(a))
        {
            return Err(StorageError::InvalidAttachment {
                reference: bad.clone(),
            });
        }

        let record = SubmissionRecord::new(result, submitter, attachments);
        self.ledger.append(&record)?;
        info!(
            "Logged submission: priority={} team={} files={}",
            record.priority,
            record.team.as_deref().unwrap_or("-"),
            record.attachments.len()
        );
        Ok(record)
    }

    pub fn read_all(&self) -> Result<Vec<SubmissionRecord>, StorageError> {
        self.ledger.read_all()
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        self.ledger.row_count()
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    pub fn path(&self) -> &Path {
        self.ledger.path()
    }
}
