//! Correction Log - human overrides captured for retraining.
//!
//! Corrections are not checked against any label set or against the
//! submission log; the two ledgers are joined offline by query text and
//! predicted labels.

use crate::error::StorageError;
use crate::ledger::CsvLedger;
use crate::records::CorrectionRecord;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug)]
pub struct CorrectionLog {
    ledger: CsvLedger<CorrectionRecord>,
}

impl CorrectionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            ledger: CsvLedger::new(path),
        }
    }

    /// Append a correction exactly as supplied
    pub fn record_correction(&self, correction: &CorrectionRecord) -> Result<(), StorageError> {
        self.ledger.append(correction)?;
        info!(
            "Logged correction: {} -> {} / {}",
            correction.predicted_priority, correction.corrected_priority, correction.corrected_team
        );
        Ok(())
    }

    pub fn read_all(&self) -> Result<Vec<CorrectionRecord>, StorageError> {
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
