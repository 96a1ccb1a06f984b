//! CSV Ledger - Append-only tabular storage
//!
//! Each ledger owns one CSV file. The header row is written once, by the
//! first append to an empty or missing file. The lock covers the whole
//! "check empty, write header, write row, sync" sequence so concurrent
//! appenders in this process can neither duplicate the header nor interleave
//! rows.

use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Append-only CSV store for one record type
#[derive(Debug)]
pub struct CsvLedger<R> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<fn(R)>,
}

impl<R> CsvLedger<R>
where
    R: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once the backing file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Append one record, writing the header first if the store is empty
    pub fn append(&self, record: &R) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned {
            path: self.path.clone(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::write(&self.path, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::write(&self.path, e))?;

        let needs_header = file
            .metadata()
            .map_err(|e| StorageError::write(&self.path, e))?
            .len()
            == 0;
        if needs_header {
            info!("Initialising ledger {}", self.path.display());
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| StorageError::write(&self.path, e))?;
        writer
            .flush()
            .map_err(|e| StorageError::write(&self.path, e))?;

        let file = writer
            .into_inner()
            .map_err(|e| StorageError::write(&self.path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| StorageError::write(&self.path, e))?;

        debug!("Appended row to {}", self.path.display());
        Ok(())
    }

    /// Read every record in insertion order. A missing store reads as empty.
    pub fn read_all(&self) -> Result<Vec<R>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned {
            path: self.path.clone(),
        })?;

        if !self.path.exists() {
            return Ok(vec![]);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| StorageError::read(&self.path, e))?;

        reader
            .deserialize()
            .collect::<Result<Vec<R>, csv::Error>>()
            .map_err(|e| StorageError::read(&self.path, e))
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> Result<usize, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned {
            path: self.path.clone(),
        })?;

        if !self.path.exists() {
            return Ok(0);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| StorageError::read(&self.path, e))?;

        let mut count = 0;
        for row in reader.records() {
            row.map_err(|e| StorageError::read(&self.path, e))?;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        #[serde(rename = "Key")]
        key: String,
        #[serde(rename = "Value")]
        value: Option<String>,
    }

    fn row(key: &str, value: Option<&str>) -> Row {
        Row {
            key: key.to_string(),
            value: value.map(String::from),
        }
    }

    #[test]
    fn test_header_written_once() {
        let temp_dir = TempDir::new().unwrap();
        let ledger: CsvLedger<Row> = CsvLedger::new(temp_dir.path().join("rows.csv"));

        assert!(!ledger.exists());
        ledger.append(&row("a", Some("1"))).unwrap();
        ledger.append(&row("b", None)).unwrap();
        assert!(ledger.exists());

        let content = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(content, "Key,Value\na,1\nb,\n");
        assert_eq!(ledger.row_count().unwrap(), 2);
    }

    #[test]
    fn test_read_all_preserves_order_and_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let ledger: CsvLedger<Row> = CsvLedger::new(temp_dir.path().join("rows.csv"));

        ledger.append(&row("same", Some("x"))).unwrap();
        ledger.append(&row("other", None)).unwrap();
        ledger.append(&row("same", Some("x"))).unwrap();

        let rows = ledger.read_all().unwrap();
        assert_eq!(
            rows,
            vec![row("same", Some("x")), row("other", None), row("same", Some("x"))]
        );
    }

    #[test]
    fn test_missing_store_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let ledger: CsvLedger<Row> = CsvLedger::new(temp_dir.path().join("absent.csv"));
        assert!(ledger.read_all().unwrap().is_empty());
        assert_eq!(ledger.row_count().unwrap(), 0);
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("nested").join("rows.csv");
        let ledger: CsvLedger<Row> = CsvLedger::new(&path);

        ledger.append(&row("a", None)).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_existing_empty_file_gets_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");
        fs::write(&path, "").unwrap();

        let ledger: CsvLedger<Row> = CsvLedger::new(&path);
        ledger.append(&row("a", Some("1"))).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Key,Value\na,1\n");
    }

    #[test]
    fn test_unwritable_path_is_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let ledger: CsvLedger<Row> = CsvLedger::new(blocker.join("rows.csv"));
        let err = ledger.append(&row("a", None)).unwrap_err();
        assert!(matches!(err, StorageError::WriteFailure { .. }));
    }

    #[test]
    fn test_values_with_delimiters_survive() {
        let temp_dir = TempDir::new().unwrap();
        let ledger: CsvLedger<Row> = CsvLedger::new(temp_dir.path().join("rows.csv"));
        let tricky = row("a, \"quoted\"\nline", Some("x;y"));

        ledger.append(&tricky).unwrap();
        assert_eq!(ledger.read_all().unwrap(), vec![tricky]);
    }
}
