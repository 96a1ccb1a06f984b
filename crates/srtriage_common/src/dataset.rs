//! Training-set selection for the two classifiers.
//!
//! The team model is only ever asked about non-awareness requests, so it is
//! only trained on them. The filter uses the same predicate as the triage
//! engine.

use crate::labels;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot read dataset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot write dataset {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One labelled service request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRow {
    pub sr_data_query: String,
    pub priority: String,
    #[serde(default)]
    pub team: String,
}

/// Rows used to fit the priority model: all of them
pub fn priority_training_set(rows: &[TicketRow]) -> Vec<TicketRow> {
    rows.to_vec()
}

/// Rows used to fit the team model: non-awareness only
pub fn team_training_set(rows: &[TicketRow]) -> Vec<TicketRow> {
    rows.iter()
        .filter(|row| !labels::skips_team(&row.priority))
        .cloned()
        .collect()
}

pub fn read_tickets(path: &Path) -> Result<Vec<TicketRow>, DatasetError> {
    let read_err = |source: csv::Error| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
    reader
        .deserialize()
        .collect::<Result<Vec<TicketRow>, csv::Error>>()
        .map_err(read_err)
}

pub fn write_tickets(path: &Path, rows: &[TicketRow]) -> Result<(), DatasetError> {
    let write_err = |source: csv::Error| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    for row in rows {
        writer.serialize(row).map_err(write_err)?;
    }
    writer.flush().map_err(|e| write_err(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ticket(query: &str, priority: &str, team: &str) -> TicketRow {
        TicketRow {
            sr_data_query: query.to_string(),
            priority: priority.to_string(),
            team: team.to_string(),
        }
    }

    #[test]
    fn test_team_set_drops_awareness_any_casing() {
        let rows = vec![
            ticket("app crashes on login", "HIGH PRIORITY URGENT TECHNICAL", "TECH"),
            ticket("new branch opening", "AWARENESS", ""),
            ticket("holiday notice", "awareness", ""),
            ticket("fee waiver rules", "LOW PRIORITY TECHNICAL", "policy"),
        ];

        let team = team_training_set(&rows);
        assert_eq!(team.len(), 2);
        assert!(team.iter().all(|r| !r.team.is_empty()));
        assert_eq!(priority_training_set(&rows).len(), 4);
    }

    #[test]
    fn test_read_write_tickets() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("sr_tickets.csv");
        std::fs::write(
            &input,
            "sr_data_query,priority,team\n\
             \"card blocked, urgent\",HIGH PRIORITY URGENT TECHNICAL,TECH\n\
             branch closed today,AWARENESS,\n",
        )
        .unwrap();

        let rows = read_tickets(&input).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sr_data_query, "card blocked, urgent");

        let output = temp_dir.path().join("team.csv");
        write_tickets(&output, &team_training_set(&rows)).unwrap();
        let written = read_tickets(&output).unwrap();
        assert_eq!(written, vec![rows[0].clone()]);
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let err = read_tickets(Path::new("/nonexistent/tickets.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
    }
}
