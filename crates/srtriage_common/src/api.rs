//! Wire types shared by srtriaged and srtriagectl

use crate::records::{CorrectionRecord, Submitter, TriageResult};
use serde::{Deserialize, Serialize};

/// Response to POST /classify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    #[serde(flatten)]
    pub result: TriageResult,
    /// Stored attachment names
    #[serde(default)]
    pub files: Vec<String>,
    /// Whether the submission row was written
    #[serde(default)]
    pub logged: bool,
}

/// Body of POST /correction; missing fields are empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CorrectionRequest {
    pub name: String,
    pub employee_id: String,
    pub query: String,
    pub predicted_priority: String,
    pub predicted_team: String,
    pub corrected_priority: String,
    pub corrected_team: String,
}

impl CorrectionRequest {
    pub fn into_record(self) -> CorrectionRecord {
        CorrectionRecord::new(
            &Submitter::new(self.name, self.employee_id),
            self.query,
            self.predicted_priority,
            Some(self.predicted_team),
            self.corrected_priority,
            self.corrected_team,
        )
    }
}

/// Response to GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub priority_labels: Vec<String>,
    pub team_labels: Vec<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub kind: Option<String>,
}
