//! Triage results and the two append-only record kinds.
//!
//! Column names match the CSV headers used by the retraining pipeline.

use crate::labels;
use crate::triage::TriageStage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one `classify` call.
///
/// `team` is `Some` exactly when `priority` is not awareness. Only the
/// triage engine constructs values through [`TriageResult::assemble`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub query: String,
    pub priority: String,
    pub team: Option<String>,
}

impl TriageResult {
    pub(crate) fn assemble(query: String, priority: String, team: Option<String>) -> Self {
        debug_assert_eq!(team.is_none(), labels::skips_team(&priority));
        Self {
            query,
            priority,
            team,
        }
    }

    /// True when `team` is present exactly for non-awareness priorities
    /// and neither label is blank
    pub fn is_consistent(&self) -> bool {
        let team_ok = match &self.team {
            Some(team) => !team.trim().is_empty(),
            None => true,
        };
        !self.priority.trim().is_empty()
            && team_ok
            && self.team.is_none() == labels::skips_team(&self.priority)
    }

    /// Terminal stage this result represents
    pub fn stage(&self) -> TriageStage {
        if self.team.is_some() {
            TriageStage::DoneWithTeam
        } else {
            TriageStage::DoneNoTeam
        }
    }
}

/// Who submitted a request or a correction. Both fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    pub name: String,
    pub employee_id: String,
}

impl Submitter {
    pub fn new(name: impl Into<String>, employee_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            employee_id: employee_id.into(),
        }
    }
}

/// One row of the submission ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Employee ID")]
    pub employee_id: String,

    #[serde(rename = "Query")]
    pub query: String,

    #[serde(rename = "Priority")]
    pub priority: String,

    #[serde(rename = "Team")]
    pub team: Option<String>,

    /// Attachment references, stored `;`-separated
    #[serde(rename = "Files", with = "attachment_list")]
    pub attachments: Vec<String>,

    #[serde(rename = "Submitted At")]
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn new(result: &TriageResult, submitter: &Submitter, attachments: &[String]) -> Self {
        Self {
            name: submitter.name.clone(),
            employee_id: submitter.employee_id.clone(),
            query: result.query.clone(),
            priority: result.priority.clone(),
            team: result.team.clone(),
            attachments: attachments.to_vec(),
            submitted_at: Utc::now(),
        }
    }

    pub fn submitter(&self) -> Submitter {
        Submitter::new(&self.name, &self.employee_id)
    }

    /// The triage decision captured in this row
    pub fn result(&self) -> TriageResult {
        TriageResult {
            query: self.query.clone(),
            priority: self.priority.clone(),
            team: self.team.clone(),
        }
    }
}

/// One row of the correction ledger.
///
/// Predicted values are whatever the caller sends back; corrected values are
/// free text and may name labels no model knows yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Employee ID")]
    pub employee_id: String,

    #[serde(rename = "Query")]
    pub query: String,

    #[serde(rename = "Predicted Priority")]
    pub predicted_priority: String,

    #[serde(rename = "Predicted Team")]
    pub predicted_team: Option<String>,

    #[serde(rename = "Corrected Priority")]
    pub corrected_priority: String,

    #[serde(rename = "Corrected Team")]
    pub corrected_team: String,

    #[serde(rename = "Recorded At")]
    pub recorded_at: DateTime<Utc>,
}

impl CorrectionRecord {
    pub fn new(
        submitter: &Submitter,
        query: impl Into<String>,
        predicted_priority: impl Into<String>,
        predicted_team: Option<String>,
        corrected_priority: impl Into<String>,
        corrected_team: impl Into<String>,
    ) -> Self {
        Self {
            name: submitter.name.clone(),
            employee_id: submitter.employee_id.clone(),
            query: query.into(),
            predicted_priority: predicted_priority.into(),
            predicted_team: predicted_team.filter(|team| !team.is_empty()),
            corrected_priority: corrected_priority.into(),
            corrected_team: corrected_team.into(),
            recorded_at: Utc::now(),
        }
    }

    /// Correction against a result this process produced
    pub fn for_result(
        submitter: &Submitter,
        result: &TriageResult,
        corrected_priority: impl Into<String>,
        corrected_team: impl Into<String>,
    ) -> Self {
        Self::new(
            submitter,
            &result.query,
            &result.priority,
            result.team.clone(),
            corrected_priority,
            corrected_team,
        )
    }

    pub fn submitter(&self) -> Submitter {
        Submitter::new(&self.name, &self.employee_id)
    }
}

pub(crate) mod attachment_list {
    use serde::{Deserialize, Deserializer, Serializer};

    const SEPARATOR: char = ';';

    /// A reference survives the join/split round trip unchanged
    pub fn is_storable(reference: &str) -> bool {
        !reference.is_empty() && !reference.contains(SEPARATOR)
    }

    pub fn serialize<S: Serializer>(files: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&files.join(&SEPARATOR.to_string()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let joined = String::deserialize(deserializer)?;
        Ok(joined
            .split(SEPARATOR)
            .filter(|f| !f.is_empty())
            .map(String::from)
            .collect())
    }
}
