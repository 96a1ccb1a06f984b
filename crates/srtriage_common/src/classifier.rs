//! Classifier seam.
//!
//! The triage engine only sees `TextClassifier`. The shipped implementation is
//! [`crate::model::LinearTextModel`]; tests substitute their own.

use thiserror::Error;

/// Failures raised by a classifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// Model could not be loaded or initialised
    #[error("classifier '{name}' unavailable: {reason}")]
    Unavailable { name: String, reason: String },

    /// A single predict call failed or produced no usable label
    #[error("classifier '{name}' failed on input: {reason}")]
    InferenceFailure { name: String, reason: String },
}

impl ClassifierError {
    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn inference(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InferenceFailure {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A pre-trained single-label text classifier.
///
/// Implementations are immutable once constructed and must tolerate
/// unlimited concurrent `predict` calls.
pub trait TextClassifier: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &str;

    /// Predict exactly one label for `text`
    fn predict(&self, text: &str) -> Result<String, ClassifierError>;

    /// Closed label set this classifier draws from
    fn labels(&self) -> &[String];
}
