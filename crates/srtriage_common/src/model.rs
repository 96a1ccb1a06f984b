//! Linear text model: TF-IDF features scored by a logistic regression.
//!
//! Models are trained offline and exported as a JSON artifact holding the
//! vocabulary, IDF weights and per-class coefficients. This module only
//! performs inference.

use crate::classifier::{ClassifierError, TextClassifier};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Token pattern: runs of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Feature normalization applied after TF-IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
    None,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Norm {
    Norm::L2
}

/// On-disk model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub classes: Vec<String>,
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,

    #[serde(default = "default_lowercase")]
    pub lowercase: bool,

    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default)]
    pub sublinear_tf: bool,

    #[serde(default = "default_norm")]
    pub norm: Norm,
}

impl ModelArtifact {
    /// Check shapes; any mismatch makes the model unusable
    fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("model has no classes".to_string());
        }
        let dim = self.idf.len();
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= dim) {
            return Err(format!(
                "vocabulary term '{}' has index {} beyond idf length {}",
                term, idx, dim
            ));
        }

        let expected_rows = if self.classes.len() == 2 {
            1
        } else {
            self.classes.len()
        };
        if self.coef.len() != expected_rows {
            return Err(format!(
                "expected {} coefficient rows for {} classes, found {}",
                expected_rows,
                self.classes.len(),
                self.coef.len()
            ));
        }
        if self.intercept.len() != expected_rows {
            return Err(format!(
                "expected {} intercepts, found {}",
                expected_rows,
                self.intercept.len()
            ));
        }
        if let Some(row) = self.coef.iter().position(|row| row.len() != dim) {
            return Err(format!(
                "coefficient row {} has length {}, expected {}",
                row,
                self.coef[row].len(),
                dim
            ));
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({}, {})", min_n, max_n));
        }
        Ok(())
    }
}

/// TF-IDF + logistic regression classifier
#[derive(Debug)]
pub struct LinearTextModel {
    name: String,
    artifact: ModelArtifact,
    token_re: Regex,
}

impl LinearTextModel {
    /// Build from an in-memory artifact
    pub fn from_artifact(
        name: impl Into<String>,
        artifact: ModelArtifact,
    ) -> Result<Self, ClassifierError> {
        let name = name.into();
        artifact
            .validate()
            .map_err(|reason| ClassifierError::unavailable(&name, reason))?;
        let token_re = Regex::new(TOKEN_PATTERN)
            .map_err(|e| ClassifierError::unavailable(&name, e.to_string()))?;

        Ok(Self {
            name,
            artifact,
            token_re,
        })
    }

    /// Load a JSON artifact from disk
    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self, ClassifierError> {
        let name = name.into();
        let content = fs::read_to_string(path).map_err(|e| {
            ClassifierError::unavailable(&name, format!("cannot read {}: {}", path.display(), e))
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&content).map_err(|e| {
            ClassifierError::unavailable(&name, format!("invalid model {}: {}", path.display(), e))
        })?;

        let model = Self::from_artifact(name, artifact)?;
        info!(
            "Loaded {} model from {} ({} classes, {} features)",
            model.name,
            path.display(),
            model.artifact.classes.len(),
            model.artifact.idf.len()
        );
        Ok(model)
    }

    fn ngrams(&self, text: &str) -> Vec<String> {
        let text = if self.artifact.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens: Vec<&str> = self.token_re.find_iter(&text).map(|m| m.as_str()).collect();

        let (min_n, max_n) = self.artifact.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }

    /// Sparse TF-IDF vector as (feature index, weight)
    fn features(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for gram in self.ngrams(text) {
            if let Some(&idx) = self.artifact.vocabulary.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut weighted: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.artifact.sublinear_tf {
                    1.0 + tf.ln()
                } else {
                    tf
                };
                (idx, tf * self.artifact.idf[idx])
            })
            .collect();
        weighted.sort_by_key(|(idx, _)| *idx);

        let norm = match self.artifact.norm {
            Norm::L2 => weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Norm::L1 => weighted.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if norm > 0.0 {
            for (_, w) in weighted.iter_mut() {
                *w /= norm;
            }
        }
        weighted
    }

    /// Raw decision scores, one per coefficient row
    pub fn decision_scores(&self, text: &str) -> Vec<f64> {
        let features = self.features(text);
        self.artifact
            .coef
            .iter()
            .zip(&self.artifact.intercept)
            .map(|(row, bias)| {
                features
                    .iter()
                    .map(|(idx, w)| row[*idx] * w)
                    .sum::<f64>()
                    + bias
            })
            .collect()
    }
}

impl TextClassifier for LinearTextModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, text: &str) -> Result<String, ClassifierError> {
        let scores = self.decision_scores(text);
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ClassifierError::inference(
                &self.name,
                "non-finite decision score",
            ));
        }

        let classes = &self.artifact.classes;
        let idx = if classes.len() == 2 {
            usize::from(scores[0] > 0.0)
        } else {
            // First maximum wins ties
            let mut best = 0;
            for (i, score) in scores.iter().enumerate().skip(1) {
                if *score > scores[best] {
                    best = i;
                }
            }
            best
        };

        let label = &classes[idx];
        if label.is_empty() {
            return Err(ClassifierError::inference(&self.name, "empty label"));
        }
        debug!("{} predicted '{}'", self.name, label);
        Ok(label.clone())
    }

    fn labels(&self) -> &[String] {
        &self.artifact.classes
    }
}
