//! Feature vectors, prediction results and printable reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binary classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Map a raw model output to a label.
    ///
    /// Only an exact `1` is positive. Every other value, including outputs
    /// outside {0, 1}, is negative.
    pub fn from_raw(raw: f64) -> Self {
        if raw == 1.0 {
            Label::Positive
        } else {
            Label::Negative
        }
    }
}

/// Ordered model input, one value per field descriptor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// Outcome of one classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub task_id: String,
    pub label: Label,
    /// Verdict text for the task, e.g. "Not Diabetic"
    pub verdict: String,
}

/// Printable record of a single prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    /// Unique request identifier
    pub request_id: String,

    /// Task the prediction was made for
    pub task_id: String,

    /// Classification outcome
    pub label: Label,

    /// Verdict text
    pub verdict: String,

    /// Report generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl PredictionReport {
    pub fn new(result: &PredictionResult) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            task_id: result.task_id.clone(),
            label: result.label,
            verdict: result.verdict.clone(),
            timestamp: Utc::now(),
        }
    }
}
