//! Prediction task definitions

use crate::types::field::FieldDescriptor;
use crate::types::prediction::Label;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a task's input schema comes from
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSource {
    /// Field list authored for the task
    Static(Vec<FieldDescriptor>),
    /// Header row of a CSV dataset; the last column is the label
    Dataset(PathBuf),
}

/// Texts shown for each side of a binary verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictLabels {
    pub positive: String,
    pub negative: String,
}

impl VerdictLabels {
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            positive: positive.into(),
            negative: negative.into(),
        }
    }

    pub fn render(&self, label: Label) -> &str {
        match label {
            Label::Positive => &self.positive,
            Label::Negative => &self.negative,
        }
    }
}

/// One disease-prediction workflow
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Stable identifier, e.g. `diabetes`
    pub id: String,
    /// Human-readable name
    pub display_name: String,
    /// Location of the model artifact
    pub model_ref: PathBuf,
    /// Location or content of the input schema
    pub schema_ref: SchemaSource,
    /// Verdict texts
    pub verdicts: VerdictLabels,
    /// Configured input arity; overrides what the artifact declares
    pub input_arity: Option<usize>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        model_ref: impl Into<PathBuf>,
        schema_ref: SchemaSource,
        verdicts: VerdictLabels,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            model_ref: model_ref.into(),
            schema_ref,
            verdicts,
            input_arity: None,
        }
    }

    pub fn with_input_arity(mut self, arity: usize) -> Self {
        self.input_arity = Some(arity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_rendering() {
        let verdicts = VerdictLabels::new("Diabetic", "Not Diabetic");
        assert_eq!(verdicts.render(Label::Positive), "Diabetic");
        assert_eq!(verdicts.render(Label::Negative), "Not Diabetic");
    }

    #[test]
    fn test_task_builder() {
        let task = Task::new(
            "heart_disease",
            "Heart Disease",
            "models/heart_disease_model.onnx",
            SchemaSource::Dataset(PathBuf::from("datasets/heart.csv")),
            VerdictLabels::new("Heart Disease Detected", "No Heart Disease"),
        )
        .with_input_arity(13);

        assert_eq!(task.input_arity, Some(13));
        assert_eq!(task.model_ref, PathBuf::from("models/heart_disease_model.onnx"));
    }
}
