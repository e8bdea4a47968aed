//! Error types for the prediction form.
//!
//! Startup errors (`RegistryError`, `SchemaError`, model loading) are fatal and
//! bubble up to `main`. Per-request errors (`PredictionError`) end at
//! [`PredictionAdapter::submit`](crate::prediction::PredictionAdapter::submit).

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of file the registry expects to find on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Dataset,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Model => write!(f, "Model"),
            ArtifactKind::Dataset => write!(f, "Dataset"),
        }
    }
}

/// Errors raised while building or querying the task registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{kind} file '{}' not found for task '{task}'", .path.display())]
    MissingArtifact {
        task: String,
        kind: ArtifactKind,
        path: PathBuf,
    },

    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    #[error("Task '{0}' is declared more than once")]
    DuplicateTask(String),

    #[error("No prediction tasks are configured")]
    Empty,
}

/// Errors raised while resolving a task's input schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Could not read dataset '{}': {source}", .path.display())]
    Dataset {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Dataset '{}' has no header row", .0.display())]
    MissingHeader(PathBuf),

    #[error("Dataset '{}' has no feature columns besides the label column", .0.display())]
    NoFeatureColumns(PathBuf),

    #[error("No static field list is defined for task '{0}'")]
    NoStaticFields(String),

    #[error("Task '{0}' has no dataset to derive a schema from")]
    NoDataset(String),
}

/// Errors raised by a model capability.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to load model '{name}' from '{}': {reason}", .path.display())]
    Load {
        name: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Input arity of model '{0}' is neither configured nor declared by the artifact")]
    UnknownArity(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model output could not be read: {0}")]
    Output(String),
}

/// Errors that abort a single prediction request.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    #[error("No field named {} in this form", .names.join(", "))]
    UnknownFields { names: Vec<String> },

    #[error("Expected {expected} input values but {actual} were collected")]
    FeatureArityMismatch { expected: usize, actual: usize },

    #[error("Error in prediction: {cause}")]
    Invocation {
        #[source]
        cause: ModelError,
    },

    #[error("Value for '{field}' is not a finite number")]
    NonFiniteValue { field: String },

    #[error("Could not read a value for '{field}': {reason}")]
    ValueUnavailable { field: String, reason: String },
}
