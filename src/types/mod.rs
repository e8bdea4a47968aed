//! Type definitions for the prediction form

pub mod field;
pub mod prediction;
pub mod task;

pub use field::{FieldDescriptor, FieldKind, FieldValue};
pub use prediction::{FeatureVector, Label, PredictionReport, PredictionResult};
pub use task::{SchemaSource, Task, VerdictLabels};
