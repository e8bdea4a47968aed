//! Input schema resolution.
//!
//! A task's fields come either from an authored list ([`StaticSchema`]) or
//! from the header of its dataset ([`DerivedSchema`]). [`TaskSchemaResolver`]
//! picks the strategy from the task's schema source.
//!
//! Resolution does not compare the field count with the model's input arity;
//! that check happens when a prediction is requested.

pub mod builtin;
pub mod derived;
pub mod heuristic;

pub use derived::fields_from_dataset;
pub use heuristic::{infer_kind, BINARY_MARKERS};

use crate::error::SchemaError;
use crate::types::field::FieldDescriptor;
use crate::types::task::{SchemaSource, Task};

/// Produces the ordered field list of a task.
pub trait SchemaResolver {
    fn resolve_schema(&self, task: &Task) -> Result<Vec<FieldDescriptor>, SchemaError>;
}

/// Authored field lists.
///
/// An inline list on the task wins; otherwise the built-in list for the
/// task id is used.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticSchema;

impl SchemaResolver for StaticSchema {
    fn resolve_schema(&self, task: &Task) -> Result<Vec<FieldDescriptor>, SchemaError> {
        match &task.schema_ref {
            SchemaSource::Static(fields) if !fields.is_empty() => Ok(fields.clone()),
            _ => builtin::fields_for(&task.id)
                .ok_or_else(|| SchemaError::NoStaticFields(task.id.clone())),
        }
    }
}

/// Fields read from the dataset header, kinds inferred from column names.
#[derive(Debug, Default, Clone, Copy)]
pub struct DerivedSchema;

impl SchemaResolver for DerivedSchema {
    fn resolve_schema(&self, task: &Task) -> Result<Vec<FieldDescriptor>, SchemaError> {
        match &task.schema_ref {
            SchemaSource::Dataset(path) => fields_from_dataset(path),
            SchemaSource::Static(_) => Err(SchemaError::NoDataset(task.id.clone())),
        }
    }
}

/// Dispatches to the strategy matching the task's schema source.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskSchemaResolver;

impl SchemaResolver for TaskSchemaResolver {
    fn resolve_schema(&self, task: &Task) -> Result<Vec<FieldDescriptor>, SchemaError> {
        match task.schema_ref {
            SchemaSource::Static(_) => StaticSchema.resolve_schema(task),
            SchemaSource::Dataset(_) => DerivedSchema.resolve_schema(task),
        }
    }
}
