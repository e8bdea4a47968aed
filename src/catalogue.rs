//! Process-wide, read-only state built once at startup.
//!
//! The catalogue owns the task registry, one loaded classifier per task and
//! the resolved field list per task. Every failure while building it is
//! fatal: there is no degraded mode with some tasks disabled.

use crate::config::AppConfig;
use crate::error::ModelError;
use crate::models::{Classifier, ModelLoader};
use crate::registry::TaskRegistry;
use crate::schema::{SchemaResolver, TaskSchemaResolver};
use crate::types::field::FieldDescriptor;
use crate::types::task::Task;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Immutable registry, models and schema cache
pub struct Catalogue {
    registry: TaskRegistry,
    models: HashMap<String, Arc<dyn Classifier>>,
    schemas: HashMap<String, Vec<FieldDescriptor>>,
}

impl Catalogue {
    /// Check artifacts, load every ONNX model and resolve every schema.
    pub fn load(config: &AppConfig) -> Result<Self> {
        let registry = TaskRegistry::from_config(config).context("Configuration error")?;
        let loader = ModelLoader::with_threads(config.models.onnx_threads)?;

        Self::assemble(registry, &TaskSchemaResolver, |task| {
            loader
                .load_model(&task.model_ref, &task.id, task.input_arity)
                .map(|model| Arc::new(model) as Arc<dyn Classifier>)
        })
    }

    /// Build a catalogue from a registry, a schema resolver and a model
    /// factory called once per task.
    pub fn assemble<R, F>(registry: TaskRegistry, resolver: &R, mut load_model: F) -> Result<Self>
    where
        R: SchemaResolver + ?Sized,
        F: FnMut(&Task) -> Result<Arc<dyn Classifier>, ModelError>,
    {
        let mut models = HashMap::with_capacity(registry.len());
        let mut schemas = HashMap::with_capacity(registry.len());

        for task in registry.list_tasks() {
            let model = load_model(task).with_context(|| format!("Model for task '{}'", task.id))?;

            let fields = resolver
                .resolve_schema(task)
                .with_context(|| format!("Schema for task '{}'", task.id))?;

            info!(
                task = %task.id,
                model = %model.name(),
                input_arity = model.input_arity(),
                fields = fields.len(),
                "Task ready"
            );

            models.insert(task.id.clone(), model);
            schemas.insert(task.id.clone(), fields);
        }

        Ok(Self {
            registry,
            models,
            schemas,
        })
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Classifier loaded for a task
    pub fn model(&self, task_id: &str) -> Option<&dyn Classifier> {
        self.models.get(task_id).map(|m| m.as_ref())
    }

    /// Cached field list of a task
    pub fn schema(&self, task_id: &str) -> Option<&[FieldDescriptor]> {
        self.schemas.get(task_id).map(|s| s.as_slice())
    }
}
