//! Catalogue of supported prediction tasks

use crate::config::{AppConfig, SchemaStrategy, TaskConfig};
use crate::error::{ArtifactKind, RegistryError};
use crate::types::task::{SchemaSource, Task, VerdictLabels};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fixed, ordered set of prediction tasks
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    /// Build a registry from tasks in display order.
    pub fn new(tasks: Vec<Task>) -> Result<Self, RegistryError> {
        if tasks.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for task in &tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(RegistryError::DuplicateTask(task.id.clone()));
            }
        }

        Ok(Self { tasks })
    }

    /// Build the registry from configuration, checking that every model
    /// artifact (and every dataset a derived schema needs) is on disk.
    pub fn from_config(config: &AppConfig) -> Result<Self, RegistryError> {
        let tasks = config
            .tasks
            .iter()
            .map(|task_config| task_from_config(config, task_config))
            .collect::<Result<Vec<_>, _>>()?;

        let registry = Self::new(tasks)?;
        info!(
            count = registry.tasks.len(),
            tasks = ?registry.tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            "Task registry ready"
        );
        Ok(registry)
    }

    /// All tasks in display order
    pub fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look a task up by id, or by display name ignoring case.
    pub fn resolve(&self, task_id: &str) -> Result<&Task, RegistryError> {
        let key = task_id.trim();
        self.tasks
            .iter()
            .find(|t| t.id == key)
            .or_else(|| {
                self.tasks
                    .iter()
                    .find(|t| t.display_name.eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| RegistryError::UnknownTask(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always false for a registry built by `new`; pairs with `len`.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn require_file(task: &str, kind: ArtifactKind, path: &Path) -> Result<(), RegistryError> {
    if path.is_file() {
        debug!(task = %task, kind = %kind, path = %path.display(), "Artifact present");
        Ok(())
    } else {
        Err(RegistryError::MissingArtifact {
            task: task.to_string(),
            kind,
            path: path.to_path_buf(),
        })
    }
}

fn task_from_config(config: &AppConfig, task_config: &TaskConfig) -> Result<Task, RegistryError> {
    let model_ref = config.model_path(task_config);
    require_file(&task_config.id, ArtifactKind::Model, &model_ref)?;

    let schema_ref = match task_config.schema {
        SchemaStrategy::Static => SchemaSource::Static(task_config.field_descriptors()),
        SchemaStrategy::Derived => {
            let dataset = config.dataset_path(task_config).unwrap_or_else(|| {
                PathBuf::from(&config.datasets.datasets_dir).join(format!("{}.csv", task_config.id))
            });
            require_file(&task_config.id, ArtifactKind::Dataset, &dataset)?;
            SchemaSource::Dataset(dataset)
        }
    };

    let task = Task::new(
        task_config.id.clone(),
        task_config.display_name.clone(),
        model_ref,
        schema_ref,
        VerdictLabels::new(
            task_config.positive_label.clone(),
            task_config.negative_label.clone(),
        ),
    );

    Ok(match task_config.input_arity {
        Some(arity) => task.with_input_arity(arity),
        None => task,
    })
}
