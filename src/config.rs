//! Configuration management for the prediction form

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::field::{FieldDescriptor, FieldKind};

/// How a task's input schema is obtained
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaStrategy {
    /// Authored field list (inline in the config, or built in)
    #[default]
    Static,
    /// Header row of the task's dataset
    Derived,
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub models: ModelsConfig,
    #[serde(default)]
    pub datasets: DatasetsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub tasks: Vec<TaskConfig>,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory containing ONNX model files
    pub models_dir: String,
    /// Number of threads for ONNX inference per model (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_onnx_threads() -> usize {
    1
}

/// Dataset (schema source) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetsConfig {
    /// Directory containing CSV datasets for derived schemas
    pub datasets_dir: String,
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            datasets_dir: "datasets".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// One prediction task
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Stable identifier
    pub id: String,
    /// Name shown in the task menu
    pub display_name: String,
    /// Model file name, relative to `models.models_dir`
    pub model_file: String,
    /// Schema strategy
    #[serde(default)]
    pub schema: SchemaStrategy,
    /// Dataset file name, relative to `datasets.datasets_dir` (derived strategy)
    #[serde(default)]
    pub dataset: Option<String>,
    /// Inline field list (static strategy)
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    /// Expected number of model inputs; read from the artifact when unset
    #[serde(default)]
    pub input_arity: Option<usize>,
    /// Verdict text for a positive prediction
    pub positive_label: String,
    /// Verdict text for a negative prediction
    pub negative_label: String,
}

/// One inline field of a static schema
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default = "default_field_kind")]
    pub kind: FieldKind,
    #[serde(default)]
    pub prompt: Option<String>,
}

fn default_field_kind() -> FieldKind {
    FieldKind::Continuous
}

impl TaskConfig {
    fn builtin(
        id: &str,
        display_name: &str,
        model_file: &str,
        positive_label: &str,
        negative_label: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            model_file: model_file.to_string(),
            schema: SchemaStrategy::Static,
            dataset: None,
            fields: Vec::new(),
            input_arity: None,
            positive_label: positive_label.to_string(),
            negative_label: negative_label.to_string(),
        }
    }

    /// Inline fields as positioned descriptors.
    pub fn field_descriptors(&self) -> Vec<FieldDescriptor> {
        FieldDescriptor::sequence(
            self.fields
                .iter()
                .map(|f| (f.name.clone(), f.kind, f.prompt.clone())),
        )
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Full path of a task's model artifact
    pub fn model_path(&self, task: &TaskConfig) -> PathBuf {
        Path::new(&self.models.models_dir).join(&task.model_file)
    }

    /// Full path of a task's dataset, if it names one
    pub fn dataset_path(&self, task: &TaskConfig) -> Option<PathBuf> {
        task.dataset
            .as_ref()
            .map(|file| Path::new(&self.datasets.datasets_dir).join(file))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models: ModelsConfig {
                models_dir: "models".to_string(),
                onnx_threads: 1,
            },
            datasets: DatasetsConfig::default(),
            logging: LoggingConfig::default(),
            tasks: vec![
                TaskConfig::builtin(
                    "diabetes",
                    "Diabetes",
                    "best_diabetes_model.onnx",
                    "Diabetic",
                    "Not Diabetic",
                ),
                TaskConfig::builtin(
                    "heart_disease",
                    "Heart Disease",
                    "heart_disease_model.onnx",
                    "Heart Disease Detected",
                    "No Heart Disease",
                ),
                TaskConfig::builtin(
                    "parkinsons",
                    "Parkinson's",
                    "parkinsons_model.onnx",
                    "Parkinson's Detected",
                    "No Parkinson's",
                ),
                TaskConfig::builtin(
                    "lung_cancer",
                    "Lung Cancer",
                    "lungs_disease_model.onnx",
                    "Lung Cancer Detected",
                    "No Lung Cancer",
                ),
                TaskConfig::builtin(
                    "thyroid",
                    "Thyroid",
                    "Thyroid_model.onnx",
                    "Thyroid Detected",
                    "No Thyroid Disease",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.models.models_dir, "models");
        assert_eq!(config.tasks.len(), 5);
        assert_eq!(config.tasks[0].id, "diabetes");
        assert_eq!(config.tasks[4].negative_label, "No Thyroid Disease");
        assert!(config
            .tasks
            .iter()
            .all(|t| t.schema == SchemaStrategy::Static));
    }

    #[test]
    fn test_artifact_paths() {
        let config = AppConfig::default();
        assert_eq!(
            config.model_path(&config.tasks[0]),
            Path::new("models").join("best_diabetes_model.onnx")
        );
        assert_eq!(config.dataset_path(&config.tasks[0]), None);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[models]
models_dir = "/srv/models"

[logging]
level = "debug"
format = "json"

[[tasks]]
id = "thyroid"
display_name = "Thyroid"
model_file = "Thyroid_model.onnx"
schema = "derived"
dataset = "thyroid.csv"
positive_label = "Thyroid Detected"
negative_label = "No Thyroid Disease"

[[tasks]]
id = "custom"
display_name = "Custom"
model_file = "custom.onnx"
input_arity = 2
positive_label = "Yes"
negative_label = "No"

[[tasks.fields]]
name = "weight"
prompt = "Weight (kg)"

[[tasks.fields]]
name = "smoker"
kind = "binary"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.models.onnx_threads, 1);
        assert_eq!(config.datasets.datasets_dir, "datasets");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.tasks.len(), 2);

        let thyroid = &config.tasks[0];
        assert_eq!(thyroid.schema, SchemaStrategy::Derived);
        assert_eq!(
            config.dataset_path(thyroid),
            Some(Path::new("datasets").join("thyroid.csv"))
        );

        let custom = &config.tasks[1];
        assert_eq!(custom.input_arity, Some(2));
        let fields = custom.field_descriptors();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].kind, FieldKind::Continuous);
        assert_eq!(fields[0].prompt(), "Weight (kg)");
        assert_eq!(fields[1].kind, FieldKind::Binary);
        assert_eq!(fields[1].position, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from_path(dir.path().join("absent.toml")).is_err());
    }
}
