//! ONNX model loader

use crate::error::ModelError;
use crate::models::onnx::OnnxClassifier;
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::ValueType;
use std::path::Path;
use tracing::{info, warn};

/// Loader for ONNX models
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self> {
        // Initialize ONNX Runtime
        ort::init().commit()?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    fn open_session(&self, path: &Path) -> Result<Session> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load model from {:?}", path))?;
        Ok(session)
    }

    /// Load a single ONNX model from file.
    ///
    /// `input_arity` overrides the feature count declared by the model's
    /// first input. One of the two must be known.
    pub fn load_model<P: AsRef<Path>>(
        &self,
        path: P,
        name: &str,
        input_arity: Option<usize>,
    ) -> Result<OnnxClassifier, ModelError> {
        let path = path.as_ref();

        info!(model = %name, path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = self.open_session(path).map_err(|e| ModelError::Load {
            name: name.to_string(),
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })?;

        // Get input/output names
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "output_label".to_string());

        let declared_arity = session.inputs.first().and_then(|i| declared_features(&i.input_type));

        let arity = match (input_arity, declared_arity) {
            (Some(configured), Some(declared)) if configured != declared => {
                warn!(
                    model = %name,
                    configured = configured,
                    declared = declared,
                    "Configured input arity differs from the model's declared input"
                );
                configured
            }
            (Some(configured), _) => configured,
            (None, Some(declared)) => declared,
            (None, None) => return Err(ModelError::UnknownArity(name.to_string())),
        };

        info!(
            model = %name,
            input = %input_name,
            output = %label_output,
            input_arity = arity,
            "Model loaded successfully"
        );

        Ok(OnnxClassifier::new(
            name.to_string(),
            session,
            input_name,
            label_output,
            arity,
        ))
    }
}

/// Feature count of a `[batch, features]` input, when it is fixed.
fn declared_features(input_type: &ValueType) -> Option<usize> {
    match input_type {
        ValueType::Tensor { shape, .. } => {
            let dims: Vec<i64> = shape.iter().copied().collect();
            dims.last()
                .copied()
                .filter(|&d| d > 0 && dims.len() >= 2)
                .map(|d| d as usize)
        }
        _ => None,
    }
}
