//! ONNX Runtime backed classifier

use crate::error::ModelError;
use crate::models::Classifier;
use ort::session::{Session, SessionOutputs};
use ort::value::Tensor;
use std::sync::Mutex;
use tracing::debug;

/// Classifier wrapping one ONNX Runtime session
pub struct OnnxClassifier {
    /// Model name (task id)
    name: String,
    /// ONNX Runtime session; running it needs exclusive access
    session: Mutex<Session>,
    /// Input name for the model
    input_name: String,
    /// Preferred output, usually the predicted label
    label_output: String,
    /// Expected number of features per row
    input_arity: usize,
}

impl OnnxClassifier {
    pub(crate) fn new(
        name: String,
        session: Session,
        input_name: String,
        label_output: String,
        input_arity: usize,
    ) -> Self {
        Self {
            name,
            session: Mutex::new(session),
            input_name,
            label_output,
            input_arity,
        }
    }

    /// Read the predicted label from the session outputs.
    ///
    /// skl2onnx exports carry an int64 `output_label` tensor next to a
    /// seq(map) of probabilities; other exporters emit a float tensor.
    fn extract_label(&self, outputs: &SessionOutputs) -> Result<f64, ModelError> {
        if let Some(output) = outputs.get(self.label_output.as_str()) {
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                if let Some(&label) = data.first() {
                    return Ok(label as f64);
                }
            }
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                if let Some(&label) = data.first() {
                    return Ok(label as f64);
                }
            }
        }

        // Fallback: first output that reads as a tensor
        for (name, output) in outputs.iter() {
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                if let Some(&label) = data.first() {
                    debug!(model = %self.name, output = %name, "Label read from fallback output");
                    return Ok(label as f64);
                }
            }
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                if let Some(&label) = data.first() {
                    debug!(model = %self.name, output = %name, "Label read from fallback output");
                    return Ok(label as f64);
                }
            }
        }

        Err(ModelError::Output(format!(
            "model '{}' produced no readable label tensor",
            self.name
        )))
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_arity(&self) -> usize {
        self.input_arity
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        // Input tensor - shape [1, num_features]
        let shape = vec![1_i64, row.len() as i64];
        let data: Vec<f32> = row.iter().map(|&v| v as f32).collect();
        let input_tensor = Tensor::from_array((shape, data))
            .map_err(|e| ModelError::Inference(format!("failed to create input tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| ModelError::Inference(format!("lock error: {e}")))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let label = self.extract_label(&outputs)?;
        debug!(model = %self.name, label = label, "ONNX inference complete");
        Ok(label)
    }
}
