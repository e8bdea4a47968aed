//! Model capability and its ONNX implementation

pub mod loader;
pub mod onnx;

pub use loader::ModelLoader;
pub use onnx::OnnxClassifier;

use crate::error::ModelError;

/// A pre-trained binary classifier.
///
/// Implementations receive one row of features and return the raw label
/// the model produced. Interpreting that label is up to the caller.
pub trait Classifier: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Number of values the model expects per row
    fn input_arity(&self) -> usize;

    /// Classify a single row
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError>;
}
