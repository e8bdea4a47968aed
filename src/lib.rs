//! Disease Prediction Library
//!
//! An interactive form for pre-trained binary classifiers: pick a task,
//! enter its fields, get a verdict.

pub mod catalogue;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod prediction;
pub mod registry;
pub mod schema;
pub mod types;

pub use catalogue::Catalogue;
pub use config::AppConfig;
pub use input::{MapValueProvider, MessageSink, TerminalProvider, ValueProvider};
pub use models::Classifier;
pub use prediction::PredictionAdapter;
pub use registry::TaskRegistry;
pub use types::{FieldDescriptor, FieldKind, PredictionResult, Task};
