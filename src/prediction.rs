//! Prediction adapter: collect, validate, classify, report.

use crate::catalogue::Catalogue;
use crate::error::PredictionError;
use crate::input::{MessageSink, ValueProvider};
use crate::models::Classifier;
use crate::types::field::FieldDescriptor;
use crate::types::prediction::{FeatureVector, Label, PredictionResult};
use crate::types::task::Task;
use std::fmt;
use tracing::{debug, info, warn};

/// Stage of a single prediction request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Idle,
    CollectingInputs,
    Validating,
    Predicting,
    Reporting,
    Rejected,
}

impl fmt::Display for RequestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestStage::Idle => "idle",
            RequestStage::CollectingInputs => "collecting_inputs",
            RequestStage::Validating => "validating",
            RequestStage::Predicting => "predicting",
            RequestStage::Reporting => "reporting",
            RequestStage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Read one value per descriptor, in position order, and encode it.
///
/// Binary fields become 0.0 or 1.0. Continuous fields must be finite but are
/// otherwise accepted as given. Values the provider holds for names outside
/// the form reject the request before anything is read.
pub fn collect_vector(
    descriptors: &[FieldDescriptor],
    provider: &mut dyn ValueProvider,
) -> Result<FeatureVector, PredictionError> {
    let unknown = provider.unknown_keys(descriptors);
    if !unknown.is_empty() {
        return Err(PredictionError::UnknownFields { names: unknown });
    }

    let mut ordered: Vec<&FieldDescriptor> = descriptors.iter().collect();
    ordered.sort_by_key(|d| d.position);

    let mut vector = FeatureVector::with_capacity(ordered.len());
    for descriptor in ordered {
        let raw = provider
            .value_for(descriptor)
            .map_err(|e| PredictionError::ValueUnavailable {
                field: descriptor.name.clone(),
                reason: e.to_string(),
            })?;

        let value = raw
            .coerce(descriptor.kind)
            .ok_or_else(|| PredictionError::NonFiniteValue {
                field: descriptor.name.clone(),
            })?;
        vector.push(value);
    }

    Ok(vector)
}

/// Validate a vector against a model and classify it.
///
/// The model is not called when the vector length differs from its input
/// arity. Model failures come back as `PredictionError::Invocation`.
pub fn predict(
    task: &Task,
    model: &dyn Classifier,
    vector: &FeatureVector,
) -> Result<PredictionResult, PredictionError> {
    let expected = model.input_arity();
    if vector.len() != expected {
        return Err(PredictionError::FeatureArityMismatch {
            expected,
            actual: vector.len(),
        });
    }

    debug!(task = %task.id, stage = %RequestStage::Predicting, model = %model.name());
    let raw = model
        .predict(vector.as_slice())
        .map_err(|cause| PredictionError::Invocation { cause })?;

    let label = Label::from_raw(raw);
    Ok(PredictionResult {
        task_id: task.id.clone(),
        label,
        verdict: task.verdicts.render(label).to_string(),
    })
}

/// Runs prediction requests against the startup catalogue
pub struct PredictionAdapter<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> PredictionAdapter<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    pub fn catalogue(&self) -> &'a Catalogue {
        self.catalogue
    }

    /// Collect, validate and classify for one task.
    pub fn run(
        &self,
        task_id: &str,
        provider: &mut dyn ValueProvider,
    ) -> Result<PredictionResult, PredictionError> {
        let task = self
            .catalogue
            .registry()
            .resolve(task_id)
            .map_err(|_| PredictionError::UnknownTask(task_id.to_string()))?;
        let (model, descriptors) = match (
            self.catalogue.model(&task.id),
            self.catalogue.schema(&task.id),
        ) {
            (Some(model), Some(descriptors)) => (model, descriptors),
            _ => return Err(PredictionError::UnknownTask(task.id.clone())),
        };

        debug!(task = %task.id, stage = %RequestStage::CollectingInputs, fields = descriptors.len());
        let vector = collect_vector(descriptors, provider)?;

        debug!(task = %task.id, stage = %RequestStage::Validating, values = vector.len());
        predict(task, model, &vector)
    }

    /// Handle one request end to end.
    ///
    /// Every per-request failure is reported once on `sink` and turned into
    /// `None`; nothing propagates past this call.
    pub fn submit(
        &self,
        task_id: &str,
        provider: &mut dyn ValueProvider,
        sink: &mut dyn MessageSink,
    ) -> Option<PredictionResult> {
        match self.run(task_id, provider) {
            Ok(result) => {
                info!(
                    task = %result.task_id,
                    stage = %RequestStage::Reporting,
                    label = ?result.label,
                    "Prediction complete"
                );
                Some(result)
            }
            Err(err) => {
                warn!(task = %task_id, stage = %RequestStage::Rejected, error = %err, "Prediction request failed");
                sink.error(&err.to_string());
                debug!(stage = %RequestStage::Idle);
                None
            }
        }
    }
}
