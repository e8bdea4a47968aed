//! Authored field lists for the built-in tasks.
//!
//! Order matches the column order the models were trained on. Binary kinds
//! are assigned per field here rather than inferred.

use crate::types::field::FieldKind::{self, Binary, Continuous};
use crate::types::field::FieldDescriptor;

type FieldSpec = (&'static str, FieldKind, &'static str);

const DIABETES: &[FieldSpec] = &[
    ("Pregnancies", Continuous, "Number of Pregnancies"),
    ("Glucose", Continuous, "Glucose Level"),
    ("BloodPressure", Continuous, "Blood Pressure"),
    ("SkinThickness", Continuous, "Skin Thickness"),
    ("Insulin", Continuous, "Insulin Level"),
    ("BMI", Continuous, "BMI"),
    ("DiabetesPedigreeFunction", Continuous, "Diabetes Pedigree Function"),
    ("Age", Continuous, "Age"),
];

const HEART_DISEASE: &[FieldSpec] = &[
    ("age", Continuous, "Age"),
    ("sex", Binary, "Sex (1=Male, 0=Female)"),
    ("cp", Continuous, "Chest Pain Type (0-3)"),
    ("trestbps", Continuous, "Resting Blood Pressure"),
    ("chol", Continuous, "Serum Cholesterol (mg/dl)"),
    ("fbs", Binary, "Fasting Blood Sugar > 120 mg/dl"),
    ("thalach", Continuous, "Max Heart Rate Achieved"),
    ("exang", Binary, "Exercise Induced Angina"),
];

const PARKINSONS: &[FieldSpec] = &[
    ("fo", Continuous, "MDVP:Fo(Hz)"),
    ("fhi", Continuous, "MDVP:Fhi(Hz)"),
    ("flo", Continuous, "MDVP:Flo(Hz)"),
    ("jitter", Continuous, "MDVP:Jitter(%)"),
];

const LUNG_CANCER: &[FieldSpec] = &[
    ("smoking", Binary, "Smoking"),
    ("coughing", Binary, "Coughing"),
    ("chest_pain", Binary, "Chest Pain"),
];

const THYROID: &[FieldSpec] = &[
    ("age", Continuous, "Age"),
    ("sex", Binary, "Sex (1=Male, 0=Female)"),
    ("tsh", Continuous, "TSH Level"),
];

fn table(task_id: &str) -> Option<&'static [FieldSpec]> {
    match task_id {
        "diabetes" => Some(DIABETES),
        "heart_disease" => Some(HEART_DISEASE),
        "parkinsons" => Some(PARKINSONS),
        "lung_cancer" => Some(LUNG_CANCER),
        "thyroid" => Some(THYROID),
        _ => None,
    }
}

/// Authored descriptor list for a built-in task.
pub fn fields_for(task_id: &str) -> Option<Vec<FieldDescriptor>> {
    table(task_id).map(|specs| {
        FieldDescriptor::sequence(
            specs
                .iter()
                .map(|&(name, kind, prompt)| (name, kind, Some(prompt.to_string()))),
        )
    })
}
