use disease_prediction::config::{AppConfig, SchemaStrategy};
use disease_prediction::error::ModelError;
use disease_prediction::schema::TaskSchemaResolver;
use disease_prediction::types::{FieldKind, Label};
use disease_prediction::{Catalogue, Classifier, PredictionAdapter, TaskRegistry, TerminalProvider};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Returns 1 when the first feature exceeds a cut-off, and remembers rows.
struct CutoffModel {
    arity: usize,
    cutoff: f64,
    rows: Mutex<Vec<Vec<f64>>>,
}

impl CutoffModel {
    fn new(arity: usize, cutoff: f64) -> Self {
        Self {
            arity,
            cutoff,
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl Classifier for CutoffModel {
    fn name(&self) -> &str {
        "cutoff"
    }

    fn input_arity(&self) -> usize {
        self.arity
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        self.rows.lock().unwrap().push(row.to_vec());
        Ok(if row[0] > self.cutoff { 1.0 } else { 0.0 })
    }
}

fn config_with_artifacts(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.models.models_dir = dir.join("models").to_string_lossy().into_owned();
    config.datasets.datasets_dir = dir.join("datasets").to_string_lossy().into_owned();

    fs::create_dir_all(&config.models.models_dir).unwrap();
    fs::create_dir_all(&config.datasets.datasets_dir).unwrap();
    for task in &config.tasks {
        fs::write(config.model_path(task), b"placeholder").unwrap();
    }

    let thyroid = config.tasks.iter_mut().find(|t| t.id == "thyroid").unwrap();
    thyroid.schema = SchemaStrategy::Derived;
    thyroid.dataset = Some("thyroid.csv".to_string());
    fs::write(
        dir.join("datasets").join("thyroid.csv"),
        "age,sex,on_thyroxine,TSH,T3_measured,T3,TT4,Outcome\n52,0,1,4.1,1,1.9,101,1\n",
    )
    .unwrap();

    config
}

#[test]
fn diabetes_form_from_terminal_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_artifacts(dir.path());
    let registry = TaskRegistry::from_config(&config).unwrap();

    let diabetes = Arc::new(CutoffModel::new(8, 1000.0));
    let catalogue = Catalogue::assemble(registry, &TaskSchemaResolver, |task| {
        let model: Arc<dyn Classifier> = if task.id == "diabetes" {
            diabetes.clone()
        } else {
            Arc::new(CutoffModel::new(3, 0.0))
        };
        Ok(model)
    })
    .unwrap();

    let adapter = PredictionAdapter::new(&catalogue);
    let input = Cursor::new("2\n120\n70\n20\n85\n26.5\n0.35\n30\n");
    let mut terminal = TerminalProvider::new(input, Vec::new());
    let mut messages: Vec<String> = Vec::new();

    let result = adapter
        .submit("diabetes", &mut terminal, &mut messages)
        .expect("prediction should succeed");

    assert_eq!(result.label, Label::Negative);
    assert_eq!(result.verdict, "Not Diabetic");
    assert!(messages.is_empty());
    assert_eq!(
        diabetes.rows.lock().unwrap().as_slice(),
        &[vec![2.0, 120.0, 70.0, 20.0, 85.0, 26.5, 0.35, 30.0]]
    );
}

#[test]
fn derived_thyroid_schema_is_cached_and_checked_late() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_artifacts(dir.path());
    let registry = TaskRegistry::from_config(&config).unwrap();

    // The thyroid model was trained on three columns, the dataset has seven
    let thyroid = Arc::new(CutoffModel::new(3, 0.0));
    let catalogue = Catalogue::assemble(registry, &TaskSchemaResolver, |task| {
        let model: Arc<dyn Classifier> = if task.id == "thyroid" {
            thyroid.clone()
        } else {
            Arc::new(CutoffModel::new(8, 0.0))
        };
        Ok(model)
    })
    .unwrap();

    let fields = catalogue.schema("thyroid").unwrap();
    let kinds: Vec<(&str, FieldKind)> = fields.iter().map(|f| (f.name.as_str(), f.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            ("age", FieldKind::Continuous),
            ("sex", FieldKind::Binary),
            ("on_thyroxine", FieldKind::Binary),
            ("TSH", FieldKind::Continuous),
            ("T3_measured", FieldKind::Binary),
            ("T3", FieldKind::Continuous),
            ("TT4", FieldKind::Continuous),
        ]
    );

    // Removing the dataset after startup does not matter: the schema is cached
    fs::remove_file(dir.path().join("datasets").join("thyroid.csv")).unwrap();

    let adapter = PredictionAdapter::new(&catalogue);
    let mut provider = disease_prediction::MapValueProvider::from_assignments(["age=52"]).unwrap();
    let mut messages: Vec<String> = Vec::new();

    let result = adapter.submit("thyroid", &mut provider, &mut messages);
    assert!(result.is_none());
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains('3') && messages[0].contains('7'));
    assert!(thyroid.rows.lock().unwrap().is_empty());
}

#[test]
fn missing_model_stops_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_artifacts(dir.path());
    fs::remove_file(config.model_path(&config.tasks[3])).unwrap();

    let err = Catalogue::load(&config).err().expect("startup must fail");
    let message = format!("{err:#}");
    assert!(message.contains("lungs_disease_model.onnx"));
    assert!(message.contains("not found"));
}
