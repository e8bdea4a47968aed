//! Schema derivation from a dataset's CSV header

use crate::error::SchemaError;
use crate::schema::heuristic::infer_kind;
use crate::types::field::FieldDescriptor;
use csv::{ReaderBuilder, Trim};
use std::path::Path;
use tracing::debug;

/// Read the header row of `path` and turn every column except the last
/// (the label) into a field descriptor, in file order.
pub fn fields_from_dataset(path: &Path) -> Result<Vec<FieldDescriptor>, SchemaError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|source| SchemaError::Dataset {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader.headers().map_err(|source| SchemaError::Dataset {
        path: path.to_path_buf(),
        source,
    })?;

    if headers.is_empty() {
        return Err(SchemaError::MissingHeader(path.to_path_buf()));
    }

    let feature_columns = headers.len() - 1;
    if feature_columns == 0 {
        return Err(SchemaError::NoFeatureColumns(path.to_path_buf()));
    }

    let fields = FieldDescriptor::sequence(
        headers
            .iter()
            .take(feature_columns)
            .map(|name| (name, infer_kind(name), None)),
    );

    debug!(
        dataset = %path.display(),
        fields = fields.len(),
        label_column = headers.get(feature_columns).unwrap_or_default(),
        "Derived schema from dataset header"
    );

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::field::FieldKind;
    use std::io::Write;

    fn write_dataset(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_thyroid_header() {
        let file = write_dataset(
            "age,sex,on_thyroxine,TSH,T3_measured,T3,TT4,Outcome\n\
             41,1,0,1.3,1,2.5,125,0\n",
        );

        let fields = fields_from_dataset(file.path()).unwrap();
        let summary: Vec<(&str, FieldKind, usize)> = fields
            .iter()
            .map(|f| (f.name.as_str(), f.kind, f.position))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("age", FieldKind::Continuous, 0),
                ("sex", FieldKind::Binary, 1),
                ("on_thyroxine", FieldKind::Binary, 2),
                ("TSH", FieldKind::Continuous, 3),
                ("T3_measured", FieldKind::Binary, 4),
                ("T3", FieldKind::Continuous, 5),
                ("TT4", FieldKind::Continuous, 6),
            ]
        );
    }

    #[test]
    fn test_header_only_dataset() {
        let file = write_dataset(" Glucose , BMI ,Outcome\n");
        let fields = fields_from_dataset(file.path()).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Glucose");
        assert_eq!(fields[1].name, "BMI");
    }

    #[test]
    fn test_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let err = fields_from_dataset(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, SchemaError::Dataset { .. }));
    }

    #[test]
    fn test_empty_dataset() {
        let file = write_dataset("");
        let err = fields_from_dataset(file.path()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingHeader(_)));
    }

    #[test]
    fn test_label_only_dataset() {
        let file = write_dataset("Outcome\n1\n");
        let err = fields_from_dataset(file.path()).unwrap_err();
        assert!(matches!(err, SchemaError::NoFeatureColumns(_)));
    }
}
