//! Field-kind inference from dataset column names

use crate::types::field::FieldKind;

/// Lowercase substrings that mark a column as a binary indicator.
///
/// Matching is plain substring search on the lowercased name, so a continuous
/// column that happens to contain one of these (e.g. "no" in "nodes") is
/// classified as binary.
pub const BINARY_MARKERS: &[&str] = &["yes", "no", "0/1", "binary", "on_", "measured", "sex"];

/// Infer the kind of a column from its name.
pub fn infer_kind(column: &str) -> FieldKind {
    let lowered = column.to_lowercase();
    if BINARY_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        FieldKind::Binary
    } else {
        FieldKind::Continuous
    }
}
