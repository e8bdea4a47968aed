//! Input field descriptors and the values collected for them

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a field's value is entered and encoded in the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Any finite real number (numeric entry, step 1, default 0)
    Continuous,
    /// Two-state indicator encoded as 0.0 / 1.0 (toggle, default off)
    Binary,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Continuous => f.pad("continuous"),
            FieldKind::Binary => f.pad("binary"),
        }
    }
}

/// One input slot of a task, at a fixed position in the feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Lookup key, also shown to the user
    pub name: String,
    /// Value kind
    pub kind: FieldKind,
    /// Index in the feature vector
    pub position: usize,
    /// Longer display text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl FieldDescriptor {
    /// Text to show when asking for this field.
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(&self.name)
    }

    /// Build a descriptor list from `(name, kind, prompt)` triples.
    ///
    /// Positions are assigned from iteration order, so they are always
    /// contiguous and zero-based.
    pub fn sequence<I, S>(fields: I) -> Vec<FieldDescriptor>
    where
        I: IntoIterator<Item = (S, FieldKind, Option<String>)>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .enumerate()
            .map(|(position, (name, kind, prompt))| FieldDescriptor {
                name: name.into(),
                kind,
                position,
                prompt,
            })
            .collect()
    }
}

/// A raw value handed over by the input capability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
}

impl FieldValue {
    /// Default value of the widget for a field kind.
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Binary => FieldValue::Flag(false),
            FieldKind::Continuous => FieldValue::Number(0.0),
        }
    }

    fn is_truthy(self) -> bool {
        match self {
            FieldValue::Flag(b) => b,
            FieldValue::Number(n) => n != 0.0 && !n.is_nan(),
        }
    }

    /// Encode the value for a slot of the given kind.
    ///
    /// Binary slots only ever produce 0.0 or 1.0. Continuous slots return
    /// `None` for NaN and infinities; ranges are not checked.
    pub fn coerce(self, kind: FieldKind) -> Option<f64> {
        match kind {
            FieldKind::Binary => Some(if self.is_truthy() { 1.0 } else { 0.0 }),
            FieldKind::Continuous => match self {
                FieldValue::Flag(b) => Some(if b { 1.0 } else { 0.0 }),
                FieldValue::Number(n) if n.is_finite() => Some(n),
                FieldValue::Number(_) => None,
            },
        }
    }
}
