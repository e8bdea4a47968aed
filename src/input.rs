//! Input and message capabilities of the user interface.
//!
//! The prediction adapter only talks to a [`ValueProvider`] (one value per
//! field) and a [`MessageSink`] (user-visible errors). The terminal front end
//! and scripted `NAME=VALUE` input both live here.

use crate::types::field::{FieldDescriptor, FieldKind, FieldValue};
use anyhow::{bail, Result};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};

/// Supplies the current value of a field, keyed by its name.
pub trait ValueProvider {
    fn value_for(&mut self, field: &FieldDescriptor) -> io::Result<FieldValue>;

    /// Names this provider holds values for that are not in `fields`.
    fn unknown_keys(&self, _fields: &[FieldDescriptor]) -> Vec<String> {
        Vec::new()
    }
}

/// Receives messages that must be shown to the user.
pub trait MessageSink {
    fn error(&mut self, message: &str);
}

impl MessageSink for Vec<String> {
    fn error(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Writes user-visible errors to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn error(&mut self, message: &str) {
        println!("Error: {message}");
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "true" | "on" => Some(true),
        "0" | "n" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Parse text typed for a field of a known kind.
pub fn parse_value(text: &str, kind: FieldKind) -> Option<FieldValue> {
    match kind {
        FieldKind::Binary => parse_flag(text).map(FieldValue::Flag),
        FieldKind::Continuous => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(FieldValue::Number),
    }
}

/// Values given up front, e.g. with `--set Glucose=120`.
///
/// Fields without a value get the widget default (0 or off). Names must match
/// a field exactly; anything else is reported by `unknown_keys`.
#[derive(Debug, Clone, Default)]
pub struct MapValueProvider {
    values: HashMap<String, FieldValue>,
}

impl MapValueProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Parse `NAME=VALUE` pairs. Values are numbers or yes/no words.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut provider = Self::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let Some((name, raw)) = assignment.split_once('=') else {
                bail!("Expected NAME=VALUE, got '{assignment}'");
            };
            let value = match raw.trim().parse::<f64>() {
                Ok(number) => FieldValue::Number(number),
                Err(_) => match parse_flag(raw) {
                    Some(flag) => FieldValue::Flag(flag),
                    None => bail!("Value for '{}' is neither a number nor yes/no: '{raw}'", name.trim()),
                },
            };
            provider.insert(name.trim(), value);
        }
        Ok(provider)
    }
}

impl ValueProvider for MapValueProvider {
    fn value_for(&mut self, field: &FieldDescriptor) -> io::Result<FieldValue> {
        Ok(self
            .values
            .get(&field.name)
            .copied()
            .unwrap_or_else(|| FieldValue::default_for(field.kind)))
    }

    fn unknown_keys(&self, fields: &[FieldDescriptor]) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .values
            .keys()
            .filter(|name| !fields.iter().any(|f| &f.name == *name))
            .cloned()
            .collect();
        unknown.sort();
        unknown
    }
}

/// Line-oriented prompts on a reader/writer pair (stdin/stdout in `main`).
pub struct TerminalProvider<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> TerminalProvider<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{text}")
    }
}

impl<R: BufRead, W: Write> ValueProvider for TerminalProvider<R, W> {
    fn value_for(&mut self, field: &FieldDescriptor) -> io::Result<FieldValue> {
        let prompt = match field.kind {
            FieldKind::Binary => format!("{} (y/N): ", field.prompt()),
            FieldKind::Continuous => format!("{} [0]: ", field.prompt()),
        };

        loop {
            let Some(line) = self.ask(&prompt)? else {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before all fields were entered",
                ));
            };

            if line.is_empty() {
                return Ok(FieldValue::default_for(field.kind));
            }

            match parse_value(&line, field.kind) {
                Some(value) => return Ok(value),
                None => match field.kind {
                    FieldKind::Binary => self.say("Please answer yes or no.")?,
                    FieldKind::Continuous => self.say("Please enter a number.")?,
                },
            }
        }
    }
}
