// src/application/validation/body.rs
use super::{FieldViolation, NumericInput, ValidationFailure};
use serde_json::{Map, Value};

/// Pulls typed fields out of a JSON object. A field with the wrong JSON type
/// is recorded as a violation and read as absent, so the remaining fields
/// are still validated. `null` reads as absent; unknown keys are ignored.
pub(crate) struct FieldReader {
    fields: Map<String, Value>,
    mismatches: ValidationFailure,
}

impl FieldReader {
    pub(crate) fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            mismatches: ValidationFailure::default(),
        }
    }

    pub(crate) fn text(&mut self, field: &'static str) -> Option<String> {
        match self.fields.remove(field)? {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => self.mismatch(field, "must be a string", other),
        }
    }

    pub(crate) fn text_list(&mut self, field: &'static str) -> Option<Vec<String>> {
        match self.fields.remove(field)? {
            Value::Null => None,
            Value::Array(items) if items.iter().all(Value::is_string) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text),
                        _ => None,
                    })
                    .collect(),
            ),
            other => self.mismatch(field, "must be an array of strings", other),
        }
    }

    pub(crate) fn number(&mut self, field: &'static str) -> Option<NumericInput> {
        match self.fields.remove(field)? {
            Value::Null => None,
            Value::Number(number) => match number.as_f64() {
                Some(value) => Some(NumericInput::Number(value)),
                None => self.mismatch(field, "must be a number", Value::Number(number)),
            },
            Value::String(text) => Some(NumericInput::Text(text)),
            other => self.mismatch(field, "must be a number", other),
        }
    }

    pub(crate) fn finish(self) -> ValidationFailure {
        self.mismatches
    }

    fn mismatch<T>(&mut self, field: &'static str, message: &str, value: Value) -> Option<T> {
        self.mismatches
            .push(FieldViolation::new(field, message, Some(value)));
        None
    }
}
