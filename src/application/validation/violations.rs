use crate::domain::errors::DomainError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

/// One violated constraint, attributed to a request field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value,
        }
    }
}

/// Every violation found in one input, never truncated to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn single(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Folds derive-based errors in. Fields that already carry a violation
    /// (a wrong JSON type, say) are skipped, and the result is ordered by
    /// field name so responses are stable across runs.
    pub fn extend_from(&mut self, errors: &ValidationErrors) {
        let collected: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .filter(|(field, _)| !self.has_field(field))
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter()
                    .map(move |err| violation_from(&field, err))
                    .collect::<Vec<_>>()
            })
            .collect();
        self.violations.extend(collected);
        self.violations.sort_by(|a, b| a.field.cmp(&b.field));
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<&ValidationErrors> for ValidationFailure {
    fn from(errors: &ValidationErrors) -> Self {
        let mut failure = Self::default();
        failure.extend_from(errors);
        failure
    }
}

impl From<DomainError> for ValidationFailure {
    fn from(err: DomainError) -> Self {
        let (field, message) = match err {
            DomainError::InvalidField { field, message } => (field, message),
            other => ("body", other.to_string()),
        };
        Self::single(FieldViolation::new(field, message, None))
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn violation_from(field: &str, err: &ValidationError) -> FieldViolation {
    let message = err
        .message
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| default_message(&err.code, err));
    let value = err.params.get("value").cloned();
    FieldViolation::new(field, message, value)
}

fn default_message(code: &str, err: &ValidationError) -> String {
    match code {
        "required" => "is required".into(),
        "email" => "must be a valid email address".into(),
        "url" => "must be a valid URL".into(),
        "length" => match (err.params.get("min"), err.params.get("max")) {
            (Some(min), Some(max)) => format!("length must be between {min} and {max}"),
            (Some(min), None) => format!("length must be at least {min}"),
            (None, Some(max)) => format!("length must be at most {max}"),
            (None, None) => "has an invalid length".into(),
        },
        other => format!("failed {other} check"),
    }
}
