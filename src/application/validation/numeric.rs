use serde::{Deserialize, Serialize};

/// A number as clients send it: JSON numbers and numeric strings (query
/// strings, form-encoded clients) are both accepted and coerced later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// An empty or whitespace-only string, as sent by `?min_price=`.
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericInput::Text(text) if text.trim().is_empty())
    }

    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NumericInput::Number(value) => Some(*value).filter(|v| v.is_finite()),
            NumericInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
        }
    }

    /// Whole, non-negative numbers that fit in a `u32`.
    pub fn to_u32(&self) -> Option<u32> {
        match self {
            NumericInput::Text(text) => text.trim().parse::<u32>().ok(),
            NumericInput::Number(value) => {
                if value.fract() == 0.0 && *value >= 0.0 && *value <= f64::from(u32::MAX) {
                    Some(*value as u32)
                } else {
                    None
                }
            }
        }
    }
}
