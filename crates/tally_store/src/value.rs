//! Dynamic record value type.

use serde::{Deserialize, Serialize};

/// The scalar payload of a record.
///
/// Values arrive over the wire as arbitrary JSON scalars. The variants make
/// the aggregation coercion rules explicit: only a genuine number is
/// numeric; everything else coerces to zero when summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A genuine number.
    Numeric(f64),
    /// A text string.
    Text(String),
    /// Anything else (bool, null, array, object), stored as given.
    Other(serde_json::Value),
}

impl Value {
    /// Returns the numeric value, if this is a genuine number.
    #[must_use]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric value, coercing non-numeric values to zero.
    #[must_use]
    pub fn numeric_or_zero(&self) -> f64 {
        self.as_numeric().unwrap_or(0.0)
    }

    /// Returns true if the value counts as absent for validation purposes.
    ///
    /// Null and the empty string are absent; everything else - including
    /// numeric zero and `false` - is present.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Text(text) => text.is_empty(),
            Value::Other(other) => other.is_null(),
            Value::Numeric(_) => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Numeric(n)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}
