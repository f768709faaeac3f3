use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use std::fmt::{Display, Formatter, Result};

/// A single cell of a record.
///
/// `Numeric(NaN)` is indistinguishable from `Missing` for every aggregate:
/// both are excluded from sums, counts and distinct sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Value {
    Numeric(f64),
    Text(String),
    Missing,
}

impl Value {
    #[inline]
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Numeric(x) => x.is_nan(),
            Value::Text(_) => false,
        }
    }

    /// Equality predicate used by filters. Missing values never match,
    /// not even another missing value.
    pub fn matches(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Numeric(a), Value::Numeric(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }

    /// Canonical string form fed to the cardinality sketch.
    ///
    /// Returns `None` for missing values.
    pub fn canonical(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        match self {
            Value::Numeric(x) => Some(x.to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Missing => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Numeric(_) => "numeric",
            Value::Text(_) => "text",
            Value::Missing => "missing",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Value::Numeric(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Missing => write!(f, "<missing>"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Numeric(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Numeric(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Missing, Into::into)
    }
}
