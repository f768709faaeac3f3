use crate::core::value::Value;
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter, Result};

/// Identifier of one aggregation bucket.
///
/// Variant order matters: every numeric key sorts before every text key,
/// numeric keys compare numerically and text keys lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Numeric(OrderedFloat<f64>),
    Text(String),
}

impl GroupKey {
    /// The `""` key used by non-grouped estimates.
    pub fn blank() -> GroupKey {
        GroupKey::Text(String::new())
    }

    /// Rows whose grouping value is missing belong to no group.
    pub fn from_value(value: &Value) -> Option<GroupKey> {
        match value {
            Value::Numeric(x) if !x.is_nan() => Some(GroupKey::Numeric(OrderedFloat(*x))),
            Value::Text(s) => Some(GroupKey::Text(s.clone())),
            _ => None,
        }
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            GroupKey::Numeric(x) => write!(f, "{}", x.0),
            GroupKey::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        GroupKey::Text(s.to_string())
    }
}

impl From<f64> for GroupKey {
    fn from(x: f64) -> Self {
        GroupKey::Numeric(OrderedFloat(x))
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            GroupKey::Numeric(x) => serializer.serialize_f64(x.0),
            GroupKey::Text(s) => serializer.serialize_str(s),
        }
    }
}
