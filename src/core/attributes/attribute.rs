use crate::core::value::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Numeric,
    Nominal,
}

/// One field of a slice schema.
pub trait Attribute: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> AttributeKind;

    /// Whether `value` may appear in this field. Missing values are always
    /// accepted.
    fn accepts(&self, value: &Value) -> bool;
}

pub type AttributeRef = Arc<dyn Attribute>;
