use crate::core::attributes::{Attribute, AttributeKind};
use crate::core::value::Value;

#[derive(Debug, Clone)]
pub struct NumericAttribute {
    pub name: String,
}

impl NumericAttribute {
    pub fn new(name: String) -> NumericAttribute {
        NumericAttribute { name }
    }
}

impl Attribute for NumericAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> AttributeKind {
        AttributeKind::Numeric
    }

    fn accepts(&self, value: &Value) -> bool {
        matches!(value, Value::Numeric(_) | Value::Missing)
    }
}
