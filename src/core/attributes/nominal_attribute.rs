use crate::core::attributes::{Attribute, AttributeKind};
use crate::core::value::Value;
use std::collections::HashMap;

/// Categorical field.
///
/// An empty label set means the domain is open: any text is accepted. Once
/// labels are given, only those labels are.
#[derive(Debug, Clone)]
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    pub label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    pub fn new(name: String) -> NominalAttribute {
        NominalAttribute {
            name,
            values: Vec::new(),
            label_to_index: HashMap::new(),
        }
    }

    pub fn with_values(name: String, values: Vec<String>) -> NominalAttribute {
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        NominalAttribute {
            name,
            values,
            label_to_index,
        }
    }

    pub fn is_open(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index_of_value(&self, v: &str) -> Option<usize> {
        self.label_to_index.get(v).copied()
    }
}

impl Attribute for NominalAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> AttributeKind {
        AttributeKind::Nominal
    }

    fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Missing => true,
            Value::Text(s) => self.is_open() || self.label_to_index.contains_key(s),
            Value::Numeric(_) => false,
        }
    }
}
