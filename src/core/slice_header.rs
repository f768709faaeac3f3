use crate::OlaError;
use crate::core::attributes::{Attribute, AttributeRef};

/// Schema shared by every record of a dataset.
///
/// The field set is fixed for the lifetime of a source; estimators resolve
/// their configured field names against it on every slice.
pub struct SliceHeader {
    pub relation_name: String,
    pub attributes: Vec<AttributeRef>,
}

impl SliceHeader {
    pub fn new(relation_name: String, attributes: Vec<AttributeRef>) -> SliceHeader {
        SliceHeader {
            relation_name,
            attributes,
        }
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.attributes.get(index).map(|a| a.as_ref())
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    /// Like [`index_of_attribute`](Self::index_of_attribute), but an absent
    /// field is a caller bug and is reported as [`OlaError::MissingField`].
    pub fn require_index(&self, name: &str) -> Result<usize, OlaError> {
        self.index_of_attribute(name)
            .ok_or_else(|| OlaError::MissingField(name.to_string()))
    }

    /// Same field names and kinds, in the same order.
    pub fn is_compatible(&self, other: &SliceHeader) -> bool {
        self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .zip(other.attributes.iter())
                .all(|(a, b)| a.name() == b.name() && a.kind() == b.kind())
    }
}

impl std::fmt::Debug for SliceHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.attributes.iter().map(|a| a.name()).collect();
        f.debug_struct("SliceHeader")
            .field("relation_name", &self.relation_name)
            .field("attributes", &names)
            .finish()
    }
}
