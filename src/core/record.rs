use crate::OlaError;
use crate::core::attributes::Attribute;
use crate::core::slice_header::SliceHeader;
use crate::core::value::Value;
use std::sync::Arc;

/// One row: an ordered mapping from the header's field names to values.
#[derive(Debug, Clone)]
pub struct Record {
    pub header: Arc<SliceHeader>,
    pub values: Vec<Value>,
}

impl Record {
    pub fn new(header: Arc<SliceHeader>, values: Vec<Value>) -> Record {
        Record { header, values }
    }

    pub fn header(&self) -> &SliceHeader {
        &self.header
    }

    pub fn value_at_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get(&self, name: &str) -> Result<&Value, OlaError> {
        let index = self.header.require_index(name)?;
        self.values
            .get(index)
            .ok_or_else(|| OlaError::MissingField(name.to_string()))
    }

    pub fn is_missing_at_index(&self, index: usize) -> bool {
        self.values.get(index).is_none_or(Value::is_missing)
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.header.attribute_at_index(index)
    }

    /// Numeric view of a cell: `Ok(None)` for missing values, an error when
    /// the cell holds text.
    pub fn numeric_at_index(&self, index: usize) -> Result<Option<f64>, OlaError> {
        match self.values.get(index) {
            Some(Value::Numeric(x)) if !x.is_nan() => Ok(Some(*x)),
            Some(Value::Numeric(_)) | Some(Value::Missing) => Ok(None),
            Some(other) => Err(OlaError::TypeMismatch {
                field: self.field_name(index),
                expected: "numeric",
                found: other.type_name().to_string(),
            }),
            None => Err(OlaError::MissingField(self.field_name(index))),
        }
    }

    pub fn number_of_attributes(&self) -> usize {
        self.header.number_of_attributes()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.values.clone()
    }

    fn field_name(&self, index: usize) -> String {
        self.attribute_at_index(index)
            .map_or_else(|| format!("#{index}"), |a| a.name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::header_sales;

    fn record() -> Record {
        Record::new(
            header_sales(),
            vec![
                Value::from("a"),
                Value::from(10.0),
                Value::from("active"),
                Value::Missing,
            ],
        )
    }

    #[test]
    fn access_by_name_and_index() {
        let r = record();
        assert_eq!(r.get("g").unwrap(), &Value::from("a"));
        assert_eq!(r.value_at_index(1), Some(&Value::Numeric(10.0)));
        assert_eq!(r.number_of_attributes(), 4);
        assert!(matches!(r.get("zzz"), Err(OlaError::MissingField(_))));
    }

    #[test]
    fn numeric_view() {
        let r = record();
        assert_eq!(r.numeric_at_index(1).unwrap(), Some(10.0));
        assert_eq!(r.numeric_at_index(3).unwrap(), None);
        assert!(r.is_missing_at_index(3));
        let err = r.numeric_at_index(0).unwrap_err();
        assert!(matches!(err, OlaError::TypeMismatch { ref field, .. } if field == "g"));
    }
}
