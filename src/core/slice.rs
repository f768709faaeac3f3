use crate::OlaError;
use crate::core::attributes::AttributeKind;
use crate::core::record::Record;
use crate::core::slice_header::SliceHeader;
use crate::core::value::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

/// One increment of data: a finite, ordered run of records sharing a header.
#[derive(Debug, Clone)]
pub struct Slice {
    header: Arc<SliceHeader>,
    records: Vec<Record>,
}

impl Slice {
    /// Builds a slice, checking every record against `header`: arity,
    /// compatible schema and per-attribute value acceptance.
    pub fn new(header: Arc<SliceHeader>, records: Vec<Record>) -> Result<Slice, OlaError> {
        for (row, record) in records.iter().enumerate() {
            if !Arc::ptr_eq(&header, &record.header) && !header.is_compatible(&record.header) {
                return Err(OlaError::SchemaMismatch(format!(
                    "row {row} was built for relation '{}' with an incompatible schema",
                    record.header.relation_name()
                )));
            }
            Self::check_row(&header, row, &record.values)?;
        }
        Ok(Slice { header, records })
    }

    /// Convenience constructor from raw value rows.
    pub fn from_rows(header: Arc<SliceHeader>, rows: Vec<Vec<Value>>) -> Result<Slice, OlaError> {
        let records = rows
            .into_iter()
            .map(|values| Record::new(Arc::clone(&header), values))
            .collect();
        Self::new(header, records)
    }

    /// Rows already checked against `header`, e.g. taken from another slice
    /// with the same header.
    pub(crate) fn from_validated(header: Arc<SliceHeader>, records: Vec<Record>) -> Slice {
        Slice { header, records }
    }

    pub fn empty(header: Arc<SliceHeader>) -> Slice {
        Slice {
            header,
            records: Vec::new(),
        }
    }

    fn check_row(header: &SliceHeader, row: usize, values: &[Value]) -> Result<(), OlaError> {
        if values.len() != header.number_of_attributes() {
            return Err(OlaError::SchemaMismatch(format!(
                "row {row} has {} values, header declares {}",
                values.len(),
                header.number_of_attributes()
            )));
        }
        for (attribute, value) in header.attributes.iter().zip(values) {
            if !attribute.accepts(value) {
                return Err(OlaError::TypeMismatch {
                    field: attribute.name().to_string(),
                    expected: match attribute.kind() {
                        AttributeKind::Numeric => "numeric",
                        AttributeKind::Nominal => "nominal label",
                    },
                    found: value.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn header(&self) -> &SliceHeader {
        &self.header
    }

    pub fn header_arc(&self) -> Arc<SliceHeader> {
        Arc::clone(&self.header)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn column_index(&self, field: &str) -> Result<usize, OlaError> {
        self.header.require_index(field)
    }

    /// Rows where `field == value`. The field is resolved up front, so an
    /// unknown field fails even when the slice is empty.
    pub fn filtered<'a>(
        &'a self,
        field: &str,
        value: &'a Value,
    ) -> Result<impl Iterator<Item = &'a Record> + use<'a>, OlaError> {
        let index = self.column_index(field)?;
        Ok(self.records.iter().filter(move |r| {
            r.value_at_index(index)
                .is_some_and(|cell| cell.matches(value))
        }))
    }

    /// Distinct canonical forms of `field` over `rows`, missing values
    /// excluded.
    pub fn unique_canonical<'a>(
        &self,
        field: &str,
        rows: impl Iterator<Item = &'a Record>,
    ) -> Result<BTreeSet<String>, OlaError> {
        let index = self.column_index(field)?;
        Ok(rows
            .filter_map(|r| r.value_at_index(index).and_then(Value::canonical))
            .collect())
    }

    /// Splits the slice into consecutive chunks of at most `size` rows.
    pub fn chunks(&self, size: usize) -> Vec<Slice> {
        if size == 0 {
            return vec![self.clone()];
        }
        self.records
            .chunks(size)
            .map(|c| Slice::from_validated(Arc::clone(&self.header), c.to_vec()))
            .collect()
    }
}
