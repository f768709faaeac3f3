use crate::OlaError;
use crate::core::Value;
use crate::estimators::estimator::require_field;

/// `field == value` row predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityFilter {
    pub field: String,
    pub value: Value,
}

impl EqualityFilter {
    /// A missing filter value would never match any row and is rejected.
    pub fn new(field: impl Into<String>, value: Value) -> Result<Self, OlaError> {
        let field = require_field(&field.into(), "filter")?;
        if value.is_missing() {
            return Err(OlaError::InvalidConfiguration(format!(
                "filter value for '{field}' must not be missing"
            )));
        }
        Ok(Self { field, value })
    }
}
