use crate::OlaError;
use crate::core::Slice;
use crate::estimators::Estimate;

/// Incremental aggregate over a sequence of slices.
///
/// Implementations receive every slice exactly once, in delivery order, and
/// return the estimate over everything consumed so far. A slice that fails
/// leaves the accumulated state untouched.
pub trait Estimator: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Folds `slice` into the running state and returns the new estimate.
    fn consume(&mut self, slice: &Slice) -> Result<Estimate, OlaError>;

    /// Current estimate without consuming anything.
    fn estimate(&self) -> Estimate;

    /// Sum of the lengths of all slices consumed so far.
    fn rows_processed(&self) -> u64;
}

/// Estimators whose state can be built over disjoint partitions and
/// combined afterwards. Merging is associative and commutative.
pub trait Mergeable {
    /// Absorbs `other`. Both sides must share the same configuration.
    fn merge(&mut self, other: &Self) -> Result<(), OlaError>;
}

/// `original_row_count / processed_rows`, or `0` before any row was seen.
#[inline]
pub fn scaling_factor(original_row_count: u64, processed_rows: u64) -> f64 {
    if processed_rows == 0 {
        0.0
    } else {
        original_row_count as f64 / processed_rows as f64
    }
}

pub(crate) fn require_field(name: &str, role: &str) -> Result<String, OlaError> {
    if name.trim().is_empty() {
        return Err(OlaError::InvalidConfiguration(format!(
            "{role} field name must not be empty"
        )));
    }
    Ok(name.to_string())
}

pub(crate) fn require_row_count(original_row_count: u64) -> Result<u64, OlaError> {
    if original_row_count == 0 {
        return Err(OlaError::InvalidConfiguration(
            "original_row_count must be > 0".into(),
        ));
    }
    Ok(original_row_count)
}

pub(crate) fn mismatch(estimator: &str, what: &str) -> OlaError {
    OlaError::IncompatibleMerge(format!("{estimator}: {what} differs"))
}
