use crate::OlaError;
use crate::core::{Slice, Value};
use crate::estimators::estimator::{mismatch, require_field};
use crate::estimators::{EqualityFilter, Estimate, Estimator, Mergeable};
use crate::sketches::HyperLogLog;

/// Approximate number of distinct `distinct_field` values among rows where
/// `filter_field == filter_value`, backed by a [`HyperLogLog`] sketch.
///
/// Values enter the sketch through their canonical string form; each slice
/// contributes its set of distinct values once. Missing values are not
/// counted.
#[derive(Debug, Clone)]
pub struct FilteredDistinctEstimator {
    filter: EqualityFilter,
    distinct_field: String,
    sketch: HyperLogLog,
    rows: u64,
}

impl FilteredDistinctEstimator {
    pub fn new(
        filter_field: impl Into<String>,
        filter_value: Value,
        distinct_field: impl Into<String>,
        precision: u8,
        seed: u64,
    ) -> Result<Self, OlaError> {
        Ok(Self {
            filter: EqualityFilter::new(filter_field, filter_value)?,
            distinct_field: require_field(&distinct_field.into(), "distinct")?,
            sketch: HyperLogLog::new(precision, seed)?,
            rows: 0,
        })
    }

    pub fn sketch(&self) -> &HyperLogLog {
        &self.sketch
    }
}

impl Estimator for FilteredDistinctEstimator {
    fn name(&self) -> &'static str {
        "filtered-distinct"
    }

    fn consume(&mut self, slice: &Slice) -> Result<Estimate, OlaError> {
        let rows = slice.filtered(&self.filter.field, &self.filter.value)?;
        let unique = slice.unique_canonical(&self.distinct_field, rows)?;
        for value in &unique {
            self.sketch.add(value);
        }
        self.rows += slice.len() as u64;
        Ok(self.estimate())
    }

    fn estimate(&self) -> Estimate {
        Estimate::singleton(self.sketch.cardinality())
    }

    fn rows_processed(&self) -> u64 {
        self.rows
    }
}

impl Mergeable for FilteredDistinctEstimator {
    fn merge(&mut self, other: &Self) -> Result<(), OlaError> {
        if self.filter != other.filter || self.distinct_field != other.distinct_field {
            return Err(mismatch(self.name(), "field configuration"));
        }
        self.sketch.merge(&other.sketch)?;
        self.rows += other.rows;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketches::{DEFAULT_PRECISION, DEFAULT_SEED};
    use crate::testing::dummies::{header_sales, sales_row, synthetic_sales};
    use std::collections::HashSet;

    fn estimator(precision: u8) -> FilteredDistinctEstimator {
        FilteredDistinctEstimator::new("status", Value::from("active"), "user", precision, DEFAULT_SEED)
            .unwrap()
    }

    #[test]
    fn counts_distinct_users_among_matching_rows() {
        let mut est = estimator(12);
        let slice = Slice::from_rows(
            header_sales(),
            vec![
                sales_row("a", Some(1.0), "active", "u1"),
                sales_row("a", Some(1.0), "active", "u1"),
                sales_row("a", Some(1.0), "active", "u2"),
                sales_row("a", Some(1.0), "idle", "u3"),
            ],
        )
        .unwrap();
        let out = est.consume(&slice).unwrap();
        let estimate = out.scalar().unwrap();
        assert!((estimate - 2.0).abs() < 0.1, "estimate was {estimate}");
    }

    #[test]
    fn no_matching_rows_estimates_zero() {
        let mut est = estimator(DEFAULT_PRECISION);
        let out = est.consume(&Slice::empty(header_sales())).unwrap();
        assert_eq!(out, Estimate::singleton(0.0));
        assert!(est.sketch().is_empty());
    }

    #[test]
    fn sketch_state_is_independent_of_slicing() {
        let whole = Slice::from_rows(header_sales(), synthetic_sales(800, 21)).unwrap();
        let mut reference = estimator(10);
        reference.consume(&whole).unwrap();
        for size in [1, 50, 333] {
            let mut est = estimator(10);
            for part in whole.chunks(size) {
                est.consume(&part).unwrap();
            }
            assert_eq!(est.sketch().registers(), reference.sketch().registers());
            assert_eq!(est.estimate(), reference.estimate());
        }
    }

    #[test]
    fn estimate_tracks_exact_distinct_count() {
        let rows = synthetic_sales(5_000, 8);
        let exact: HashSet<String> = rows
            .iter()
            .filter(|r| r[2] == Value::from("active"))
            .filter_map(|r| r[3].canonical())
            .collect();
        let whole = Slice::from_rows(header_sales(), rows).unwrap();
        let mut est = estimator(12);
        for part in whole.chunks(500) {
            est.consume(&part).unwrap();
        }
        let estimate = est.estimate().scalar().unwrap();
        let error = (estimate - exact.len() as f64).abs() / exact.len() as f64;
        assert!(error < 0.05, "estimate={estimate} exact={}", exact.len());
    }

    #[test]
    fn invalid_precision_is_rejected_at_construction() {
        let err = FilteredDistinctEstimator::new("status", Value::from("active"), "user", 30, 1)
            .unwrap_err();
        assert!(matches!(err, OlaError::InvalidConfiguration(_)));
    }

    #[test]
    fn merge_requires_matching_sketch_parameters() {
        let mut a = estimator(10);
        let b = estimator(11);
        assert!(matches!(a.merge(&b), Err(OlaError::IncompatibleMerge(_))));
    }
}
