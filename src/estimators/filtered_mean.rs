use crate::OlaError;
use crate::core::{Slice, Value};
use crate::estimators::estimator::{mismatch, require_field};
use crate::estimators::{Accumulator, EqualityFilter, Estimate, Estimator, MeanAccumulator, Mergeable};

/// Running mean of `target_field` over rows where `filter_field == filter_value`.
#[derive(Debug, Clone)]
pub struct FilteredMeanEstimator {
    filter: EqualityFilter,
    target_field: String,
    state: MeanAccumulator,
    rows: u64,
}

impl FilteredMeanEstimator {
    pub fn new(
        filter_field: impl Into<String>,
        filter_value: Value,
        target_field: impl Into<String>,
    ) -> Result<Self, OlaError> {
        Ok(Self {
            filter: EqualityFilter::new(filter_field, filter_value)?,
            target_field: require_field(&target_field.into(), "target")?,
            state: MeanAccumulator::default(),
            rows: 0,
        })
    }

    pub fn filter(&self) -> &EqualityFilter {
        &self.filter
    }

    pub fn filtered_count(&self) -> u64 {
        self.state.count()
    }
}

impl Estimator for FilteredMeanEstimator {
    fn name(&self) -> &'static str {
        "filtered-mean"
    }

    fn consume(&mut self, slice: &Slice) -> Result<Estimate, OlaError> {
        let index = slice.column_index(&self.target_field)?;
        let mut partial = MeanAccumulator::default();
        for record in slice.filtered(&self.filter.field, &self.filter.value)? {
            if let Some(v) = record.numeric_at_index(index)? {
                partial.add(v);
            }
        }
        self.state.merge(&partial);
        self.rows += slice.len() as u64;
        Ok(self.estimate())
    }

    fn estimate(&self) -> Estimate {
        Estimate::singleton(self.state.estimation())
    }

    fn rows_processed(&self) -> u64 {
        self.rows
    }
}

impl Mergeable for FilteredMeanEstimator {
    fn merge(&mut self, other: &Self) -> Result<(), OlaError> {
        if self.filter != other.filter {
            return Err(mismatch(self.name(), "filter"));
        }
        if self.target_field != other.target_field {
            return Err(mismatch(self.name(), "target field"));
        }
        self.state.merge(&other.state);
        self.rows += other.rows;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{header_sales, sales_row};

    fn active() -> FilteredMeanEstimator {
        FilteredMeanEstimator::new("status", Value::from("active"), "v").unwrap()
    }

    #[test]
    fn no_matching_rows_emits_zero() {
        let mut est = active();
        let slice = Slice::from_rows(
            header_sales(),
            vec![
                sales_row("a", Some(3.0), "idle", "u1"),
                sales_row("b", Some(5.0), "idle", "u2"),
            ],
        )
        .unwrap();
        assert_eq!(est.consume(&slice).unwrap(), Estimate::singleton(0.0));
        assert_eq!(est.consume(&Slice::empty(header_sales())).unwrap(), Estimate::singleton(0.0));
        assert_eq!(est.filtered_count(), 0);
        assert_eq!(est.rows_processed(), 2);
    }

    #[test]
    fn only_matching_rows_contribute() {
        let mut est = active();
        let first = Slice::from_rows(
            header_sales(),
            vec![
                sales_row("a", Some(10.0), "active", "u1"),
                sales_row("a", Some(100.0), "idle", "u1"),
                sales_row("b", None, "active", "u2"),
            ],
        )
        .unwrap();
        assert_eq!(est.consume(&first).unwrap().scalar(), Some(10.0));

        let second = Slice::from_rows(
            header_sales(),
            vec![sales_row("c", Some(20.0), "active", "u3")],
        )
        .unwrap();
        assert_eq!(est.consume(&second).unwrap().scalar(), Some(15.0));
        assert_eq!(est.filtered_count(), 2);
    }

    #[test]
    fn empty_filtered_subset_keeps_previous_estimate() {
        let mut est = active();
        let first = Slice::from_rows(header_sales(), vec![sales_row("a", Some(8.0), "active", "u")]).unwrap();
        est.consume(&first).unwrap();
        let second = Slice::from_rows(header_sales(), vec![sales_row("a", Some(1.0), "idle", "u")]).unwrap();
        assert_eq!(est.consume(&second).unwrap().scalar(), Some(8.0));
    }

    #[test]
    fn unknown_filter_field_is_fatal() {
        let mut est = FilteredMeanEstimator::new("state", Value::from("active"), "v").unwrap();
        let err = est.consume(&Slice::empty(header_sales())).unwrap_err();
        assert!(matches!(err, OlaError::MissingField(ref f) if f == "state"));
    }

    #[test]
    fn merge_requires_same_filter() {
        let mut a = active();
        let b = FilteredMeanEstimator::new("status", Value::from("idle"), "v").unwrap();
        assert!(matches!(a.merge(&b), Err(OlaError::IncompatibleMerge(_))));
        let c = active();
        assert!(a.merge(&c).is_ok());
    }
}
