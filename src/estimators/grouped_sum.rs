use crate::OlaError;
use crate::core::Slice;
use crate::estimators::estimator::{mismatch, require_field, require_row_count};
use crate::estimators::{
    Accumulator, Estimate, Estimator, GroupedAccumulator, Mergeable, SumAccumulator, ValueSource,
    scaling_factor,
};

/// Per-group sum of `sum_field`, projected to the unsampled dataset.
///
/// Slices are assumed to be a uniform random sample of a dataset with
/// `original_row_count` rows; the cumulative sums are multiplied by
/// `original_row_count / rows_processed` on every emission.
#[derive(Debug, Clone)]
pub struct GroupedSumEstimator {
    original_row_count: u64,
    groupby_field: String,
    sum_field: String,
    state: GroupedAccumulator<SumAccumulator>,
    rows: u64,
}

impl GroupedSumEstimator {
    pub fn new(
        original_row_count: u64,
        groupby_field: impl Into<String>,
        sum_field: impl Into<String>,
    ) -> Result<Self, OlaError> {
        Ok(Self {
            original_row_count: require_row_count(original_row_count)?,
            groupby_field: require_field(&groupby_field.into(), "groupby")?,
            sum_field: require_field(&sum_field.into(), "sum")?,
            state: GroupedAccumulator::default(),
            rows: 0,
        })
    }

    pub fn scale(&self) -> f64 {
        scaling_factor(self.original_row_count, self.rows)
    }
}

impl Estimator for GroupedSumEstimator {
    fn name(&self) -> &'static str {
        "grouped-sum"
    }

    fn consume(&mut self, slice: &Slice) -> Result<Estimate, OlaError> {
        let partial = GroupedAccumulator::from_slice(
            slice,
            &self.groupby_field,
            ValueSource::Numeric(&self.sum_field),
        )?;
        self.state.merge(&partial);
        self.rows += slice.len() as u64;
        Ok(self.estimate())
    }

    fn estimate(&self) -> Estimate {
        let scale = self.scale();
        self.state.estimate_with(|acc| acc.estimation() * scale)
    }

    fn rows_processed(&self) -> u64 {
        self.rows
    }
}

impl Mergeable for GroupedSumEstimator {
    fn merge(&mut self, other: &Self) -> Result<(), OlaError> {
        if self.original_row_count != other.original_row_count {
            return Err(mismatch(self.name(), "original row count"));
        }
        if self.groupby_field != other.groupby_field || self.sum_field != other.sum_field {
            return Err(mismatch(self.name(), "field configuration"));
        }
        self.state.merge(&other.state);
        self.rows += other.rows;
        Ok(())
    }
}
