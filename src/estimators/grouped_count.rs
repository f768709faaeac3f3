use crate::OlaError;
use crate::core::Slice;
use crate::estimators::estimator::{mismatch, require_field, require_row_count};
use crate::estimators::{
    Accumulator, CountAccumulator, Estimate, Estimator, GroupedAccumulator, Mergeable, ValueSource,
    scaling_factor,
};

/// Per-group count projected to the unsampled dataset.
///
/// With a `count_field`, only rows where that field is present are counted;
/// without one, every row of the group is. Counts are cumulative over all
/// slices and scaled once per emission.
#[derive(Debug, Clone)]
pub struct GroupedCountEstimator {
    original_row_count: u64,
    groupby_field: String,
    count_field: Option<String>,
    state: GroupedAccumulator<CountAccumulator>,
    rows: u64,
}

impl GroupedCountEstimator {
    pub fn new(
        original_row_count: u64,
        groupby_field: impl Into<String>,
        count_field: Option<String>,
    ) -> Result<Self, OlaError> {
        Ok(Self {
            original_row_count: require_row_count(original_row_count)?,
            groupby_field: require_field(&groupby_field.into(), "groupby")?,
            count_field: count_field
                .map(|f| require_field(&f, "count"))
                .transpose()?,
            state: GroupedAccumulator::default(),
            rows: 0,
        })
    }

    pub fn scale(&self) -> f64 {
        scaling_factor(self.original_row_count, self.rows)
    }

    /// Unscaled cumulative counts.
    pub fn raw_counts(&self) -> Estimate {
        self.state.estimate_with(|acc| acc.estimation())
    }
}

impl Estimator for GroupedCountEstimator {
    fn name(&self) -> &'static str {
        "grouped-count"
    }

    fn consume(&mut self, slice: &Slice) -> Result<Estimate, OlaError> {
        let source = match &self.count_field {
            Some(field) => ValueSource::Presence(field),
            None => ValueSource::Row,
        };
        let partial = GroupedAccumulator::from_slice(slice, &self.groupby_field, source)?;
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

impl Mergeable for GroupedCountEstimator {
    fn merge(&mut self, other: &Self) -> Result<(), OlaError> {
        if self.original_row_count != other.original_row_count {
            return Err(mismatch(self.name(), "original row count"));
        }
        if self.groupby_field != other.groupby_field || self.count_field != other.count_field {
            return Err(mismatch(self.name(), "field configuration"));
        }
        self.state.merge(&other.state);
        self.rows += other.rows;
        Ok(())
    }
}
