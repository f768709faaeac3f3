use crate::OlaError;
use crate::core::Slice;
use crate::estimators::estimator::{mismatch, require_field};
use crate::estimators::{
    Accumulator, Estimate, Estimator, GroupedAccumulator, MeanAccumulator, Mergeable, ValueSource,
};

/// Per-group running mean of `target_field`.
///
/// Every group observed so far is re-emitted after each slice, including
/// groups absent from the latest slice.
#[derive(Debug, Clone)]
pub struct GroupedMeanEstimator {
    groupby_field: String,
    target_field: String,
    state: GroupedAccumulator<MeanAccumulator>,
    rows: u64,
}

impl GroupedMeanEstimator {
    pub fn new(groupby_field: impl Into<String>, target_field: impl Into<String>) -> Result<Self, OlaError> {
        Ok(Self {
            groupby_field: require_field(&groupby_field.into(), "groupby")?,
            target_field: require_field(&target_field.into(), "target")?,
            state: GroupedAccumulator::default(),
            rows: 0,
        })
    }

    pub fn groups(&self) -> &GroupedAccumulator<MeanAccumulator> {
        &self.state
    }
}

impl Estimator for GroupedMeanEstimator {
    fn name(&self) -> &'static str {
        "grouped-mean"
    }

    fn consume(&mut self, slice: &Slice) -> Result<Estimate, OlaError> {
        let partial = GroupedAccumulator::from_slice(
            slice,
            &self.groupby_field,
            ValueSource::Numeric(&self.target_field),
        )?;
        self.state.merge(&partial);
        self.rows += slice.len() as u64;
        Ok(self.estimate())
    }

    fn estimate(&self) -> Estimate {
        self.state.estimate_with(|acc| acc.estimation())
    }

    fn rows_processed(&self) -> u64 {
        self.rows
    }
}

impl Mergeable for GroupedMeanEstimator {
    fn merge(&mut self, other: &Self) -> Result<(), OlaError> {
        if self.groupby_field != other.groupby_field || self.target_field != other.target_field {
            return Err(mismatch(self.name(), "field configuration"));
        }
        self.state.merge(&other.state);
        self.rows += other.rows;
        Ok(())
    }
}
