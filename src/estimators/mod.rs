mod accumulators;
mod estimate;
mod estimator;
mod filter;
mod filtered_distinct;
mod filtered_mean;
mod grouped_count;
mod grouped_mean;
mod grouped_sum;
mod running_mean;

pub use accumulators::{
    Accumulator, CountAccumulator, GroupedAccumulator, MeanAccumulator, SumAccumulator,
    ValueSource,
};
pub use estimate::Estimate;
pub use estimator::{Estimator, Mergeable, scaling_factor};
pub use filter::EqualityFilter;
pub use filtered_distinct::FilteredDistinctEstimator;
pub use filtered_mean::FilteredMeanEstimator;
pub use grouped_count::GroupedCountEstimator;
pub use grouped_mean::GroupedMeanEstimator;
pub use grouped_sum::GroupedSumEstimator;
pub use running_mean::RunningMeanEstimator;
