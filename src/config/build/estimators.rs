use crate::config::build::BuildError;
use crate::config::choices::*;
use crate::estimators::{
    Estimator, FilteredDistinctEstimator, FilteredMeanEstimator, GroupedCountEstimator,
    GroupedMeanEstimator, GroupedSumEstimator, RunningMeanEstimator,
};
use crate::sketches::{MAX_PRECISION, MIN_PRECISION};
use std::convert::TryFrom;

pub fn build_estimator(choice: EstimatorChoice) -> Result<Box<dyn Estimator>, BuildError> {
    match choice {
        EstimatorChoice::RunningMean(p) => Ok(Box::new(RunningMeanEstimator::try_from(p)?)),
        EstimatorChoice::FilteredMean(p) => Ok(Box::new(FilteredMeanEstimator::try_from(p)?)),
        EstimatorChoice::GroupedMean(p) => Ok(Box::new(GroupedMeanEstimator::try_from(p)?)),
        EstimatorChoice::GroupedSum(p) => Ok(Box::new(GroupedSumEstimator::try_from(p)?)),
        EstimatorChoice::GroupedCount(p) => Ok(Box::new(GroupedCountEstimator::try_from(p)?)),
        EstimatorChoice::FilteredDistinct(p) => {
            Ok(Box::new(FilteredDistinctEstimator::try_from(p)?))
        }
    }
}

fn require_rows(original_row_count: u64) -> Result<u64, BuildError> {
    if original_row_count == 0 {
        return Err(BuildError::InvalidParameter(
            "original_row_count must be >= 1".into(),
        ));
    }
    Ok(original_row_count)
}

impl TryFrom<RunningMeanParameters> for RunningMeanEstimator {
    type Error = BuildError;

    fn try_from(parameters: RunningMeanParameters) -> Result<Self, Self::Error> {
        RunningMeanEstimator::new(parameters.target_field).map_err(BuildError::from)
    }
}

impl TryFrom<FilteredMeanParameters> for FilteredMeanEstimator {
    type Error = BuildError;

    fn try_from(parameters: FilteredMeanParameters) -> Result<Self, Self::Error> {
        FilteredMeanEstimator::new(
            parameters.filter_field,
            parameters.filter_value,
            parameters.target_field,
        )
        .map_err(BuildError::from)
    }
}

impl TryFrom<GroupedMeanParameters> for GroupedMeanEstimator {
    type Error = BuildError;

    fn try_from(parameters: GroupedMeanParameters) -> Result<Self, Self::Error> {
        GroupedMeanEstimator::new(parameters.groupby_field, parameters.target_field)
            .map_err(BuildError::from)
    }
}

impl TryFrom<GroupedSumParameters> for GroupedSumEstimator {
    type Error = BuildError;

    fn try_from(parameters: GroupedSumParameters) -> Result<Self, Self::Error> {
        GroupedSumEstimator::new(
            require_rows(parameters.original_row_count)?,
            parameters.groupby_field,
            parameters.sum_field,
        )
        .map_err(BuildError::from)
    }
}

impl TryFrom<GroupedCountParameters> for GroupedCountEstimator {
    type Error = BuildError;

    fn try_from(parameters: GroupedCountParameters) -> Result<Self, Self::Error> {
        GroupedCountEstimator::new(
            require_rows(parameters.original_row_count)?,
            parameters.groupby_field,
            parameters.count_field,
        )
        .map_err(BuildError::from)
    }
}

impl TryFrom<FilteredDistinctParameters> for FilteredDistinctEstimator {
    type Error = BuildError;

    fn try_from(parameters: FilteredDistinctParameters) -> Result<Self, Self::Error> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&parameters.precision) {
            return Err(BuildError::InvalidParameter(format!(
                "precision must be in {MIN_PRECISION}..={MAX_PRECISION}"
            )));
        }
        FilteredDistinctEstimator::new(
            parameters.filter_field,
            parameters.filter_value,
            parameters.distinct_field,
            parameters.precision,
            parameters.seed,
        )
        .map_err(BuildError::from)
    }
}
