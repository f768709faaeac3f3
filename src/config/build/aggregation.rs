use crate::config::build::{BuildError, build_estimator};
use crate::config::choices::{AggregationParameters, EstimatorChoice, EstimatorKind};
use crate::sinks::UpdateSink;
use crate::streams::SliceSource;
use crate::tasks::OnlineAggregation;
use tracing::{info, warn};

/// Wires a configured estimator to a source and a sink.
pub fn build_aggregation(
    params: AggregationParameters,
    source: Box<dyn SliceSource>,
    sink: Box<dyn UpdateSink>,
) -> Result<OnlineAggregation, BuildError> {
    params.validate()?;
    info!(
        estimator = %EstimatorKind::from(&params.estimator),
        max_slices = ?params.max_slices,
        sample_frequency = params.sample_frequency,
        "building online aggregation"
    );

    let configured = match &params.estimator {
        EstimatorChoice::GroupedSum(p) => Some(p.original_row_count),
        EstimatorChoice::GroupedCount(p) => Some(p.original_row_count),
        _ => None,
    };
    if let (Some(configured), Some(reported)) = (configured, source.original_row_count()) {
        if configured != reported {
            warn!(
                configured,
                reported, "original_row_count differs from the row count reported by the source"
            );
        }
    }

    let estimator = build_estimator(params.estimator)?;
    OnlineAggregation::new(
        estimator,
        source,
        sink,
        params.max_slices,
        params.sample_frequency,
    )
    .map_err(BuildError::from)
}
