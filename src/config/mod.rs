//! Typed, serializable run configuration and the builders that turn it into
//! live estimators.

pub mod build;
pub mod choices;

pub use build::{BuildError, build_aggregation, build_estimator};
pub use choices::{AggregationParameters, EstimatorChoice, EstimatorKind};
