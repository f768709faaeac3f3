mod aggregation;
mod error;
mod estimators;

pub use aggregation::build_aggregation;
pub use error::BuildError;
pub use estimators::build_estimator;
