mod aggregation;
mod estimator_choice;

pub use aggregation::*;
pub use estimator_choice::*;
