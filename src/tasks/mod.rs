pub mod concurrent;
mod online_aggregation;

pub use online_aggregation::OnlineAggregation;
