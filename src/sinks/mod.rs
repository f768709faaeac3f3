mod estimate_history;
mod series_sink;
mod snapshot;
mod update_sink;

pub use estimate_history::{EstimateHistory, HistoryFormat};
pub use series_sink::SeriesSink;
pub use snapshot::Snapshot;
pub use update_sink::UpdateSink;
