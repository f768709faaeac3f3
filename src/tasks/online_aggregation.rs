use crate::OlaError;
use crate::estimators::Estimator;
use crate::sinks::{EstimateHistory, Snapshot, UpdateSink};
use crate::streams::SliceSource;
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Drives one estimator over a slice source, rendering after every slice.
///
/// Slices are consumed strictly in delivery order. The first slice that
/// fails aborts the run: skipping it would desynchronise the processed-row
/// count that scaled estimators rely on.
pub struct OnlineAggregation {
    estimator: Box<dyn Estimator>,
    source: Box<dyn SliceSource>,
    sink: Box<dyn UpdateSink>,

    history: EstimateHistory,

    max_slices: Option<u64>,
    sample_frequency: u64,

    slices: u64,
    start_time: Instant,

    progress_tx: Option<Sender<Snapshot>>,
}

impl OnlineAggregation {
    pub fn new(
        estimator: Box<dyn Estimator>,
        source: Box<dyn SliceSource>,
        sink: Box<dyn UpdateSink>,
        max_slices: Option<u64>,
        sample_frequency: u64,
    ) -> Result<Self, OlaError> {
        if sample_frequency == 0 {
            return Err(OlaError::InvalidConfiguration(
                "sample_frequency must be > 0".into(),
            ));
        }

        Ok(Self {
            estimator,
            source,
            sink,
            history: EstimateHistory::default(),
            max_slices,
            sample_frequency,
            slices: 0,
            start_time: Instant::now(),
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<Snapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn run(&mut self) -> Result<(), OlaError> {
        self.start_time = Instant::now();
        info!(
            estimator = self.estimator.name(),
            relation = self.source.header().relation_name(),
            "starting online aggregation"
        );

        let mut last_sampled = None;
        while self.source.has_more_slices() {
            if let Some(n) = self.max_slices {
                if self.slices >= n {
                    break;
                }
            }
            let Some(slice) = self.source.next_slice() else {
                break;
            };
            if slice.is_empty() {
                warn!(slice = self.slices + 1, "received an empty slice");
            }

            let estimate = match self.estimator.consume(&slice) {
                Ok(estimate) => estimate,
                Err(e) => {
                    error!(
                        estimator = self.estimator.name(),
                        slice = self.slices + 1,
                        error = %e,
                        "aborting run"
                    );
                    return Err(e);
                }
            };
            self.slices += 1;
            debug!(
                slice = self.slices,
                rows = slice.len(),
                rows_processed = self.estimator.rows_processed(),
                groups = estimate.len(),
                "slice consumed"
            );

            self.sink.render(&estimate.groups, &estimate.values);

            if self.slices % self.sample_frequency == 0 {
                self.push_snapshot();
                last_sampled = Some(self.slices);
            }
        }

        if last_sampled != Some(self.slices) {
            self.push_snapshot();
        }
        info!(
            estimator = self.estimator.name(),
            slices = self.slices,
            rows = self.estimator.rows_processed(),
            seconds = self.start_time.elapsed().as_secs_f64(),
            "online aggregation finished"
        );
        Ok(())
    }

    pub fn history(&self) -> &EstimateHistory {
        &self.history
    }

    pub fn slices_processed(&self) -> u64 {
        self.slices
    }

    pub fn estimator(&self) -> &dyn Estimator {
        self.estimator.as_ref()
    }

    fn push_snapshot(&mut self) {
        let snapshot = Snapshot {
            slices_seen: self.slices,
            rows_seen: self.estimator.rows_processed(),
            seconds: self.start_time.elapsed().as_secs_f64(),
            estimate: self.estimator.estimate(),
        };

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(snapshot.clone());
        }

        self.history.push(snapshot);
    }
}
