//! Running estimators on several threads.
//!
//! Two shapes are supported. Independent estimators can share one slice
//! stream, each owned by its own thread. A single aggregate can also be split
//! by partition: every partition is folded into a fresh estimator and the
//! partial states are merged, which is sound because every accumulator merges
//! associatively and commutatively.

use crate::OlaError;
use crate::core::Slice;
use crate::estimators::{Estimator, Mergeable};
use std::panic::resume_unwind;
use std::thread;
use tracing::debug;

/// Feeds every slice, in order, to each estimator on its own scoped thread.
///
/// Estimators are returned in their input order. The first error, in input
/// order, is returned if any estimator fails.
pub fn drive_independently(
    slices: &[Slice],
    estimators: Vec<Box<dyn Estimator>>,
) -> Result<Vec<Box<dyn Estimator>>, OlaError> {
    let results: Vec<Result<Box<dyn Estimator>, OlaError>> = thread::scope(|scope| {
        let handles: Vec<_> = estimators
            .into_iter()
            .map(|mut estimator| {
                scope.spawn(move || {
                    for slice in slices {
                        estimator.consume(slice)?;
                    }
                    debug!(
                        estimator = estimator.name(),
                        rows = estimator.rows_processed(),
                        "independent driver finished"
                    );
                    Ok(estimator)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|p| resume_unwind(p)))
            .collect()
    });
    results.into_iter().collect()
}

/// Folds each partition into a fresh estimator from `make`, one thread per
/// partition, then merges the partial states in partition order.
pub fn merge_partitions<E, F>(partitions: &[Vec<Slice>], make: F) -> Result<E, OlaError>
where
    E: Estimator + Mergeable,
    F: Fn() -> Result<E, OlaError> + Sync,
{
    let make = &make;
    let partials: Vec<Result<E, OlaError>> = thread::scope(|scope| {
        let handles: Vec<_> = partitions
            .iter()
            .map(|partition| {
                scope.spawn(move || {
                    let mut estimator = make()?;
                    for slice in partition {
                        estimator.consume(slice)?;
                    }
                    Ok(estimator)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|p| resume_unwind(p)))
            .collect()
    });

    let mut merged = make()?;
    for partial in partials {
        merged.merge(&partial?)?;
    }
    debug!(
        estimator = merged.name(),
        partitions = partitions.len(),
        rows = merged.rows_processed(),
        "merged partitions"
    );
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::estimators::{
        Estimate, FilteredDistinctEstimator, FilteredMeanEstimator, GroupedCountEstimator,
        GroupedMeanEstimator, GroupedSumEstimator, RunningMeanEstimator,
    };
    use crate::testing::dummies::{header_sales, synthetic_sales};

    fn slices(n: usize, size: usize) -> Vec<Slice> {
        Slice::from_rows(header_sales(), synthetic_sales(n, 17))
            .unwrap()
            .chunks(size)
    }

    fn partitions(slices: &[Slice], k: usize) -> Vec<Vec<Slice>> {
        let mut out = vec![Vec::new(); k];
        for (i, s) in slices.iter().enumerate() {
            out[i % k].push(s.clone());
        }
        out
    }

    fn sequential<E: Estimator>(mut estimator: E, slices: &[Slice]) -> Estimate {
        let mut last = estimator.estimate();
        for s in slices {
            last = estimator.consume(s).unwrap();
        }
        last
    }

    fn assert_close(a: &Estimate, b: &Estimate) {
        assert_eq!(a.groups, b.groups);
        for (x, y) in a.values.iter().zip(&b.values) {
            assert!((x - y).abs() < 1e-6, "{x} vs {y}");
        }
    }

    #[test]
    fn independent_estimators_match_sequential_runs() {
        let data = slices(900, 50);
        let estimators: Vec<Box<dyn Estimator>> = vec![
            Box::new(RunningMeanEstimator::new("v").unwrap()),
            Box::new(GroupedMeanEstimator::new("g", "v").unwrap()),
            Box::new(GroupedSumEstimator::new(900, "g", "v").unwrap()),
        ];
        let done = drive_independently(&data, estimators).unwrap();
        assert_eq!(done.len(), 3);
        assert!(done.iter().all(|e| e.rows_processed() == 900));

        assert_close(
            &done[0].estimate(),
            &sequential(RunningMeanEstimator::new("v").unwrap(), &data),
        );
        assert_close(
            &done[1].estimate(),
            &sequential(GroupedMeanEstimator::new("g", "v").unwrap(), &data),
        );
        assert_close(
            &done[2].estimate(),
            &sequential(GroupedSumEstimator::new(900, "g", "v").unwrap(), &data),
        );
    }

    #[test]
    fn independent_driver_reports_failures() {
        let data = slices(20, 5);
        let estimators: Vec<Box<dyn Estimator>> = vec![
            Box::new(RunningMeanEstimator::new("v").unwrap()),
            Box::new(RunningMeanEstimator::new("missing").unwrap()),
        ];
        let err = drive_independently(&data, estimators).err().unwrap();
        assert!(matches!(err, OlaError::MissingField(ref f) if f == "missing"));
    }

    #[test]
    fn merged_partitions_equal_sequential_for_every_variant() {
        let data = slices(1_200, 40);
        let parts = partitions(&data, 4);

        let merged = merge_partitions(&parts, || RunningMeanEstimator::new("v")).unwrap();
        assert_close(&merged.estimate(), &sequential(RunningMeanEstimator::new("v").unwrap(), &data));

        let make = || FilteredMeanEstimator::new("status", Value::from("active"), "v");
        let merged = merge_partitions(&parts, make).unwrap();
        assert_close(&merged.estimate(), &sequential(make().unwrap(), &data));

        let make = || GroupedMeanEstimator::new("g", "v");
        let merged = merge_partitions(&parts, make).unwrap();
        assert_close(&merged.estimate(), &sequential(make().unwrap(), &data));

        let make = || GroupedSumEstimator::new(1_200, "g", "v");
        let merged = merge_partitions(&parts, make).unwrap();
        assert_eq!(merged.rows_processed(), 1_200);
        assert_close(&merged.estimate(), &sequential(make().unwrap(), &data));

        let make = || GroupedCountEstimator::new(1_200, "g", Some("v".into()));
        let merged = merge_partitions(&parts, make).unwrap();
        assert_close(&merged.estimate(), &sequential(make().unwrap(), &data));

        let make = || FilteredDistinctEstimator::new("status", Value::from("active"), "user", 10, 5);
        let merged = merge_partitions(&parts, make).unwrap();
        let mut reference = make().unwrap();
        for s in &data {
            reference.consume(s).unwrap();
        }
        assert_eq!(merged.sketch().registers(), reference.sketch().registers());
    }

    #[test]
    fn no_partitions_yields_fresh_estimator() {
        let merged = merge_partitions(&[], || GroupedMeanEstimator::new("g", "v")).unwrap();
        assert!(merged.estimate().is_empty());
        assert_eq!(merged.rows_processed(), 0);
    }

    #[test]
    fn construction_errors_propagate() {
        let parts = partitions(&slices(10, 5), 2);
        let err = merge_partitions(&parts, || GroupedSumEstimator::new(0, "g", "v")).err().unwrap();
        assert!(matches!(err, OlaError::InvalidConfiguration(_)));
    }
}
