use crate::OlaError;
use crate::core::Slice;
use crate::estimators::estimator::{mismatch, require_field};
use crate::estimators::{Accumulator, Estimate, Estimator, MeanAccumulator, Mergeable};

/// Running mean of one numeric field, missing values excluded.
#[derive(Debug, Clone)]
pub struct RunningMeanEstimator {
    target_field: String,
    state: MeanAccumulator,
    rows: u64,
}

impl RunningMeanEstimator {
    pub fn new(target_field: impl Into<String>) -> Result<Self, OlaError> {
        Ok(Self {
            target_field: require_field(&target_field.into(), "target")?,
            state: MeanAccumulator::default(),
            rows: 0,
        })
    }

    pub fn target_field(&self) -> &str {
        &self.target_field
    }

    pub fn running_sum(&self) -> f64 {
        self.state.sum()
    }

    pub fn running_count(&self) -> u64 {
        self.state.count()
    }
}

impl Estimator for RunningMeanEstimator {
    fn name(&self) -> &'static str {
        "running-mean"
    }

    fn consume(&mut self, slice: &Slice) -> Result<Estimate, OlaError> {
        let index = slice.column_index(&self.target_field)?;
        let mut partial = MeanAccumulator::default();
        for record in slice.records() {
            if let Some(v) = record.numeric_at_index(index)? {
                partial.add(v);
            }
        }
        self.state.merge(&partial);
        self.rows += slice.len() as u64;
        Ok(self.estimate())
    }

    fn estimate(&self) -> Estimate {
        Estimate::singleton(self.state.estimation())
    }

    fn rows_processed(&self) -> u64 {
        self.rows
    }
}

impl Mergeable for RunningMeanEstimator {
    fn merge(&mut self, other: &Self) -> Result<(), OlaError> {
        if self.target_field != other.target_field {
            return Err(mismatch(self.name(), "target field"));
        }
        self.state.merge(&other.state);
        self.rows += other.rows;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::testing::dummies::{header_group_value, header_sales, scenario_rows, synthetic_sales};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    #[test]
    fn empty_first_slice_emits_zero() {
        let mut est = RunningMeanEstimator::new("v").unwrap();
        let out = est.consume(&Slice::empty(header_group_value())).unwrap();
        assert_eq!(out, Estimate::singleton(0.0));
        assert_eq!(est.running_count(), 0);
        assert_eq!(est.rows_processed(), 0);
    }

    #[test]
    fn running_mean_over_two_slices() {
        let slice = Slice::from_rows(header_group_value(), scenario_rows()).unwrap();
        let parts = slice.chunks(3);
        let mut est = RunningMeanEstimator::new("v").unwrap();
        assert_eq!(est.consume(&parts[0]).unwrap().scalar(), Some(35.0 / 3.0));
        assert_eq!(est.consume(&parts[1]).unwrap().scalar(), Some(17.5));
        assert_eq!(est.running_sum(), 105.0);
        assert_eq!(est.running_count(), 6);
        assert_eq!(est.rows_processed(), 6);
    }

    #[test]
    fn missing_values_are_excluded() {
        let slice = Slice::from_rows(
            header_group_value(),
            vec![
                vec![Value::from("a"), Value::from(4.0)],
                vec![Value::from("a"), Value::Missing],
                vec![Value::from("b"), Value::Numeric(f64::NAN)],
                vec![Value::from("b"), Value::from(8.0)],
            ],
        )
        .unwrap();
        let mut est = RunningMeanEstimator::new("v").unwrap();
        assert_eq!(est.consume(&slice).unwrap().scalar(), Some(6.0));
        assert_eq!(est.running_count(), 2);
        assert_eq!(est.rows_processed(), 4);
    }

    #[test]
    fn converges_to_exact_mean_for_any_slicing() {
        let rows = synthetic_sales(1_000, 7);
        let exact: Vec<f64> = rows
            .iter()
            .filter_map(|r| match r[1] {
                Value::Numeric(x) if !x.is_nan() => Some(x),
                _ => None,
            })
            .collect();
        let exact_mean = exact.iter().sum::<f64>() / exact.len() as f64;

        let whole = Slice::from_rows(header_sales(), rows).unwrap();
        for size in [1, 7, 64, 1_000] {
            let mut est = RunningMeanEstimator::new("v").unwrap();
            let mut last = Estimate::singleton(f64::NAN);
            for part in whole.chunks(size) {
                last = est.consume(&part).unwrap();
            }
            let got = last.scalar().unwrap();
            assert!((got - exact_mean).abs() < 1e-9, "size={size}: {got} vs {exact_mean}");
        }
    }

    #[test]
    fn converges_regardless_of_slice_order() {
        let rows = synthetic_sales(1_000, 11);
        let whole = Slice::from_rows(header_sales(), rows).unwrap();
        let mut reference = RunningMeanEstimator::new("v").unwrap();
        let expected = reference.consume(&whole).unwrap().scalar().unwrap();

        for seed in [1, 2, 3] {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut parts = whole.chunks(37);
            parts.shuffle(&mut rng);

            let mut est = RunningMeanEstimator::new("v").unwrap();
            for part in &parts {
                est.consume(part).unwrap();
            }
            let got = est.estimate().scalar().unwrap();
            assert!((got - expected).abs() < 1e-9, "seed={seed}: {got} vs {expected}");
            assert_eq!(est.rows_processed(), 1_000);
        }
    }

    #[test]
    fn missing_field_is_fatal_and_state_is_untouched() {
        let mut est = RunningMeanEstimator::new("price").unwrap();
        let err = est.consume(&Slice::empty(header_group_value())).unwrap_err();
        assert!(matches!(err, OlaError::MissingField(ref f) if f == "price"));
        assert_eq!(est.rows_processed(), 0);
    }

    #[test]
    fn text_target_is_a_type_mismatch() {
        let mut est = RunningMeanEstimator::new("g").unwrap();
        let slice = Slice::from_rows(header_group_value(), scenario_rows()).unwrap();
        assert!(matches!(est.consume(&slice), Err(OlaError::TypeMismatch { .. })));
        assert_eq!(est.running_count(), 0);
    }

    #[test]
    fn merge_of_partitions_matches_sequential() {
        let slice = Slice::from_rows(header_group_value(), scenario_rows()).unwrap();
        let parts = slice.chunks(2);
        let mut a = RunningMeanEstimator::new("v").unwrap();
        a.consume(&parts[0]).unwrap();
        let mut b = RunningMeanEstimator::new("v").unwrap();
        b.consume(&parts[1]).unwrap();
        b.consume(&parts[2]).unwrap();
        a.merge(&b).unwrap();
        assert_eq!(a.estimate().scalar(), Some(17.5));
        assert_eq!(a.rows_processed(), 6);

        let other = RunningMeanEstimator::new("w").unwrap();
        assert!(matches!(a.merge(&other), Err(OlaError::IncompatibleMerge(_))));
    }
}
