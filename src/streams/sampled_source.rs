use crate::OlaError;
use crate::core::{Record, Slice, SliceHeader};
use crate::streams::SliceSource;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Uniform random sample, without replacement, of `fraction` of a dataset,
/// delivered in shuffled order as slices of `slice_size` rows.
///
/// Reports the unsampled row count, so scaled estimators can project the
/// sample back to the full dataset. The same seed replays the same sample.
#[derive(Debug)]
pub struct SampledSliceSource {
    seed: u64,
    fraction: f64,
    slice_size: usize,
    dataset: Slice,
    pending: Vec<Record>,
    cursor: usize,
}

impl SampledSliceSource {
    pub fn new(dataset: Slice, fraction: f64, slice_size: usize, seed: u64) -> Result<Self, OlaError> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(OlaError::InvalidConfiguration(format!(
                "sampling fraction must be in (0.0, 1.0], got {fraction}"
            )));
        }
        if slice_size == 0 {
            return Err(OlaError::InvalidConfiguration(
                "slice_size must be > 0".into(),
            ));
        }
        let mut source = Self {
            seed,
            fraction,
            slice_size,
            dataset,
            pending: Vec::new(),
            cursor: 0,
        };
        source.draw();
        Ok(source)
    }

    fn draw(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut rows = self.dataset.records().to_vec();
        rows.shuffle(&mut rng);
        rows.truncate(self.sample_size());
        self.pending = rows;
        self.cursor = 0;
    }

    /// Number of rows the sample holds.
    pub fn sample_size(&self) -> usize {
        (self.dataset.len() as f64 * self.fraction).round() as usize
    }

    fn header_arc(&self) -> Arc<SliceHeader> {
        self.dataset.header_arc()
    }
}

impl SliceSource for SampledSliceSource {
    fn header(&self) -> &SliceHeader {
        self.dataset.header()
    }

    fn has_more_slices(&self) -> bool {
        self.cursor < self.pending.len()
    }

    fn next_slice(&mut self) -> Option<Slice> {
        if !self.has_more_slices() {
            return None;
        }
        let end = (self.cursor + self.slice_size).min(self.pending.len());
        let records = self.pending[self.cursor..end].to_vec();
        self.cursor = end;
        Some(Slice::from_validated(self.header_arc(), records))
    }

    fn restart(&mut self) -> Result<(), OlaError> {
        self.draw();
        Ok(())
    }

    fn original_row_count(&self) -> Option<u64> {
        Some(self.dataset.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::estimators::{Estimator, GroupedCountEstimator};
    use crate::testing::dummies::{header_sales, synthetic_sales};

    fn dataset(n: usize) -> Slice {
        Slice::from_rows(header_sales(), synthetic_sales(n, 99)).unwrap()
    }

    fn drain(src: &mut SampledSliceSource) -> Vec<Vec<Value>> {
        let mut out = Vec::new();
        while let Some(s) = src.next_slice() {
            out.extend(s.records().iter().map(|r| r.to_vec()));
        }
        out
    }

    #[test]
    fn sample_size_and_slicing() {
        let mut src = SampledSliceSource::new(dataset(1_000), 0.25, 100, 1).unwrap();
        assert_eq!(src.sample_size(), 250);
        assert_eq!(src.original_row_count(), Some(1_000));
        let mut sizes = Vec::new();
        while let Some(s) = src.next_slice() {
            sizes.push(s.len());
        }
        assert_eq!(sizes, vec![100, 100, 50]);
        assert!(!src.has_more_slices());
    }

    #[test]
    fn same_seed_same_sample() {
        let mut a = SampledSliceSource::new(dataset(300), 0.5, 40, 7).unwrap();
        let mut b = SampledSliceSource::new(dataset(300), 0.5, 40, 7).unwrap();
        let first = drain(&mut a);
        assert_eq!(first, drain(&mut b));
        a.restart().unwrap();
        assert_eq!(first, drain(&mut a));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(SampledSliceSource::new(dataset(10), 0.0, 5, 1).is_err());
        assert!(SampledSliceSource::new(dataset(10), 1.5, 5, 1).is_err());
        assert!(SampledSliceSource::new(dataset(10), f64::NAN, 5, 1).is_err());
        assert!(SampledSliceSource::new(dataset(10), 0.5, 0, 1).is_err());
    }

    #[test]
    fn scaled_count_of_full_sample_is_exact() {
        let mut src = SampledSliceSource::new(dataset(500), 1.0, 64, 3).unwrap();
        let n = src.original_row_count().unwrap();
        let mut est = GroupedCountEstimator::new(n, "g", None).unwrap();
        let mut last = None;
        while let Some(s) = src.next_slice() {
            last = Some(est.consume(&s).unwrap());
        }
        let total: f64 = last.unwrap().values.iter().sum();
        assert!((total - 500.0).abs() < 1e-9);
        assert_eq!(est.scale(), 1.0);
    }

    #[test]
    fn scaled_count_of_half_sample_projects_total_rows() {
        let mut src = SampledSliceSource::new(dataset(2_000), 0.5, 100, 5).unwrap();
        let mut est = GroupedCountEstimator::new(2_000, "g", None).unwrap();
        while let Some(s) = src.next_slice() {
            est.consume(&s).unwrap();
        }
        let total: f64 = est.estimate().values.iter().sum();
        assert!((total - 2_000.0).abs() < 1e-6);
        assert_eq!(est.scale(), 2.0);
    }
}
