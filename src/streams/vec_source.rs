use crate::OlaError;
use crate::core::{Slice, SliceHeader};
use crate::streams::SliceSource;
use std::sync::Arc;

/// In-memory dataset cut into consecutive slices of `slice_size` rows.
#[derive(Debug)]
pub struct VecSliceSource {
    slices: Vec<Slice>,
    header: Arc<SliceHeader>,
    rows: u64,
    idx: usize,
}

impl VecSliceSource {
    pub fn new(dataset: Slice, slice_size: usize) -> Result<Self, OlaError> {
        if slice_size == 0 {
            return Err(OlaError::InvalidConfiguration(
                "slice_size must be > 0".into(),
            ));
        }
        Ok(Self {
            header: dataset.header_arc(),
            rows: dataset.len() as u64,
            slices: dataset.chunks(slice_size),
            idx: 0,
        })
    }

    /// Source over already partitioned slices, delivered as given.
    pub fn from_slices(header: Arc<SliceHeader>, slices: Vec<Slice>) -> Result<Self, OlaError> {
        if let Some(bad) = slices.iter().position(|s| !s.header().is_compatible(&header)) {
            return Err(OlaError::SchemaMismatch(format!(
                "slice {bad} does not match relation '{}'",
                header.relation_name()
            )));
        }
        let rows = slices.iter().map(|s| s.len() as u64).sum();
        Ok(Self {
            slices,
            header,
            rows,
            idx: 0,
        })
    }

    pub fn number_of_slices(&self) -> usize {
        self.slices.len()
    }
}

impl SliceSource for VecSliceSource {
    fn header(&self) -> &SliceHeader {
        &self.header
    }

    fn has_more_slices(&self) -> bool {
        self.idx < self.slices.len()
    }

    fn next_slice(&mut self) -> Option<Slice> {
        let slice = self.slices.get(self.idx)?.clone();
        self.idx += 1;
        Some(slice)
    }

    fn restart(&mut self) -> Result<(), OlaError> {
        self.idx = 0;
        Ok(())
    }

    fn original_row_count(&self) -> Option<u64> {
        Some(self.rows)
    }
}
