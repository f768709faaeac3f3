use crate::OlaError;
use crate::core::{GroupKey, Slice};
use crate::estimators::Estimate;
use std::collections::HashMap;

/// Online scalar accumulator.
///
/// Implementations accept values incrementally via [`add`](Self::add) and
/// expose the current aggregate via [`estimation`](Self::estimation).
pub trait Accumulator: Default + Clone + Send {
    /// Incorporates one observation. `NaN` is ignored.
    fn add(&mut self, v: f64);

    /// Returns the current aggregate; `0` when nothing was added.
    fn estimation(&self) -> f64;

    /// Number of observations incorporated so far.
    fn count(&self) -> u64;

    fn merge(&mut self, other: &Self);
}

/// Streaming mean: `sum / count`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MeanAccumulator {
    sum: f64,
    count: u64,
}

impl MeanAccumulator {
    pub fn sum(&self) -> f64 {
        self.sum
    }
}

impl Accumulator for MeanAccumulator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            0.0
        }
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn merge(&mut self, other: &Self) {
        self.sum += other.sum;
        self.count += other.count;
    }
}

/// Running total.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SumAccumulator {
    sum: f64,
    count: u64,
}

impl Accumulator for SumAccumulator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        self.sum
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn merge(&mut self, other: &Self) {
        self.sum += other.sum;
        self.count += other.count;
    }
}

/// Number of observations; the observed values themselves are ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CountAccumulator {
    count: u64,
}

impl Accumulator for CountAccumulator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        self.count as f64
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn merge(&mut self, other: &Self) {
        self.count += other.count;
    }
}

/// What a grouped accumulator observes for each row of a group.
#[derive(Debug, Clone, Copy)]
pub enum ValueSource<'a> {
    /// The numeric value of a field; text in that field is an error.
    Numeric(&'a str),
    /// `1` when the field is present in the row, nothing when it is missing.
    Presence(&'a str),
    /// `1` for every row.
    Row,
}

/// Per-group accumulators keyed by [`GroupKey`].
///
/// A group gets an entry the first time a row carries its key, even if the
/// observed value of that row is missing; entries are never removed.
#[derive(Debug, Clone)]
pub struct GroupedAccumulator<A: Accumulator> {
    groups: HashMap<GroupKey, A>,
}

impl<A: Accumulator> Default for GroupedAccumulator<A> {
    fn default() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }
}

impl<A: Accumulator> GroupedAccumulator<A> {
    pub fn observe(&mut self, key: GroupKey, value: Option<f64>) {
        let entry = self.groups.entry(key).or_default();
        if let Some(v) = value {
            entry.add(v);
        }
    }

    /// Aggregates one slice into a fresh accumulator. Rows with a missing
    /// group value are skipped.
    pub fn from_slice(
        slice: &Slice,
        groupby_field: &str,
        source: ValueSource<'_>,
    ) -> Result<Self, OlaError> {
        let group_index = slice.column_index(groupby_field)?;
        let value_index = match source {
            ValueSource::Numeric(field) | ValueSource::Presence(field) => {
                Some(slice.column_index(field)?)
            }
            ValueSource::Row => None,
        };

        let mut partial = Self::default();
        for record in slice.records() {
            let Some(key) = record
                .value_at_index(group_index)
                .and_then(GroupKey::from_value)
            else {
                continue;
            };
            let value = match (source, value_index) {
                (ValueSource::Numeric(_), Some(i)) => record.numeric_at_index(i)?,
                (ValueSource::Presence(_), Some(i)) => {
                    (!record.is_missing_at_index(i)).then_some(1.0)
                }
                _ => Some(1.0),
            };
            partial.observe(key, value);
        }
        Ok(partial)
    }

    pub fn get(&self, key: &GroupKey) -> Option<&A> {
        self.groups.get(key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Observed keys in ascending order.
    pub fn sorted_keys(&self) -> Vec<GroupKey> {
        let mut keys: Vec<GroupKey> = self.groups.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn merge(&mut self, other: &Self) {
        for (key, acc) in &other.groups {
            self.groups.entry(key.clone()).or_default().merge(acc);
        }
    }

    /// Emits `project(acc)` for every group ever observed, sorted by key.
    pub fn estimate_with<F: Fn(&A) -> f64>(&self, project: F) -> Estimate {
        Estimate::from_groups(self.groups.iter().map(|(k, a)| (k.clone(), project(a))))
    }
}
