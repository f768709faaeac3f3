use crate::core::GroupKey;
use serde::Serialize;

/// Latest answer of an estimator: index-aligned groups and values, sorted
/// ascending by group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub groups: Vec<GroupKey>,
    pub values: Vec<f64>,
}

impl Estimate {
    /// `([""], [value])`, the shape of every non-grouped estimate.
    pub fn singleton(value: f64) -> Self {
        Self {
            groups: vec![GroupKey::blank()],
            values: vec![value],
        }
    }

    /// Builds a grouped estimate, sorting by key.
    pub fn from_groups<I: IntoIterator<Item = (GroupKey, f64)>>(pairs: I) -> Self {
        let mut pairs: Vec<(GroupKey, f64)> = pairs.into_iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        let (groups, values) = pairs.into_iter().unzip();
        Self { groups, values }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Value recorded for `group`. Relies on `groups` being sorted, as every
    /// constructor leaves it; a hand-edited estimate may miss a present group.
    pub fn value_of(&self, group: &GroupKey) -> Option<f64> {
        let i = self.groups.binary_search(group).ok()?;
        self.values.get(i).copied()
    }

    /// The value of a singleton estimate.
    pub fn scalar(&self) -> Option<f64> {
        match (self.groups.as_slice(), self.values.as_slice()) {
            ([g], [v]) if *g == GroupKey::blank() => Some(*v),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, f64)> {
        self.groups.iter().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_shape() {
        let e = Estimate::singleton(4.5);
        assert_eq!(e.groups, vec![GroupKey::blank()]);
        assert_eq!(e.values, vec![4.5]);
        assert_eq!(e.scalar(), Some(4.5));
    }

    #[test]
    fn grouped_estimates_are_sorted() {
        let e = Estimate::from_groups([
            (GroupKey::from("b"), 2.0),
            (GroupKey::from("a"), 1.0),
            (GroupKey::from("c"), 3.0),
        ]);
        assert_eq!(
            e.groups,
            vec![GroupKey::from("a"), GroupKey::from("b"), GroupKey::from("c")]
        );
        assert_eq!(e.values, vec![1.0, 2.0, 3.0]);
        assert_eq!(e.value_of(&GroupKey::from("b")), Some(2.0));
        assert_eq!(e.value_of(&GroupKey::from("z")), None);
        assert_eq!(e.scalar(), None);
    }

    #[test]
    fn lookup_on_misaligned_estimate_does_not_panic() {
        let mut e = Estimate::from_groups([(GroupKey::from("a"), 1.0), (GroupKey::from("b"), 2.0)]);
        e.values.truncate(1);
        assert_eq!(e.value_of(&GroupKey::from("a")), Some(1.0));
        assert_eq!(e.value_of(&GroupKey::from("b")), None);
    }

    #[test]
    fn empty_estimate() {
        let e = Estimate::from_groups(Vec::new());
        assert!(e.is_empty());
        assert_eq!(e.len(), 0);
    }
}
