use crate::estimators::Estimate;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

/// Estimate recorded after a given number of slices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub slices_seen: u64,
    pub rows_seen: u64,
    pub seconds: f64,
    pub estimate: Estimate,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "slices={}, rows={}, t={:.3}s, [",
            self.slices_seen, self.rows_seen, self.seconds
        )?;
        for (i, (group, value)) in self.estimate.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}={value:.6}", group.to_string())?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GroupKey;

    #[test]
    fn display_lists_groups() {
        let s = Snapshot {
            slices_seen: 2,
            rows_seen: 6,
            seconds: 0.5,
            estimate: Estimate::from_groups([(GroupKey::from("a"), 20.0), (GroupKey::from("b"), 15.0)]),
        };
        assert_eq!(
            s.to_string(),
            "slices=2, rows=6, t=0.500s, [\"a\"=20.000000, \"b\"=15.000000]"
        );
    }
}
