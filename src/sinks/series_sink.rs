use crate::core::GroupKey;
use crate::sinks::UpdateSink;

/// Keeps only the most recently rendered series.
#[derive(Debug, Default, Clone)]
pub struct SeriesSink {
    groups: Vec<GroupKey>,
    values: Vec<f64>,
    renders: u64,
}

impl SeriesSink {
    pub fn groups(&self) -> &[GroupKey] {
        &self.groups
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }
}

impl UpdateSink for SeriesSink {
    fn render(&mut self, groups: &[GroupKey], values: &[f64]) {
        self.groups = groups.to_vec();
        self.values = values.to_vec();
        self.renders += 1;
    }
}
