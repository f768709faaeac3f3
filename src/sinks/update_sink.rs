use crate::core::GroupKey;

/// Receiver of the latest estimate after every slice.
///
/// Each call replaces the displayed series; nothing is appended.
pub trait UpdateSink: Send {
    fn render(&mut self, groups: &[GroupKey], values: &[f64]);
}
