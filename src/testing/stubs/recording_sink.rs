use crate::core::GroupKey;
use crate::sinks::UpdateSink;
use std::sync::{Arc, Mutex};

type Render = (Vec<GroupKey>, Vec<f64>);

/// Sink that remembers every render; inspect it through the handle after the
/// sink has been moved into a driver.
#[derive(Default)]
pub struct RecordingSink {
    renders: Arc<Mutex<Vec<Render>>>,
}

#[derive(Clone)]
pub struct RecordingHandle {
    renders: Arc<Mutex<Vec<Render>>>,
}

impl RecordingSink {
    pub fn new() -> (Self, RecordingHandle) {
        let sink = Self::default();
        let handle = RecordingHandle {
            renders: Arc::clone(&sink.renders),
        };
        (sink, handle)
    }
}

impl RecordingHandle {
    pub fn count(&self) -> usize {
        self.renders.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn renders(&self) -> Vec<Render> {
        self.renders.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl UpdateSink for RecordingSink {
    fn render(&mut self, groups: &[GroupKey], values: &[f64]) {
        if let Ok(mut r) = self.renders.lock() {
            r.push((groups.to_vec(), values.to_vec()));
        }
    }
}
