use super::{Record, Recorder};

/// A recorder that discards any record.
#[derive(Debug, Default)]
pub struct NullRecorder {}

impl NullRecorder {
    /// Constructs the recorder.
    pub fn new() -> Self {
        Self {}
    }
}

impl Recorder for NullRecorder {
    fn write(&mut self, _step: usize, _record: Record) {}
}
