use super::{Record, Recorder};

/// Buffered recorder.
///
/// Keeps every written record in memory with its step, in order. Useful to
/// inspect the metrics of a short run or in tests.
#[derive(Debug, Default)]
pub struct BufferedRecorder {
    buf: Vec<(usize, Record)>,
}

impl BufferedRecorder {
    /// Constructs the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the steps and records.
    pub fn iter(&self) -> std::slice::Iter<(usize, Record)> {
        self.buf.iter()
    }

    /// Returns the number of buffered records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the most recent step and record.
    pub fn last(&self) -> Option<&(usize, Record)> {
        self.buf.last()
    }
}

impl Recorder for BufferedRecorder {
    fn write(&mut self, step: usize, record: Record) {
        self.buf.push((step, record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NullRecorder;

    #[test]
    fn test_buffered_recorder_keeps_order() {
        let mut recorder = BufferedRecorder::new();
        recorder.write(1, Record::from_scalar("episode/score", 1.0));
        recorder.write(16_777_217, Record::from_scalar("episode/score", 2.0));

        let steps = recorder.iter().map(|(s, _)| *s).collect::<Vec<_>>();
        assert_eq!(steps, vec![1, 16_777_217]);
        let (_, record) = recorder.last().unwrap();
        assert_eq!(record.get_scalar("episode/score").unwrap(), 2.0);
    }

    #[test]
    fn test_boxed_recorder() {
        let mut recorder: Box<dyn Recorder> = Box::new(NullRecorder::new());
        recorder.write(0, Record::empty());
    }
}
