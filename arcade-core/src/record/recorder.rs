use super::Record;

/// Writes a [`Record`] to an output destination.
///
/// This is the metrics sink an episode driver reports to. Nothing is read
/// back from the sink.
pub trait Recorder {
    /// Writes a record at a global step.
    fn write(&mut self, step: usize, record: Record);
}

impl<R: Recorder + ?Sized> Recorder for Box<R> {
    fn write(&mut self, step: usize, record: Record) {
        (**self).write(step, record)
    }
}
