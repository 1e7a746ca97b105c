//! Writes episode metrics into TensorBoard event files.
use arcade_core::record::{Record, RecordValue, Recorder};
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter;

/// Write records to TFRecord.
pub struct TensorboardRecorder {
    writer: SummaryWriter,
}

impl TensorboardRecorder {
    /// Construct a [`TensorboardRecorder`].
    ///
    /// TFRecord will be stored in `logdir`.
    pub fn new<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            writer: SummaryWriter::new(logdir),
        }
    }

    /// Flushes the event file.
    pub fn flush(&mut self) {
        self.writer.flush();
    }
}

impl Recorder for TensorboardRecorder {
    /// Write every scalar of a given [Record] at `step`.
    fn write(&mut self, step: usize, record: Record) {
        for (k, v) in record.iter() {
            match v {
                RecordValue::Scalar(v) => self.writer.add_scalar(k, *v, step),
            }
        }
    }
}
