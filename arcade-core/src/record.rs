//! Records of episode metrics and the sinks they are written to.
//!
//! A [`Record`] is a flat map from names to [`RecordValue`]s. A [`Recorder`]
//! receives records together with the global step they belong to, e.g.
//! one per finished episode:
//!
//! ```rust
//! use arcade_core::record::{BufferedRecorder, Record, RecordValue, Recorder};
//!
//! let mut recorder = BufferedRecorder::new();
//! let mut record = Record::empty();
//! record.insert("episode/score", RecordValue::Scalar(-20.0));
//! recorder.write(500, record);
//!
//! assert_eq!(recorder.len(), 1);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
