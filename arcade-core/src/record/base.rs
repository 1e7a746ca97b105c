//! Key-value records handed to a [`Recorder`](super::Recorder).
use crate::error::ArcadeError;
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// A value stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single number, e.g. the score of an episode.
    Scalar(f32),
}

/// A set of named values produced at one point of a run.
///
/// ```rust
/// use arcade_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("episode/score", 21.0);
/// record.insert("episode/steps", RecordValue::Scalar(1000.0));
///
/// assert_eq!(record.get_scalar("episode/score").unwrap(), 21.0);
/// assert!(record.get_scalar("episode/time").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record holding a single scalar.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a value, replacing the previous one under the same key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Returns the value under `k`, if any.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Returns the scalar under `k`.
    ///
    /// Fails if the key is missing.
    pub fn get_scalar(&self, k: &str) -> Result<f32, ArcadeError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            None => Err(ArcadeError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
