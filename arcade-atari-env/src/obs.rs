//! Observation of [`AtariEnv`](crate::AtariEnv).
use arcade_core::Obs;

/// A screen frame in RGB, `height * width * 3` bytes in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct AtariObs {
    /// Width of the screen.
    pub width: usize,

    /// Height of the screen.
    pub height: usize,

    /// Pixels.
    pub frame: Vec<u8>,
}

impl AtariObs {
    /// Constructs an observation from an RGB buffer.
    pub fn new(width: usize, height: usize, frame: Vec<u8>) -> Self {
        debug_assert_eq!(frame.len(), width * height * 3);
        Self {
            width,
            height,
            frame,
        }
    }
}

impl Obs for AtariObs {}
