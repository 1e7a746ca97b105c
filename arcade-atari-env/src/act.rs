//! Action for [`AtariEnv`](crate::AtariEnv).
use arcade_core::Act;

/// Index into the minimal action set of a game.
///
/// Index 0 is always NOOP in the minimal action set of the Arcade Learning
/// Environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtariAct {
    /// Index of the action.
    pub act: u8,
}

impl AtariAct {
    /// Constructs an action.
    pub fn new(act: u8) -> Self {
        Self { act }
    }
}

impl Act for AtariAct {
    fn noop() -> Self {
        Self { act: 0 }
    }
}

impl From<u8> for AtariAct {
    fn from(act: u8) -> Self {
        Self { act }
    }
}
