//! Core functionalities.
mod env;
mod step;
pub use env::Env;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment, e.g. a screen frame.
pub trait Obs: Clone + Debug {}

/// An action of an environment.
pub trait Act: Clone + Debug {
    /// Returns the action that does nothing.
    ///
    /// No-op actions are used to randomize the initial state of an episode.
    fn noop() -> Self;
}
