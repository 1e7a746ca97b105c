//! Bindings to the Arcade Learning Environment.
//!
//! The code under this module is adapted from the
//! [`atari-env`](https://crates.io/crates/atari-env) crate.
pub mod ale;

pub use ale::{Ale, AleAction, AleConfig};
