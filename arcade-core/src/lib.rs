#![warn(missing_docs)]
//! Core traits and metric records shared by the crates of the workspace.
//!
//! * [`Env`] is the capability set of an emulator: build, reset, step,
//!   sample an action, render and report the size of its action space.
//! * [`record`] provides the [`Record`](record::Record) a driver fills at
//!   the end of an episode and the [`Recorder`](record::Recorder) trait of
//!   metric sinks.
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Env, Info, Obs, Step};
