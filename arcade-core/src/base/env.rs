//! Environment.
use super::{Act, Info, Obs, Step};
use anyhow::Result;

/// Represents an environment, typically an emulator of a game.
///
/// The environment does the real work: producing frames, computing rewards
/// and deciding when an episode ends. Drivers only forward actions and keep
/// books on what comes back.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Samples an action uniformly from the action space.
    fn sample_act(&mut self) -> Self::Act;

    /// Renders the current state of the environment.
    ///
    /// Does nothing in the default implementation.
    fn render(&mut self) -> Result<()> {
        Ok(())
    }

    /// Returns the size of the action space.
    fn num_actions(&self) -> usize;
}
