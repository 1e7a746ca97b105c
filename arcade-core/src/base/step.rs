//! Environment step.
use super::Env;

/// Additional information attached to a [`Step`].
pub trait Info {}

impl Info for () {}

/// Outcome of [`Env::step`].
pub struct Step<E: Env> {
    /// Action taken.
    pub act: E::Act,

    /// Observation after the action.
    pub obs: E::Obs,

    /// Reward given for the action.
    pub reward: f32,

    /// `true` if the episode has ended.
    pub is_done: bool,

    /// Information defined by the environment.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`].
    pub fn new(obs: E::Obs, act: E::Act, reward: f32, is_done: bool, info: E::Info) -> Self {
        Step {
            act,
            obs,
            reward,
            is_done,
            info,
        }
    }

    #[inline]
    /// Returns `true` if the episode has ended.
    pub fn is_done(&self) -> bool {
        self.is_done
    }
}
