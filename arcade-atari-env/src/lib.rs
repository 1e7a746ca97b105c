//! Atari games for reinforcement learning, with a no-op warm start and
//! per-episode metrics.
//!
//! [`AtariDriver`] sits between a training loop and an environment. It resets
//! the environment with a random number of no-op actions, forwards the actions
//! of the agent while keeping the frames and the score of the episode, and
//! writes a summary of every episode to a
//! [`Recorder`](arcade_core::record::Recorder).
//!
//! With feature `ale`, [`AtariEnv`] runs games in the Arcade Learning
//! Environment. ROM images are looked up under the directory in environment
//! variable `ATARI_ROM_DIR`. An easy way to get them is the
//! [AutoROM](https://pypi.org/project/AutoROM/) Python package.
//!
//! ```bash
//! pip install autorom
//! mkdir $HOME/atari_rom
//! AutoROM --install-dir $HOME/atari_rom
//! export ATARI_ROM_DIR=$HOME/atari_rom
//! ```
//!
//! The size of the action space, needed to build a model before the driver,
//! is given by [`num_actions`]:
//!
//! ```no_run
//! # #[cfg(feature = "ale")]
//! # fn main() -> anyhow::Result<()> {
//! use arcade_atari_env::{num_actions, AtariDriver, AtariEnv, AtariEnvConfig};
//!
//! let config = AtariEnvConfig::default().game("SpaceInvaders");
//! let n_acts = num_actions::<AtariEnv>(&config)?;
//! println!("{} actions", n_acts);
//!
//! let mut driver = AtariDriver::<AtariEnv>::build(&config, 42)?;
//! driver.reset()?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "ale"))]
//! # fn main() {}
//! ```
mod act;
#[cfg(feature = "ale")]
pub mod atari_env;
mod driver;
mod env;
mod obs;
pub mod util;
pub use act::AtariAct;
pub use driver::{num_actions, AtariDriver, EpisodeSummary, ResetOutcome, StepOutcome};
#[cfg(feature = "ale")]
pub use env::{AtariEnv, AtariInfo};
pub use env::{game_id, AtariEnvConfig, FrameSkip};
pub use obs::AtariObs;
