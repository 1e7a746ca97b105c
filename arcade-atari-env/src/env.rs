//! Atari environment backed by the Arcade Learning Environment.
mod config;
#[cfg(feature = "window")]
mod window;
pub use config::{game_id, AtariEnvConfig, FrameSkip};

#[cfg(feature = "ale")]
pub use ale_env::{AtariEnv, AtariInfo};

#[cfg(feature = "ale")]
mod ale_env {
    use super::{AtariEnvConfig, FrameSkip};
    use crate::{
        atari_env::{Ale, AleAction, AleConfig},
        AtariAct, AtariObs,
    };
    use anyhow::Result;
    use arcade_core::{error::ArcadeError, Env, Info, Step};
    use log::{info, warn};

    #[cfg(feature = "window")]
    use super::window::AtariWindow;
    #[cfg(feature = "window")]
    use winit::{event_loop::ControlFlow, platform::run_return::EventLoopExtRunReturn};

    /// Lives left in the game after a step.
    #[derive(Debug, Clone, Copy)]
    pub struct AtariInfo {
        /// Number of lives.
        pub lives: usize,
    }

    impl Info for AtariInfo {}

    /// An Atari game in the Arcade Learning Environment.
    ///
    /// Observations are raw RGB screens. Frame skipping is done here rather
    /// than in the emulator, so that a [`FrameSkip::Range`] draws a new
    /// number of frames for every action.
    pub struct AtariEnv {
        ale: Ale,

        // Minimal action set, indexed by `AtariAct::act`
        actions: Vec<AleAction>,

        frameskip: FrameSkip,

        rng: fastrand::Rng,

        // Window for displaying the current game state
        #[cfg(feature = "window")]
        window: Option<AtariWindow>,
    }

    impl AtariEnv {
        fn screen(&self) -> AtariObs {
            let mut frame = vec![0u8; self.ale.rgb24_size()];
            self.ale.rgb24(&mut frame);
            AtariObs::new(self.ale.width() as _, self.ale.height() as _, frame)
        }

        /// Returns the number of lives left.
        pub fn lives(&self) -> usize {
            self.ale.lives() as usize
        }
    }

    impl Env for AtariEnv {
        type Config = AtariEnvConfig;
        type Obs = AtariObs;
        type Act = AtariAct;
        type Info = AtariInfo;

        fn build(config: &Self::Config, seed: i64) -> Result<Self> {
            let rom_path = config.rom_path();
            if !rom_path.exists() {
                return Err(ArcadeError::RomNotFound(rom_path.to_string_lossy().into_owned()).into());
            }

            let ale = Ale::new(
                &rom_path,
                AleConfig {
                    random_seed: seed as i32,
                    frame_skip: 1,
                    repeat_action_probability: config.repeat_action_probability,
                    ..AleConfig::default()
                },
            )?;
            let actions = ale.minimal_actions();
            info!("Loaded {:?}, {} actions", rom_path, actions.len());

            if config.render && cfg!(not(feature = "window")) {
                warn!("Rendering requested, but the crate is built without feature `window`");
            }

            Ok(Self {
                ale,
                actions,
                frameskip: config.frameskip,
                rng: fastrand::Rng::with_seed(seed as u64),
                #[cfg(feature = "window")]
                window: None,
            })
        }

        fn reset(&mut self) -> Result<AtariObs> {
            self.ale.reset();
            Ok(self.screen())
        }

        fn step(&mut self, act: &AtariAct) -> Result<Step<Self>> {
            let action = *self.actions.get(act.act as usize).ok_or_else(|| {
                ArcadeError::InvalidConfig(format!(
                    "action {} out of range, {} actions",
                    act.act,
                    self.actions.len()
                ))
            })?;

            let mut reward = 0;
            for _ in 0..self.frameskip.sample(&mut self.rng) {
                reward += self.ale.take_action(action);
                if self.ale.is_game_over() {
                    break;
                }
            }

            let info = AtariInfo { lives: self.lives() };
            Ok(Step::new(
                self.screen(),
                *act,
                reward as f32,
                self.ale.is_game_over(),
                info,
            ))
        }

        fn sample_act(&mut self) -> AtariAct {
            AtariAct::new(self.rng.usize(..self.actions.len()) as u8)
        }

        #[cfg(feature = "window")]
        fn render(&mut self) -> Result<()> {
            if self.window.is_none() {
                self.window = Some(AtariWindow::new(
                    self.ale.width(),
                    self.ale.height(),
                )?);
            }

            if let Some(window) = self.window.as_mut() {
                window.event_loop.run_return(|_event, _, control_flow| {
                    *control_flow = ControlFlow::Exit;
                });
                self.ale.rgb32(window.get_frame());
                window.render_and_request_redraw()?;
            }
            Ok(())
        }

        fn num_actions(&self) -> usize {
            self.actions.len()
        }
    }
}
