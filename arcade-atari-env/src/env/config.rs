//! Configuration of [`AtariEnv`](super::AtariEnv) and of the episode driver.
//!
//! If environment variable `ATARI_ROM_DIR` exists, it is used as the directory
//! from which ROM images of the Atari games are loaded. Otherwise `$HOME/atari_rom`
//! is used.
use anyhow::Result;
use arcade_core::error::ArcadeError;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    env, fmt,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Number of emulator frames each action is held for.
///
/// In YAML, a fixed frame skip is written as an integer (`frameskip: 4`) and
/// a stochastic one as a pair (`frameskip: [2, 5]`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum FrameSkip {
    /// Every action is repeated for exactly this number of frames.
    Fixed(usize),

    /// Every action is repeated for `k` frames, `k` drawn uniformly from `[lo, hi)`.
    Range(usize, usize),
}

impl FrameSkip {
    /// The frame skip used to convert the maximum number of no-op frames
    /// into a number of no-op actions.
    ///
    /// The upper bound is taken for [`FrameSkip::Range`].
    pub fn effective(&self) -> usize {
        match *self {
            FrameSkip::Fixed(n) => n,
            FrameSkip::Range(_, hi) => hi,
        }
    }

    /// Draws the number of frames the next action is held for.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> usize {
        match *self {
            FrameSkip::Fixed(n) => n,
            FrameSkip::Range(lo, hi) => rng.usize(lo..hi),
        }
    }

    fn validate(&self) -> Result<(), ArcadeError> {
        match *self {
            FrameSkip::Fixed(0) => Err(ArcadeError::InvalidConfig(
                "frameskip must be positive".to_string(),
            )),
            FrameSkip::Range(lo, hi) if lo == 0 || lo >= hi => Err(ArcadeError::InvalidConfig(
                format!("frameskip range [{}, {}) is empty or starts at zero", lo, hi),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for FrameSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameSkip::Fixed(n) => write!(f, "{}", n),
            FrameSkip::Range(lo, hi) => write!(f, "({}, {})", lo, hi),
        }
    }
}

/// Converts a CamelCase game identifier into the snake_case name of its ROM.
///
/// The identifier is split into runs of an optional capital followed by one
/// or more lower-case letters. Anything else is dropped.
///
/// ```
/// use arcade_atari_env::game_id;
///
/// assert_eq!(game_id("Pong"), "pong");
/// assert_eq!(game_id("SpaceInvaders"), "space_invaders");
/// ```
pub fn game_id(game: &str) -> String {
    let chars = game.chars().collect::<Vec<_>>();
    let mut words = vec![];
    let mut i = 0;

    while i < chars.len() {
        let start = i;
        if chars[i].is_ascii_uppercase() {
            i += 1;
        }
        let lower_start = i;
        while i < chars.len() && chars[i].is_ascii_lowercase() {
            i += 1;
        }
        if i > lower_start {
            words.push(chars[start..i].iter().collect::<String>().to_ascii_lowercase());
        } else {
            // No word starts here.
            i = start + 1;
        }
    }

    words.join("_")
}

fn default_rom_dir() -> String {
    if let Ok(var) = env::var("ATARI_ROM_DIR") {
        var
    } else {
        dirs::home_dir()
            .map(|p| p.join("atari_rom").to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Configurations of [`AtariEnv`](super::AtariEnv) and
/// [`AtariDriver`](crate::AtariDriver).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AtariEnvConfig {
    pub(crate) rom_dir: String,
    pub(crate) game: String,
    pub(crate) frameskip: FrameSkip,
    pub(crate) repeat_action_probability: f32,
    pub(crate) input_frames: usize,
    pub(crate) max_noops: usize,
    pub(crate) render: bool,
    pub(crate) max_reset_attempts: usize,
}

impl Default for AtariEnvConfig {
    fn default() -> Self {
        Self {
            rom_dir: default_rom_dir(),
            game: "Pong".to_string(),
            frameskip: FrameSkip::Fixed(4),
            repeat_action_probability: 0.0,
            input_frames: 4,
            max_noops: 30,
            render: false,
            max_reset_attempts: 10,
        }
    }
}

impl AtariEnvConfig {
    /// Sets the game, a CamelCase identifier such as `"SpaceInvaders"`.
    pub fn game(mut self, game: impl Into<String>) -> Self {
        self.game = game.into();
        self
    }

    /// Sets the directory of ROM images.
    pub fn rom_dir(mut self, rom_dir: impl Into<String>) -> Self {
        self.rom_dir = rom_dir.into();
        self
    }

    /// Sets the frame skip.
    pub fn frameskip(mut self, frameskip: FrameSkip) -> Self {
        self.frameskip = frameskip;
        self
    }

    /// Sets the probability that the emulator repeats the previous action.
    pub fn repeat_action_probability(mut self, p: f32) -> Self {
        self.repeat_action_probability = p;
        self
    }

    /// Sets the number of frames stacked as the input of a model.
    ///
    /// This is also the minimum number of no-op actions at the start of an episode.
    pub fn input_frames(mut self, v: usize) -> Self {
        self.input_frames = v;
        self
    }

    /// Sets the maximum number of no-op frames at the start of an episode.
    pub fn max_noops(mut self, v: usize) -> Self {
        self.max_noops = v;
        self
    }

    /// Sets the render flag.
    pub fn render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Sets how many times the no-op warm-up is attempted before a reset fails.
    pub fn max_reset_attempts(mut self, v: usize) -> Self {
        self.max_reset_attempts = v;
        self
    }

    /// Returns the CamelCase game identifier.
    pub fn get_game(&self) -> &str {
        &self.game
    }

    /// Returns the frame skip.
    pub fn get_frameskip(&self) -> FrameSkip {
        self.frameskip
    }

    /// Returns the repeat action probability.
    pub fn get_repeat_action_probability(&self) -> f32 {
        self.repeat_action_probability
    }

    /// Returns the render flag.
    pub fn is_render(&self) -> bool {
        self.render
    }

    /// Returns the snake_case name of the game, see [`game_id`].
    pub fn game_id(&self) -> String {
        game_id(&self.game)
    }

    /// Returns the path of the ROM image, `<rom_dir>/<game_id>.bin`.
    pub fn rom_path(&self) -> PathBuf {
        Path::new(&self.rom_dir).join(format!("{}.bin", self.game_id()))
    }

    /// Upper bound of the number of no-op actions at the start of an episode.
    pub fn scaled_max_noops(&self) -> usize {
        self.max_noops / self.frameskip.effective()
    }

    /// Checks the configuration before an environment is built.
    pub fn validate(&self) -> Result<(), ArcadeError> {
        self.frameskip.validate()?;

        if self.game_id().is_empty() {
            return Err(ArcadeError::InvalidConfig(format!(
                "no game name in {:?}",
                self.game
            )));
        }
        if !(0.0..=1.0).contains(&self.repeat_action_probability) {
            return Err(ArcadeError::InvalidConfig(format!(
                "repeat_action_probability {} is not a probability",
                self.repeat_action_probability
            )));
        }
        if self.max_reset_attempts == 0 {
            return Err(ArcadeError::InvalidConfig(
                "max_reset_attempts must be positive".to_string(),
            ));
        }
        if self.input_frames > self.scaled_max_noops() {
            return Err(ArcadeError::InvalidNoopRange {
                input_frames: self.input_frames,
                max_noops: self.scaled_max_noops(),
            });
        }

        Ok(())
    }

    /// Constructs [`AtariEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`AtariEnvConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
