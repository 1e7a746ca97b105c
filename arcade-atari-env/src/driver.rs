//! Episode driver between a training loop and an environment.
use crate::AtariEnvConfig;
use anyhow::Result;
use arcade_core::{
    error::ArcadeError,
    record::{Record, RecordValue, Recorder},
    Act, Env,
};
use log::{debug, info, warn};
use std::{
    fmt,
    time::{Duration, Instant},
};

/// Returns the size of the action space of the environment built from `config`.
///
/// Call this before constructing the model that picks actions; the
/// configuration itself is left untouched.
pub fn num_actions<E: Env>(config: &E::Config) -> Result<usize> {
    Ok(E::build(config, 0)?.num_actions())
}

/// Frames of the current episode after [`AtariDriver::reset`].
#[derive(Debug)]
pub struct ResetOutcome<'a, O> {
    /// Initial frame followed by the frames of the no-op actions.
    pub frames: &'a [O],

    /// Score accumulated during the no-op warm-up.
    pub score: f32,

    /// Whether the episode has already ended. Always `false` for a reset
    /// that succeeded.
    pub is_done: bool,

    /// Number of warm-up attempts, 1 if the first one succeeded.
    pub attempts: usize,

    /// Steps played in the discarded attempts. These are not counted in
    /// the episode.
    pub discarded_steps: usize,
}

/// Frames of the current episode after [`AtariDriver::step`].
#[derive(Debug)]
pub struct StepOutcome<'a, O> {
    /// All frames of the episode, the newest last.
    pub frames: &'a [O],

    /// Reward of the step.
    pub reward: f32,

    /// Whether the episode has ended.
    pub is_done: bool,
}

/// Summary statistics of an episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    /// Episode index, starting from 1.
    pub episode: usize,

    /// Number of steps, no-op warm-up included.
    pub steps: usize,

    /// Accumulated reward.
    pub score: f32,

    /// Wall-clock time since the start of the episode.
    pub duration: Duration,
}

impl EpisodeSummary {
    /// Constructs a summary.
    pub fn new(episode: usize, steps: usize, score: f32, duration: Duration) -> Self {
        Self {
            episode,
            steps,
            score,
            duration,
        }
    }

    /// Duration in seconds.
    pub fn secs(&self) -> f32 {
        self.duration.as_secs_f32()
    }

    /// Steps per second, 0 for a zero duration.
    pub fn steps_per_sec(&self) -> f32 {
        self.per_sec(self.steps as f32)
    }

    /// Score per second, 0 for a zero duration.
    pub fn reward_per_sec(&self) -> f32 {
        self.per_sec(self.score)
    }

    fn per_sec(&self, v: f32) -> f32 {
        let secs = self.secs();
        if secs > 0.0 {
            v / secs
        } else {
            0.0
        }
    }

    /// Converts the summary into a record of five `episode/*` scalars.
    pub fn to_record(&self) -> Record {
        Record::from_slice(&[
            ("episode/score", RecordValue::Scalar(self.score)),
            ("episode/steps", RecordValue::Scalar(self.steps as f32)),
            ("episode/time", RecordValue::Scalar(self.secs())),
            (
                "episode/reward_per_sec",
                RecordValue::Scalar(self.reward_per_sec()),
            ),
            (
                "episode/steps_per_sec",
                RecordValue::Scalar(self.steps_per_sec()),
            ),
        ])
    }
}

impl fmt::Display for EpisodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Episode {}, score {:.0} ({} steps, {:.2} secs, {:.2} steps/sec)",
            self.episode,
            self.score,
            self.steps,
            self.secs(),
            self.steps_per_sec()
        )
    }
}

/// Runs episodes of an environment and keeps their books.
///
/// An episode starts with [`reset`](AtariDriver::reset), which plays a random
/// number of no-op actions so that episodes do not all start from the same
/// state. [`step`](AtariDriver::step) forwards actions of the agent, and
/// [`log_episode`](AtariDriver::log_episode) reports the episode to a
/// [`Recorder`].
///
/// ```
/// use arcade_atari_env::{util::test::ScriptedEnv, AtariDriver, AtariEnvConfig};
/// use arcade_core::record::BufferedRecorder;
///
/// # fn main() -> anyhow::Result<()> {
/// let config = AtariEnvConfig::default().game("Pong");
/// let mut driver = AtariDriver::<ScriptedEnv>::build(&config, 42)?;
/// let mut recorder = BufferedRecorder::new();
///
/// driver.reset()?;
/// loop {
///     let act = driver.sample_act();
///     let is_done = driver.step(&act)?.is_done;
///     if is_done || driver.steps() >= 100 {
///         break;
///     }
/// }
/// driver.log_episode(&mut recorder, driver.steps());
/// # Ok(())
/// # }
/// ```
pub struct AtariDriver<E: Env> {
    env: E,
    rng: fastrand::Rng,
    input_frames: usize,
    max_noops: usize,
    max_reset_attempts: usize,
    render: bool,

    // Episode state
    episode: usize,
    steps: usize,
    score: f32,
    start_time: Instant,
    frames: Vec<E::Obs>,
}

impl<E> AtariDriver<E>
where
    E: Env<Config = AtariEnvConfig>,
{
    /// Builds the environment and the driver.
    ///
    /// `seed` is used both for the environment and for the number of no-op
    /// actions.
    pub fn build(config: &AtariEnvConfig, seed: i64) -> Result<Self> {
        config.validate()?;
        let env = E::build(config, seed)?;
        Self::with_env(config, env, seed)
    }
}

impl<E: Env> AtariDriver<E> {
    /// Constructs a driver of an environment already built.
    pub fn with_env(config: &AtariEnvConfig, env: E, seed: i64) -> Result<Self> {
        config.validate()?;
        info!(
            "Starting {} {{frameskip: {}, repeat_action_probability: {}}}",
            config.get_game(),
            config.get_frameskip(),
            config.get_repeat_action_probability()
        );

        Ok(Self {
            env,
            rng: fastrand::Rng::with_seed(seed as u64),
            input_frames: config.input_frames,
            max_noops: config.scaled_max_noops(),
            max_reset_attempts: config.max_reset_attempts,
            render: config.render,
            episode: 0,
            steps: 0,
            score: 0.0,
            start_time: Instant::now(),
            frames: vec![],
        })
    }

    /// Samples an action uniformly from the action space of the environment.
    pub fn sample_act(&mut self) -> E::Act {
        self.env.sample_act()
    }

    /// Starts a new episode.
    ///
    /// After resetting the environment, plays `n` no-op actions with `n`
    /// drawn uniformly from `[input_frames, max_noops / frameskip]`. When the
    /// environment ends the episode during these no-ops, the attempt is
    /// discarded, its frames and score included, and the warm-up starts over
    /// from a fresh reset. Fails with [`ArcadeError::WarmupExhausted`] if no
    /// attempt succeeds within `max_reset_attempts`.
    pub fn reset(&mut self) -> Result<ResetOutcome<'_, E::Obs>> {
        self.episode += 1;
        let mut discarded_steps = 0;

        for attempt in 1..=self.max_reset_attempts {
            if self.warmup()? {
                warn!(
                    "Episode {} ended during no-op warm-up after {} steps (attempt {}/{})",
                    self.episode, self.steps, attempt, self.max_reset_attempts
                );
                discarded_steps += self.steps;
                continue;
            }

            return Ok(ResetOutcome {
                frames: &self.frames,
                score: self.score,
                is_done: false,
                attempts: attempt,
                discarded_steps,
            });
        }

        Err(ArcadeError::WarmupExhausted(self.max_reset_attempts).into())
    }

    // Returns `true` if the episode ended during the no-ops.
    fn warmup(&mut self) -> Result<bool> {
        self.start_time = Instant::now();
        self.steps = 0;
        self.score = 0.0;
        self.frames.clear();

        let frame = self.env.reset()?;
        self.render_if_enabled()?;
        self.frames.push(frame);

        let n_noops = self.rng.usize(self.input_frames..=self.max_noops);
        debug!("{} no-op actions", n_noops);

        for _ in 0..n_noops {
            let step = self.env.step(&E::Act::noop())?;
            self.render_if_enabled()?;
            let is_done = step.is_done();
            self.push(step.obs, step.reward);

            if is_done {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Forwards an action to the environment.
    pub fn step(&mut self, act: &E::Act) -> Result<StepOutcome<'_, E::Obs>> {
        let step = self.env.step(act)?;
        self.render_if_enabled()?;
        let (reward, is_done) = (step.reward, step.is_done());
        self.push(step.obs, reward);

        Ok(StepOutcome {
            frames: &self.frames,
            reward,
            is_done,
        })
    }

    fn push(&mut self, obs: E::Obs, reward: f32) {
        self.steps += 1;
        self.frames.push(obs);
        self.score += reward;
    }

    fn render_if_enabled(&mut self) -> Result<()> {
        if self.render {
            self.env.render()?;
        }
        Ok(())
    }

    /// Returns the summary of the current episode.
    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary::new(
            self.episode,
            self.steps,
            self.score,
            self.start_time.elapsed(),
        )
    }

    /// Logs the summary of the current episode and writes it to `recorder`
    /// at `global_step`.
    pub fn log_episode<R: Recorder + ?Sized>(
        &self,
        recorder: &mut R,
        global_step: usize,
    ) -> EpisodeSummary {
        let summary = self.summary();
        info!("{}", summary);
        recorder.write(global_step, summary.to_record());
        summary
    }

    /// Index of the current episode, 0 before the first reset.
    pub fn episode(&self) -> usize {
        self.episode
    }

    /// Steps in the current episode.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Score of the current episode.
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Frames of the current episode.
    pub fn frames(&self) -> &[E::Obs] {
        &self.frames
    }

    /// Lower bound of the number of no-op actions.
    pub fn input_frames(&self) -> usize {
        self.input_frames
    }

    /// Upper bound of the number of no-op actions.
    pub fn max_noops(&self) -> usize {
        self.max_noops
    }

    /// Size of the action space.
    pub fn num_actions(&self) -> usize {
        self.env.num_actions()
    }

    /// Returns the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Returns the environment, mutably.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let summary = EpisodeSummary::new(3, 500, 20.0, Duration::from_secs(4));
        assert_eq!(summary.steps_per_sec(), 125.0);
        assert_eq!(summary.reward_per_sec(), 5.0);
        assert_eq!(
            summary.to_string(),
            "Episode 3, score 20 (500 steps, 4.00 secs, 125.00 steps/sec)"
        );
    }

    #[test]
    fn test_rates_zero_duration() {
        let summary = EpisodeSummary::new(1, 10, 1.0, Duration::from_secs(0));
        assert_eq!(summary.steps_per_sec(), 0.0);
        assert_eq!(summary.reward_per_sec(), 0.0);
    }

    #[test]
    fn test_to_record() {
        let summary = EpisodeSummary::new(1, 300, -21.0, Duration::from_millis(1500));
        let record = summary.to_record();

        let episode_keys = record
            .keys()
            .filter(|k| k.starts_with("episode/"))
            .count();
        assert_eq!(episode_keys, 5);
        assert_eq!(record.len(), 5);
        assert_eq!(record.get_scalar("episode/score").unwrap(), -21.0);
        assert_eq!(record.get_scalar("episode/steps").unwrap(), 300.0);
        assert_eq!(record.get_scalar("episode/time").unwrap(), 1.5);
        assert_eq!(record.get_scalar("episode/steps_per_sec").unwrap(), 200.0);
        assert_eq!(record.get_scalar("episode/reward_per_sec").unwrap(), -14.0);
    }
}
