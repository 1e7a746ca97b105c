use anyhow::Result;
use arcade_atari_env::{
    num_actions,
    util::test::{ScriptedEnv, ScriptedObs},
    AtariAct, AtariDriver, AtariEnvConfig, FrameSkip,
};
use arcade_core::{error::ArcadeError, record::BufferedRecorder, Act, Env};

fn pong_config() -> AtariEnvConfig {
    AtariEnvConfig::default()
        .game("Pong")
        .frameskip(FrameSkip::Fixed(4))
        .input_frames(4)
        .max_noops(30)
        .render(false)
}

#[test]
fn test_num_actions_from_env() -> Result<()> {
    let config = pong_config();
    let before = config.clone();

    assert_eq!(num_actions::<ScriptedEnv>(&config)?, 6);
    let driver = AtariDriver::<ScriptedEnv>::build(&config, 0)?;
    assert_eq!(driver.num_actions(), 6);
    assert_eq!(driver.env().game_id, "pong");
    assert_eq!(config, before);
    Ok(())
}

#[test]
fn test_pong_noop_warm_start() -> Result<()> {
    let config = pong_config();

    for seed in 0..50 {
        let mut driver = AtariDriver::<ScriptedEnv>::build(&config, seed)?;
        assert_eq!(driver.max_noops(), 7);

        let reset = driver.reset()?;
        let n_noops = reset.frames.len() - 1;
        assert!((4..=7).contains(&n_noops), "{} no-ops", n_noops);
        assert_eq!(reset.score, 0.0);
        assert!(!reset.is_done);
        assert_eq!(reset.attempts, 1);
        assert_eq!(reset.discarded_steps, 0);

        assert_eq!(driver.steps(), n_noops);
        assert_eq!(driver.episode(), 1);
        assert!(driver.env().acts.iter().all(|a| *a == AtariAct::noop()));
    }
    Ok(())
}

#[test]
fn test_noop_count_uses_upper_frameskip() -> Result<()> {
    let config = pong_config().frameskip(FrameSkip::Range(2, 5));
    let mut driver = AtariDriver::<ScriptedEnv>::build(&config, 7)?;
    assert_eq!(driver.max_noops(), 6);

    for _ in 0..20 {
        let n_noops = driver.reset()?.frames.len() - 1;
        assert!((4..=6).contains(&n_noops));
    }
    Ok(())
}

#[test]
fn test_step_appends_one_frame() -> Result<()> {
    let env = ScriptedEnv::new(4).reward(0.5);
    let mut driver = AtariDriver::with_env(&pong_config(), env, 1)?;
    driver.reset()?;

    let (frames, steps, score) = (driver.frames().len(), driver.steps(), driver.score());
    let act = driver.sample_act();
    let step = driver.step(&act)?;
    assert_eq!(step.frames.len(), frames + 1);
    assert_eq!(step.reward, 0.5);
    assert!(!step.is_done);

    assert_eq!(driver.steps(), steps + 1);
    assert_eq!(driver.score(), score + 0.5);
    assert_eq!(driver.env().acts.last(), Some(&act));
    assert!(act.act < 4);
    Ok(())
}

#[test]
fn test_step_reports_done() -> Result<()> {
    // No-ops of the first episode are exactly 4, the episode ends at step 6.
    let config = pong_config().max_noops(16);
    let env = ScriptedEnv::new(6).terminate_at(vec![6]);
    let mut driver = AtariDriver::with_env(&config, env, 0)?;
    assert_eq!(driver.reset()?.frames.len(), 5);

    assert!(!driver.step(&AtariAct::new(1))?.is_done);
    assert!(driver.step(&AtariAct::new(1))?.is_done);
    Ok(())
}

#[test]
fn test_reset_retries_after_early_termination() -> Result<()> {
    let env = ScriptedEnv::new(6).reward(1.0).terminate_at(vec![1]);
    let mut driver = AtariDriver::with_env(&pong_config(), env, 3)?;

    let reset = driver.reset()?;
    assert_eq!(reset.attempts, 2);
    assert!(!reset.is_done);
    let n_noops = reset.frames.len() - 1;
    assert!((4..=7).contains(&n_noops));
    // The failed attempt leaves nothing behind.
    assert_eq!(reset.score, n_noops as f32);
    assert_eq!(reset.frames[0], ScriptedObs(1));
    assert_eq!(reset.discarded_steps, 1);

    assert_eq!(driver.steps(), n_noops);
    assert_eq!(driver.episode(), 1);
    assert_eq!(driver.env().n_resets, 2);
    Ok(())
}

#[test]
fn test_reset_retries_on_last_noop() -> Result<()> {
    // max_noops / frameskip = 4 = input_frames, so every warm-up has 4 no-ops.
    let config = pong_config().max_noops(16);
    let env = ScriptedEnv::new(6).terminate_at(vec![4, 4]);
    let mut driver = AtariDriver::with_env(&config, env, 0)?;

    let reset = driver.reset()?;
    assert_eq!(reset.attempts, 3);
    assert_eq!(reset.frames.len(), 5);
    assert_eq!(reset.discarded_steps, 8);
    assert_eq!(driver.env().n_steps, 12);
    Ok(())
}

#[test]
fn test_reset_gives_up() {
    let config = pong_config().max_reset_attempts(3);
    let env = ScriptedEnv::new(6).always_terminate_at(1);
    let mut driver = AtariDriver::with_env(&config, env, 0).unwrap();

    let err = driver.reset().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ArcadeError>(),
        Some(ArcadeError::WarmupExhausted(3))
    ));
    assert_eq!(driver.env().n_resets, 3);
}

#[test]
fn test_invalid_noop_range() {
    let config = pong_config().input_frames(8);
    let err = AtariDriver::<ScriptedEnv>::build(&config, 0)
        .err()
        .expect("build must fail");
    assert!(matches!(
        err.downcast_ref::<ArcadeError>(),
        Some(ArcadeError::InvalidNoopRange {
            input_frames: 8,
            max_noops: 7
        })
    ));
}

#[test]
fn test_render_flag() -> Result<()> {
    let mut driver = AtariDriver::<ScriptedEnv>::build(&pong_config().render(true), 0)?;
    let n_frames = driver.reset()?.frames.len();
    assert_eq!(driver.env().n_renders, n_frames);
    driver.step(&AtariAct::new(2))?;
    assert_eq!(driver.env().n_renders, n_frames + 1);

    let mut driver = AtariDriver::<ScriptedEnv>::build(&pong_config(), 0)?;
    driver.reset()?;
    driver.step(&AtariAct::new(2))?;
    assert_eq!(driver.env().n_renders, 0);
    Ok(())
}

#[test]
fn test_log_episode() -> Result<()> {
    let env = ScriptedEnv::new(6).reward(1.0);
    let mut driver = AtariDriver::with_env(&pong_config(), env, 5)?;
    let mut recorder = BufferedRecorder::new();

    driver.reset()?;
    for _ in 0..10 {
        driver.step(&AtariAct::new(3))?;
    }
    let summary = driver.log_episode(&mut recorder, 1234);
    assert_eq!(summary.episode, 1);
    assert_eq!(summary.steps, driver.steps());
    assert_eq!(summary.score, driver.steps() as f32);

    assert_eq!(recorder.len(), 1);
    let (step, record) = recorder.last().unwrap();
    assert_eq!(*step, 1234);
    assert_eq!(record.len(), 5);
    assert_eq!(record.keys().filter(|k| k.starts_with("episode/")).count(), 5);
    assert_eq!(record.get_scalar("episode/steps")?, driver.steps() as f32);
    assert_eq!(record.get_scalar("episode/score")?, driver.score());

    // A new episode starts from zero.
    driver.reset()?;
    assert_eq!(driver.episode(), 2);
    assert_eq!(driver.score(), (driver.frames().len() - 1) as f32);
    driver.log_episode(&mut recorder, 2000);
    assert_eq!(recorder.len(), 2);
    Ok(())
}

#[test]
fn test_log_episode_at_large_global_step() -> Result<()> {
    // Beyond the integers an f32 represents exactly.
    let global_step = 16_777_217;
    let mut driver = AtariDriver::<ScriptedEnv>::build(&pong_config(), 0)?;
    let mut recorder = BufferedRecorder::new();

    driver.reset()?;
    driver.log_episode(&mut recorder, global_step);
    driver.reset()?;
    driver.log_episode(&mut recorder, global_step + 1);

    let steps = recorder.iter().map(|(s, _)| *s).collect::<Vec<_>>();
    assert_eq!(steps, vec![16_777_217, 16_777_218]);
    Ok(())
}

#[test]
fn test_scripted_env_samples_all_actions() {
    let mut env = ScriptedEnv::new(256);
    let acts = (0..10_000).map(|_| env.sample_act().act).collect::<Vec<_>>();
    assert!(acts.iter().any(|&a| a == 255));
    assert!(acts.iter().any(|&a| a == 0));
}

#[test]
#[should_panic]
fn test_scripted_env_without_actions() {
    ScriptedEnv::new(0);
}
