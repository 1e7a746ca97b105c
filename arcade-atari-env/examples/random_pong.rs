use anyhow::Result;
use arcade_atari_env::{num_actions, AtariDriver, AtariEnv, AtariEnvConfig};
use arcade_tensorboard::TensorboardRecorder;
use clap::Parser;

/// Plays an Atari game with a random policy and logs episode metrics.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CamelCase name of the game
    #[arg(long, default_value = "Pong")]
    game: String,

    /// YAML configuration, overrides `--game`
    #[arg(long)]
    config: Option<String>,

    /// Number of episodes
    #[arg(long, default_value_t = 5)]
    episodes: usize,

    /// Directory of TensorBoard event files
    #[arg(long, default_value = "./logs/random_pong")]
    logdir: String,

    /// Show the screen
    #[arg(long, default_value_t = false)]
    render: bool,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: i64,
}

fn env_config(args: &Args) -> Result<AtariEnvConfig> {
    let config = match &args.config {
        Some(path) => AtariEnvConfig::load(path)?,
        None => AtariEnvConfig::default().game(args.game.clone()),
    };
    Ok(config.render(args.render))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = env_config(&args)?;

    log::info!("{} actions", num_actions::<AtariEnv>(&config)?);
    let mut driver = AtariDriver::<AtariEnv>::build(&config, args.seed)?;
    let mut recorder = TensorboardRecorder::new(&args.logdir);
    let mut global_step = 0;

    for _ in 0..args.episodes {
        let reset = driver.reset()?;
        global_step += reset.discarded_steps + reset.frames.len() - 1;
        loop {
            let act = driver.sample_act();
            global_step += 1;
            if driver.step(&act)?.is_done {
                break;
            }
        }
        driver.log_episode(&mut recorder, global_step);
    }
    recorder.flush();

    Ok(())
}
