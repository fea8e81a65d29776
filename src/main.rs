use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use snake_env::rollout::{RolloutStats, run_episodes};
use snake_env::{Agent, AsciiRenderer, Game, GameConfig, GreedyAgent, RandomAgent, StraightAgent, logger};

#[derive(Parser)]
#[command(name = "snake_env")]
#[command(version, about = "Grid snake environment for RL agents")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playable board size N
    #[arg(long)]
    size: Option<usize>,

    /// Food RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Step cap per episode
    #[arg(long)]
    max_steps: Option<usize>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Also append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one episode, drawing the board after every tick
    Play {
        #[arg(long, value_enum, default_value = "greedy")]
        agent: AgentKind,
    },
    /// Run many episodes in parallel and print JSON summaries
    Rollout {
        #[arg(long, default_value = "16")]
        episodes: usize,

        #[arg(long, value_enum, default_value = "random")]
        agent: AgentKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AgentKind {
    /// Never turn
    Straight,
    /// Uniform random action
    Random,
    /// Head for the food avoiding walls and body
    Greedy,
}

impl AgentKind {
    fn build(self, seed: u64) -> Box<dyn Agent> {
        match self {
            AgentKind::Straight => Box::new(StraightAgent),
            AgentKind::Random => Box::new(RandomAgent::new(seed)),
            AgentKind::Greedy => Box::new(GreedyAgent),
        }
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(size) = cli.size {
        config.size = size;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(max_steps) = cli.max_steps {
        config.max_steps = max_steps;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.log_level, cli.log_file.as_deref()).context("installing logger")?;
    let config = load_config(&cli)?;

    match cli.command {
        Command::Play { agent } => {
            let mut game = Game::from_config(&config)?
                .with_renderer(Box::new(AsciiRenderer::new(io::stdout())));
            let mut agent = agent.build(config.seed.unwrap_or(0));
            let summary = game.play(Some(&mut *agent), config.max_steps);
            game.close();
            println!("{}", serde_json::to_string(&summary)?);
        }
        Command::Rollout { episodes, agent } => {
            let summaries = run_episodes(&config, episodes, |seed| agent.build(seed))?;
            for summary in &summaries {
                println!("{}", serde_json::to_string(summary)?);
            }
            if let Some(stats) = RolloutStats::from_summaries(&summaries) {
                println!("{}", serde_json::to_string(&stats)?);
            }
        }
    }

    Ok(())
}
