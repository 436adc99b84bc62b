//! Cell Machine - headless falling-sand and Life runner

use std::path::PathBuf;

use anyhow::{Context, Result};
use cellmachine::config::{AppConfig, PolicyKind};
use cellmachine::controls::{self, Command, LifeSession, Session};
use cellmachine::headless::{self, RunOptions, RunSummary};
use cellmachine::prelude::*;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RON config file (defaults to ./cellmachine.ron when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Run the falling-sand automaton
    Run {
        #[command(flatten)]
        common: CommonArgs,

        /// Starting arrangement
        #[arg(long, value_enum)]
        policy: Option<PolicyKind>,
    },
    /// Run Conway's Game of Life on a wrapping grid
    Life {
        #[command(flatten)]
        common: CommonArgs,

        /// Share of cells alive at start (0.0 - 1.0)
        #[arg(long)]
        density: Option<f32>,
    },
    /// Print the effective configuration as RON
    Config,
}

#[derive(Args, Debug)]
struct CommonArgs {
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Number of steps to run
    #[arg(long)]
    steps: Option<u64>,
    /// Output pixels per cell
    #[arg(long)]
    scale: Option<u32>,
    /// Capture a GIF frame every N steps
    #[arg(long)]
    frame_every: Option<u64>,
    /// Write the final frame as PNG
    #[arg(long)]
    png: Option<PathBuf>,
    /// Write an animated GIF of the run
    #[arg(long)]
    gif: Option<PathBuf>,
    /// Key sequence replayed before running (e.g. "3++ r"); \e is Esc
    #[arg(long)]
    keys: Option<String>,
    /// Paint (or toggle, in Life) at x,y after the keys are replayed
    #[arg(long = "paint", value_name = "X,Y")]
    paints: Vec<String>,
}

impl CommonArgs {
    fn run_options(&self, config: &AppConfig) -> RunOptions {
        RunOptions {
            steps: self.steps.unwrap_or(config.run.steps),
            frame_every: self.frame_every.unwrap_or(config.run.frame_every),
            scale: self.scale.unwrap_or(config.run.scale),
            gif_fps: config.run.gif_fps,
            png: self.png.clone(),
            gif: self.gif.clone(),
        }
    }

    fn commands(&self) -> Result<Vec<Command>> {
        let mut commands = match &self.keys {
            Some(keys) => controls::parse_keys(keys).context("Invalid --keys")?,
            None => Vec::new(),
        };
        for paint in &self.paints {
            commands.push(controls::parse_paint(paint).context("Invalid --paint")?);
        }
        Ok(commands)
    }

    fn seed_rng(&self, config_seed: Option<u64>) -> Xoshiro256StarStar {
        let seed = self.seed.or(config_seed).unwrap_or_else(rand::random);
        log::info!("Using seed {}", seed);
        Xoshiro256StarStar::seed_from_u64(seed)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load_from(cli.config.as_deref())?;

    let summary = match cli.command {
        Mode::Run { common, policy } => run_automaton(&config, &common, policy)?,
        Mode::Life { common, density } => run_life(&config, &common, density)?,
        Mode::Config => {
            println!("{}", config.to_ron()?);
            return Ok(());
        }
    };

    for (material, count) in &summary.materials {
        println!("{:>6}: {}", material.name(), count);
    }
    println!(
        "generation {} ({} steps run), population {}",
        summary.generation, summary.steps_run, summary.population
    );
    Ok(())
}

fn run_automaton(
    config: &AppConfig,
    args: &CommonArgs,
    policy: Option<PolicyKind>,
) -> Result<RunSummary> {
    let width = args.width.unwrap_or(config.grid.width);
    let height = args.height.unwrap_or(config.grid.height);
    let rng = args.seed_rng(config.grid.seed);

    log::info!("Starting Cell Machine ({}x{})", width, height);
    let mut automaton = Automaton::with_rng(width, height, rng)?;
    automaton.set_sweep_order(config.sweep);
    automaton.set_reset_policy(config.seeding.reset_policy());
    let policy = policy.unwrap_or(config.seeding.policy);
    automaton.initialize(&config.seeding.policy_for(policy));

    let mut session = Session::new(automaton, config.brush);
    session.apply_all(args.commands()?);

    headless::run_automaton(&mut session, &args.run_options(config))
}

fn run_life(config: &AppConfig, args: &CommonArgs, density: Option<f32>) -> Result<RunSummary> {
    let width = args.width.unwrap_or(config.life.width);
    let height = args.height.unwrap_or(config.life.height);
    let density = density.unwrap_or(config.life.density);
    let rng = args.seed_rng(config.grid.seed);

    log::info!("Starting Life ({}x{})", width, height);
    let mut session = LifeSession::new(LifeGrid::new(width, height)?, rng, density);
    session.randomize();
    session.apply_all(args.commands()?);

    headless::run_life(&mut session, &args.run_options(config))
}
