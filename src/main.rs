//! shapego: a GTP Go engine.
//!
//! ## Usage
//!
//! - `shapego` - Start the GTP server with default settings
//! - `shapego gtp [--random] [--size N] [--seed S]` - Start the GTP server
//! - `shapego demo [--size N] [--seed S]` - Play a self-play game and print it
//!
//! Logs go to stderr. `RUST_LOG` overrides the level chosen by `--verbose`.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shapego::board::Color;
use shapego::constants::{DEFAULT_BOARD_SIZE, GAME_LENGTH_FACTOR};
use shapego::coord::format_point;
use shapego::game::Game;
use shapego::genmove::{GeneratedMove, GeneratorMode, MoveGenerator};
use shapego::gtp::{EngineConfig, GtpEngine};

/// shapego: a GTP Go engine with a shape-building greedy move generator
#[derive(Parser)]
#[command(name = "shapego")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server on stdin/stdout
    Gtp(GtpArgs),
    /// Let the engine play both sides of a game and print the result
    Demo(DemoArgs),
}

#[derive(Args, Default)]
struct GtpArgs {
    /// Pick a random scored move instead of the best one
    #[arg(long)]
    random: bool,

    /// Initial board size
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Seed for reproducible move choices
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct DemoArgs {
    /// Board size
    #[arg(long, default_value_t = 9)]
    size: usize,

    /// Seed for reproducible move choices
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Gtp(args)) => run_gtp(args),
        Some(Commands::Demo(args)) => run_demo(args),
        None => run_gtp(GtpArgs {
            size: DEFAULT_BOARD_SIZE,
            ..GtpArgs::default()
        }),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_gtp(args: GtpArgs) -> anyhow::Result<()> {
    let config = EngineConfig {
        board_size: args.size,
        mode: if args.random {
            GeneratorMode::Random
        } else {
            GeneratorMode::Heuristic
        },
        seed: args.seed,
    };
    let mut engine = GtpEngine::with_config(config).context("invalid --size")?;
    engine.run(std::io::stdin().lock(), std::io::stdout())
}

fn run_demo(args: DemoArgs) -> anyhow::Result<()> {
    let mut game = Game::new(args.size).context("invalid --size")?;
    let mut generator = match args.seed {
        Some(seed) => MoveGenerator::with_seed(GeneratorMode::Heuristic, seed),
        None => MoveGenerator::new(GeneratorMode::Heuristic),
    };

    println!("shapego self-play on {0}x{0}\n", args.size);
    let max_moves = args.size * args.size * GAME_LENGTH_FACTOR;
    while !game.is_over() && game.move_count() < max_moves {
        let player = match game.current_player() {
            Color::Black => "B",
            Color::White => "W",
        };
        match generator.generate(&mut game) {
            GeneratedMove::Play(point) => {
                println!("{player} {}", format_point(point, game.size()))
            }
            GeneratedMove::Pass => println!("{player} pass"),
        }
    }

    let score = game.score();
    println!("\n{}", game.board());
    println!("Black {} - White {}", score.black, score.white);
    Ok(())
}
