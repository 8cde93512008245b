use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use solitaire::{Board, NUM_FINAL_PILES};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod input;

/// Simulates Bulgarian solitaire: starting from some division of the cards
/// into piles, every round takes one card from each pile and stacks the
/// taken cards into a new pile, until the pile sizes are exactly
/// 1, 2, ..., N in some order.
#[derive(Parser)]
struct Args {
    /// Read the initial configuration from stdin instead of generating it randomly
    #[arg(short, long)]
    user_config: bool,

    /// Pause for a keypress between rounds
    #[arg(short, long)]
    single_step: bool,

    /// Number of piles in the final configuration
    #[arg(long, default_value_t = NUM_FINAL_PILES)]
    final_piles: u32,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let board = if args.user_config {
        let piles = input::collect_initial_config(&mut lines, args.final_piles)?;
        Board::from_piles(args.final_piles, &piles)
    } else {
        let seed = args.seed.unwrap_or_else(rand::random);
        info!(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        Board::random(args.final_piles, &mut rng)
    };

    println!("Initial configuration: {}", board.config_string());
    run_game(board, args.single_step, &mut lines)
}

fn run_game(
    mut board: Board,
    single_step: bool,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<()> {
    let mut round = 1;
    while !board.is_done() {
        if single_step && round > 1 {
            print!("<Type return to continue>");
            io::stdout().flush()?;
            lines.next().context("stdin closed while single-stepping")??;
        }
        board.play_round();
        println!("[{}] Current configuration: {}", round, board.config_string());
        round += 1;
    }
    println!("Done!");
    info!(rounds = round - 1, "game finished");
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
