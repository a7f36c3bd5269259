/// Season: play a reality-house season in the terminal.
///
/// Usage: season [--seed <n>] [--rounds <n>] [--cast <path>] [--catalog <path>]
///               [--config <path>] [--weighted] [--step]
///
/// With no paths the built-in Reality House cast and catalog are used.
/// Set `RUST_LOG=drama_engine=debug` to watch eligibility and effects.

use clap::Parser;
use drama_engine::core::driver::{Advance, RoundDriverBuilder, SimulationError};
use drama_engine::core::registry::PopularityEntry;
use drama_engine::core::render::Renderer;
use drama_engine::core::selector::PersonalityWeightedSelector;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Command line arguments for a season run
#[derive(Parser, Debug)]
#[command(name = "season")]
#[command(about = "Play a reality-house drama season")]
struct Args {
    /// Random seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds before elimination; overrides the config file
    #[arg(long)]
    rounds: Option<u32>,

    /// Cast roster (RON)
    #[arg(long)]
    cast: Option<PathBuf>,

    /// Event catalog (RON)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Season config (RON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Favor events written for the drawn personalities
    #[arg(long)]
    weighted: bool,

    /// Wait for Enter between rounds
    #[arg(long)]
    step: bool,
}

/// Prints everything straight to stdout.
struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn display_dialogue(&mut self, text: &str) {
        println!("  {}", text);
    }

    fn display_popularity_snapshot(&mut self, entries: &[PopularityEntry]) {
        let board: Vec<String> = entries
            .iter()
            .map(|e| format!("{} {}", e.name, e.popularity))
            .collect();
        println!("  [{}]", board.join(" | "));
    }

    fn append_relationship_log(&mut self, line: &str) {
        println!("  * {}", line);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut driver = match builder_from_args(&args).and_then(|b| b.build(ConsoleRenderer)) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    println!("Reality House");
    println!("=============");
    println!("Seed: {}", driver.config().seed);
    println!("Rounds: {}", driver.total_rounds());
    let cast: Vec<String> = driver
        .registry()
        .iter()
        .map(|c| format!("{} ({})", c.name, c.personality))
        .collect();
    println!("Cast: {}", cast.join(", "));
    println!();

    let stdin = io::stdin();
    while !driver.is_complete() {
        if args.step && driver.rounds_played() > 0 {
            print!("Press Enter to continue...");
            let _ = io::stdout().flush();
            let mut line = String::new();
            if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
                break;
            }
        }

        match driver.advance() {
            Ok(Advance::Round(report)) => {
                println!(
                    "-- round {}: {} & {} ({}, {} eligible)\n",
                    report.round,
                    report.a,
                    report.b,
                    report.quality,
                    report.eligible.len()
                );
            }
            Ok(Advance::Eliminated(_)) => {
                println!("\nSeason over after {} rounds.", driver.rounds_played());
            }
            Ok(Advance::Finished) => break,
            Err(e) => {
                eprintln!("ERROR: {}", e);
                process::exit(1);
            }
        }
    }
}

fn builder_from_args(args: &Args) -> Result<RoundDriverBuilder<ConsoleRenderer>, SimulationError> {
    let mut builder = RoundDriverBuilder::new().reality_house()?;
    if let Some(ref path) = args.cast {
        builder = builder.cast_path(path.clone());
    }
    if let Some(ref path) = args.catalog {
        builder = builder.catalog_path(path.clone());
    }
    if let Some(ref path) = args.config {
        builder = builder.config_path(path.clone());
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(rounds) = args.rounds {
        builder = builder.total_rounds(rounds);
    }
    if args.weighted {
        builder = builder.selector(PersonalityWeightedSelector::default());
    }
    Ok(builder)
}
