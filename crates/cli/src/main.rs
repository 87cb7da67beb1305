//! Markov prefetcher simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It
//! performs:
//! 1. **Pattern run:** Generate an address pattern and drive it through the
//!    reference model or the staged sequencer, printing events, the learned
//!    transition table, and run statistics.
//! 2. **Conformance compare:** Drive the same pattern through both models
//!    and verify the event streams are identical.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::{fs, process};

use markov_core::common::PrefetchEvent;
use markov_core::config::{Config, PatternKind};
use markov_core::sim::patterns;
use markov_core::sim::{Model, Simulation};

#[derive(Parser, Debug)]
#[command(
    name = "mpsim",
    author,
    version,
    about = "Markov prefetcher simulator",
    long_about = "Drive address patterns through a first-order Markov prefetcher.\n\nConfiguration is JSON-first (see --config); command-line flags override the\nfile. The staged sequencer and the one-step reference model are\ninterchangeable and can be cross-checked with `compare`.\n\nExamples:\n  mpsim run --pattern sequential --length 10 --events\n  mpsim run --pattern random --seed 7 --staged --json\n  mpsim compare --pattern repeated --length 12"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Pattern selection for the command line, mapped onto the library enum.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum PatternArg {
    /// Ascending addresses.
    Sequential,
    /// Constant-stride addresses.
    Strided,
    /// Pairwise-swapped sequential addresses.
    Interleaved,
    /// A short cycle repeated.
    Repeated,
    /// Seeded uniform-random addresses.
    Random,
}

impl From<PatternArg> for PatternKind {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Sequential => Self::Sequential,
            PatternArg::Strided => Self::Strided,
            PatternArg::Interleaved => Self::Interleaved,
            PatternArg::Repeated => Self::Repeated,
            PatternArg::Random => Self::Random,
        }
    }
}

/// Shared pattern/geometry flags for `run` and `compare`.
#[derive(Args, Debug)]
struct RunArgs {
    /// JSON configuration file (flags below override its fields).
    #[arg(short, long)]
    config: Option<String>,

    /// Pattern shape to generate.
    #[arg(short, long, value_enum)]
    pattern: Option<PatternArg>,

    /// Number of references to generate.
    #[arg(short, long)]
    length: Option<usize>,

    /// Stride for the strided pattern.
    #[arg(long)]
    stride: Option<usize>,

    /// Period for the repeated pattern.
    #[arg(long)]
    period: Option<usize>,

    /// Seed for the random pattern.
    #[arg(long)]
    seed: Option<u64>,

    /// Address space size N.
    #[arg(long)]
    addr_space: Option<usize>,

    /// History window size W.
    #[arg(long)]
    window: Option<usize>,

    /// Transition counter width B in bits.
    #[arg(long)]
    counter_bits: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a pattern through one engine model.
    Run {
        #[command(flatten)]
        args: RunArgs,

        /// Drive the staged six-phase sequencer instead of the reference model.
        #[arg(long)]
        staged: bool,

        /// Print the per-reference event log.
        #[arg(long)]
        events: bool,

        /// Print the learned transition table (nonzero rows).
        #[arg(long)]
        table: bool,

        /// Emit events and statistics as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Run a pattern through both models and verify the event streams match.
    Compare {
        #[command(flatten)]
        args: RunArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            args,
            staged,
            events,
            table,
            json,
        }) => cmd_run(&args, staged, events, table, json),
        Some(Commands::Compare { args }) => cmd_compare(&args),
        None => {
            eprintln!("Markov prefetcher simulator — pass a subcommand");
            eprintln!();
            eprintln!("  mpsim run --pattern sequential --events   Run the reference model");
            eprintln!("  mpsim run --staged --table                Run the staged sequencer");
            eprintln!("  mpsim compare --pattern random --seed 7   Cross-check both models");
            eprintln!();
            eprintln!("  mpsim --help  for full options");
            process::exit(1);
        }
    }
}

/// Loads the JSON config file when given, then applies flag overrides.
fn build_config(args: &RunArgs) -> Config {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config {}: {}", path, e);
                process::exit(1);
            });
            serde_json::from_str(&text).unwrap_or_else(|e| {
                eprintln!("Error parsing config {}: {}", path, e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    if let Some(pattern) = args.pattern {
        config.pattern.kind = pattern.into();
    }
    if let Some(length) = args.length {
        config.pattern.length = length;
    }
    if let Some(stride) = args.stride {
        config.pattern.stride = stride;
    }
    if let Some(period) = args.period {
        config.pattern.period = period;
    }
    if let Some(seed) = args.seed {
        config.pattern.seed = seed;
    }
    if let Some(addr_space) = args.addr_space {
        config.predictor.addr_space = addr_space;
    }
    if let Some(window) = args.window {
        config.predictor.window = window;
    }
    if let Some(counter_bits) = args.counter_bits {
        config.predictor.counter_bits = counter_bits;
    }

    if let Err(e) = config.predictor.validate() {
        eprintln!("Invalid predictor geometry: {}", e);
        process::exit(1);
    }
    config
}

/// JSON payload for `run --json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    events: &'a [PrefetchEvent],
    stats: &'a markov_core::stats::PrefetchStats,
}

/// Runs one pattern through the selected engine model and reports.
fn cmd_run(args: &RunArgs, staged: bool, events: bool, table: bool, json: bool) {
    let config = build_config(args);
    let model = if staged { Model::Staged } else { Model::Reference };

    let addresses = patterns::generate(&config.pattern, config.predictor.addr_space);
    let mut sim = Simulation::new(&config.predictor, model).unwrap_or_else(|e| {
        eprintln!("Invalid predictor geometry: {}", e);
        process::exit(1);
    });
    let event_log = sim.run(&addresses);

    if json {
        let report = JsonReport {
            events: &event_log,
            stats: sim.stats(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!(
        "[*] {:?} pattern, {} references, N={} W={} B={} ({} model)",
        config.pattern.kind,
        addresses.len(),
        config.predictor.addr_space,
        config.predictor.window,
        config.predictor.counter_bits,
        if staged { "staged" } else { "reference" }
    );

    if events {
        println!();
        for (i, event) in event_log.iter().enumerate() {
            println!("[{i:>3}] {event}");
        }
    }

    if table {
        println!();
        print_table(&sim.table_snapshot());
    }

    if let Some(cycles) = sim.cycles() {
        println!("\nsequencer cycles: {cycles}");
    }
    sim.stats().print();
}

/// Runs both models over the same pattern and checks event equality.
fn cmd_compare(args: &RunArgs) {
    let config = build_config(args);
    let addresses = patterns::generate(&config.pattern, config.predictor.addr_space);

    let mut reference = Simulation::new(&config.predictor, Model::Reference).unwrap_or_else(|e| {
        eprintln!("Invalid predictor geometry: {}", e);
        process::exit(1);
    });
    let mut staged = Simulation::new(&config.predictor, Model::Staged).unwrap_or_else(|e| {
        eprintln!("Invalid predictor geometry: {}", e);
        process::exit(1);
    });

    let reference_events = reference.run(&addresses);
    let staged_events = staged.run(&addresses);

    println!(
        "[*] Conformance: {:?} pattern, {} references",
        config.pattern.kind,
        addresses.len()
    );

    for (i, (lhs, rhs)) in reference_events.iter().zip(staged_events.iter()).enumerate() {
        if lhs != rhs {
            eprintln!("[!] DIVERGENCE at reference {i}");
            eprintln!("    reference: {lhs}");
            eprintln!("    staged:    {rhs}");
            process::exit(1);
        }
    }

    println!("[*] Event streams identical across both models");
    reference.stats().print();
}

/// Prints the nonzero rows of a transition-table snapshot.
fn print_table(snapshot: &[Vec<u16>]) {
    println!("TRANSITION TABLE (nonzero rows)");
    for (from, row) in snapshot.iter().enumerate() {
        if row.iter().all(|&c| c == 0) {
            continue;
        }
        print!("  {from:>3} ->");
        for (to, &count) in row.iter().enumerate() {
            if count > 0 {
                print!("  {to}:{count}");
            }
        }
        println!();
    }
}
