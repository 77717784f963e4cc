//! Trace-driven cache simulator CLI.
//!
//! Replays a line-oriented memory trace against the split L1 hierarchy and
//! prints both caches' statistics at end of run. Trace lines are
//! `<opcode> [addressHex]` with opcodes 0=read, 1=write, 2=fetch, 3=evict,
//! 8=reset, 9=print; malformed lines are reported and skipped. Only an
//! unreadable trace file (or an invalid geometry override) is fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use cachesim_core::trace::{self, TraceCommand};
use cachesim_core::{HierarchyConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    version,
    about = "Trace-driven set-associative L1 cache simulator",
    long_about = "Replay a memory trace against a split L1 cache hierarchy.\n\nTrace lines are `<opcode> [addressHex]`: 0=read, 1=write, 2=fetch, 3=evict, 8=reset, 9=print. Reads and writes go to the data cache, fetches to the instruction cache; evictions apply to both."
)]
struct Cli {
    /// Memory trace file to replay.
    trace: PathBuf,

    /// Print next-level memory requests as they are issued.
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding the default cache geometry.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage problems exit 1, like every other startup failure;
            // requested help/version output is not a failure.
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.config {
        Some(ref path) => match HierarchyConfig::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {err}");
                process::exit(1);
            }
        },
        None => HierarchyConfig::default(),
    };

    let file = match File::open(&cli.trace) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Error opening trace file {}: {err}", cli.trace.display());
            process::exit(1);
        }
    };

    let mut sim = Simulator::new(&config);
    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("Error reading trace file {}: {err}", cli.trace.display());
                process::exit(1);
            }
        };
        match trace::parse_line(&line) {
            Ok(Some(command)) => run_command(&mut sim, command, cli.verbose),
            Ok(None) => {}
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    println!("Instruction Cache Statistics:");
    print!("{}", sim.icache().stats());
    println!("Data Cache Statistics:");
    print!("{}", sim.dcache().stats());
}

/// Applies one parsed command and prints whatever it requires.
fn run_command(sim: &mut Simulator, command: TraceCommand, verbose: bool) {
    match command {
        TraceCommand::Access { kind, addr } => {
            let outcome = sim.access(kind, addr);
            if verbose {
                if let Some(request) = outcome.request {
                    println!("{request}");
                }
            }
        }
        TraceCommand::Evict { addr } => {
            sim.evict(addr);
            println!("Eviction requested for address: 0x{addr:x}");
        }
        TraceCommand::Reset => {
            println!("Resetting caches...");
            sim.reset();
        }
        TraceCommand::Print => {
            println!("Instruction Cache Contents:");
            print!("{}", sim.icache().report());
            println!("Data Cache Contents:");
            print!("{}", sim.dcache().report());
        }
    }
}
