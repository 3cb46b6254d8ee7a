//! Command-line surface for recovering a group seed from a directory of
//! decoded entity records.
//!
//! Parses a single positional directory argument, wires `ingest` ->
//! `finder`, and maps the result onto the documented exit codes: `0` with
//! the seed printed as a decimal `u64` on success, nonzero on "no seed
//! found" or input errors. Decoding the game's actual binary record
//! format is outside this crate's scope (see `ingest::RecordDecoder`);
//! this binary plugs in `ingest::FixedLayoutDecoder` as a working
//! reference decoder.

use clap::Parser;
use ingest::{read_cohort, FixedLayoutDecoder};
use seed_core::{SpawnerMode, DEFAULT_MAX_ROLLS};
use std::path::PathBuf;

/// Exit code for "ran fine but no group seed validated."
const EXIT_NOT_FOUND: i32 = 1;
/// Exit code for input errors (cohort size, I/O, decode failures).
const EXIT_INPUT_ERROR: i32 = 2;

/// Recover the group seed behind a directory of decoded entity records.
#[derive(Parser)]
#[command(name = "seedcrack")]
#[command(about = "Recover a spawn's hidden group seed from its decoded entity records")]
struct Args {
    /// Directory containing one decoded entity record per file.
    directory: PathBuf,

    /// Maximum personality re-rolls to try per entity.
    #[arg(long, default_value_t = DEFAULT_MAX_ROLLS)]
    max_rolls: u8,

    /// Spawner patterns to validate candidates against.
    #[arg(
        long = "modes",
        value_enum,
        value_delimiter = ',',
        default_values_t = [ModeArg::Multi, ModeArg::Single]
    )]
    modes: Vec<ModeArg>,

    /// Raise the tracing filter to debug (stacks with RUST_LOG).
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Suppress non-essential stderr diagnostics.
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ModeArg {
    Multi,
    Single,
    Mixed,
}

impl From<ModeArg> for SpawnerMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Multi => SpawnerMode::MULTI,
            ModeArg::Single => SpawnerMode::SINGLE,
            ModeArg::Mixed => SpawnerMode::MIXED,
        }
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
            |_| tracing_subscriber::EnvFilter::new(default_filter),
        ))
        .init();

    let modes = args
        .modes
        .iter()
        .copied()
        .map(SpawnerMode::from)
        .fold(SpawnerMode::empty(), |acc, mode| acc | mode);

    let records = match read_cohort(&args.directory, &FixedLayoutDecoder) {
        Ok(records) => records,
        Err(error) => {
            if !args.quiet {
                eprintln!("seedcrack: {error}");
            }
            std::process::exit(EXIT_INPUT_ERROR);
        }
    };

    match finder::find_group_seed(&records, Some(args.max_rolls), Some(modes)) {
        Some((group_seed, first)) => {
            tracing::info!(first, "cohort entity that produced the winning candidate");
            println!("{}", group_seed.0);
            std::process::exit(0);
        }
        None => {
            if !args.quiet {
                eprintln!("seedcrack: no group seed validated against this cohort");
            }
            std::process::exit(EXIT_NOT_FOUND);
        }
    }
}
