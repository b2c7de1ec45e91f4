//! Command-line arguments shared by the benchmark binaries.

use clap::{Args, Parser};
use std::process::ExitCode;

use crate::config::{Access, Mode, RunConfig, Workload, DEFAULT_STRIDE};
use crate::logging;
use crate::report::{self, Format};
use crate::runner::{self, RunResult};
use crate::workloads::access_variation::VariationMode;

/// Exit status of a run whose result disagrees with the expected value.
pub const EXIT_INCORRECT: u8 = 3;

/// Options common to every binary.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Seed for the random permutation (default: derived from the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pin each worker thread to its own core
    #[arg(long)]
    pub pin: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Parser)]
#[command(allow_negative_numbers = true)]
pub struct BenchArgs {
    /// Memory access mode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Number of elements (side length for matrix workloads)
    pub size: usize,

    /// Number of worker threads
    pub threads: usize,

    /// Access pattern for bad-ma mode (array sum only)
    #[arg(long, value_enum, default_value_t = Access::Random)]
    pub access: Access,

    /// Stride for the strided access pattern
    #[arg(long, default_value_t = DEFAULT_STRIDE)]
    pub stride: usize,

    /// Use a parallel reduction without per-thread slots in good mode (array sum only)
    #[arg(long)]
    pub reduction: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl BenchArgs {
    pub fn into_config(self, workload: Workload) -> RunConfig {
        RunConfig {
            workload,
            mode: self.mode,
            size: self.size,
            threads: self.threads,
            access: self.access,
            stride: self.stride,
            seed: self.common.seed,
            reduction: self.reduction,
            pin_threads: self.common.pin,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(allow_negative_numbers = true)]
pub struct VariationArgs {
    #[arg(value_enum)]
    pub mode: VariationMode,

    /// Number of elements
    pub size: usize,

    /// Number of worker threads
    #[arg(default_value_t = 1)]
    pub threads: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

fn finish(results: &[RunResult], format: Format) -> ExitCode {
    match report::render_all(results, format) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }

    if results.iter().any(|r| r.is_correct() == Some(false)) {
        ExitCode::from(EXIT_INCORRECT)
    } else {
        ExitCode::SUCCESS
    }
}

/// Entry point of the single-workload binaries.
pub fn bench_main(workload: Workload) -> ExitCode {
    let args = BenchArgs::parse();
    logging::init(args.common.verbose);
    let format = args.common.format;
    let config = args.into_config(workload);

    match runner::run(&config) {
        Ok(result) => finish(&[result], format),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn variation_main() -> ExitCode {
    let args = VariationArgs::parse();
    logging::init(args.common.verbose);

    let mut config = RunConfig::new(Workload::ArraySum, Mode::Good, args.size, args.threads);
    config.seed = args.common.seed;
    config.pin_threads = args.common.pin;

    match runner::run_variation(args.mode, args.size, &config) {
        Ok(results) => finish(&results, args.common.format),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
