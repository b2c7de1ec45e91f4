// Main benchmark runner for all workloads
// Sweeps every mode over a set of thread counts and prints a summary table

use clap::{Parser, ValueEnum};
use std::process::ExitCode;

use memaccess_benchmarks::cli::{CommonArgs, EXIT_INCORRECT};
use memaccess_benchmarks::report::{self, Format};
use memaccess_benchmarks::runner::{self, RunResult};
use memaccess_benchmarks::{logging, Mode, RunConfig, Workload};

const ARRAY_SIZE: usize = 10_000_000; // 10^7
const MATRIX_SIZE: usize = 2048;
const THREAD_COUNTS: [usize; 4] = [1, 2, 4, 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// Array sum reduction
    ArraySum,
    /// Matrix mismatch counting
    MatrixCompare,
    /// Matrix initialization
    MatrixInit,
    /// Every workload
    All,
}

impl Target {
    fn workloads(self) -> &'static [Workload] {
        match self {
            Target::ArraySum => &[Workload::ArraySum],
            Target::MatrixCompare => &[Workload::MatrixCompare],
            Target::MatrixInit => &[Workload::MatrixInit],
            Target::All => &Workload::ALL,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Run every mode of the memory access benchmarks over several thread counts")]
struct SweepArgs {
    #[arg(value_enum, default_value_t = Target::All)]
    target: Target,

    /// Element count for the array workloads
    #[arg(long, default_value_t = ARRAY_SIZE)]
    array_size: usize,

    /// Side length for the matrix workloads
    #[arg(long, default_value_t = MATRIX_SIZE)]
    matrix_size: usize,

    /// Thread counts to sweep, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = THREAD_COUNTS)]
    threads: Vec<usize>,

    #[command(flatten)]
    common: CommonArgs,
}

fn print_header(workload: Workload, size: usize, thread_counts: &[usize]) {
    println!("\n{:=<60}", "");
    println!("Workload: {}  (size = {})", workload.as_str(), size);
    println!("Testing thread counts: {:?}", thread_counts);
    println!("{:=<60}", "");
}

fn print_summary(results: &[RunResult], thread_counts: &[usize]) {
    println!("\nSummary: Execution Times (seconds)");
    print!("{:>8}", "mode \\ T");
    for threads in thread_counts {
        print!(" {:>10}", threads);
    }
    println!();
    println!("{:-<1$}", "", 8 + 11 * thread_counts.len());

    for mode in Mode::ALL {
        print!("{:>8}", mode.as_str());
        for &threads in thread_counts {
            let elapsed = results
                .iter()
                .find(|r| r.mode == mode.as_str() && r.threads == threads)
                .map(RunResult::elapsed_secs);
            match elapsed {
                Some(secs) => print!(" {:>10.4}", secs),
                None => print!(" {:>10}", "-"),
            }
        }
        println!();
    }

    // Speedup against the single-thread good run, like a strong scaling study.
    let baseline = results
        .iter()
        .find(|r| r.mode == Mode::Good.as_str() && r.threads == 1)
        .map(RunResult::elapsed_secs);
    if let Some(baseline) = baseline {
        println!("\nSlowdown versus good mode at T=1:");
        for result in results.iter().filter(|r| r.threads == 1) {
            println!(
                "  {:>8}: {:.2}x",
                result.mode,
                result.elapsed_secs() / baseline
            );
        }
    }
}

fn print_progress(result: &RunResult) {
    let status = match result.is_correct() {
        Some(true) => "ok",
        Some(false) => "WRONG",
        None => "partial",
    };
    println!(
        "Threads = {:2}, mode = {:>6} ... Time: {:.6}s, result = {} ({})",
        result.threads,
        result.mode,
        result.elapsed_secs(),
        result.value,
        status
    );
}

fn main() -> ExitCode {
    let args = SweepArgs::parse();
    logging::init(args.common.verbose);

    let mut all_results = Vec::new();

    for &workload in args.target.workloads() {
        let size = if workload.is_matrix() {
            args.matrix_size
        } else {
            args.array_size
        };

        let mut template = RunConfig::new(workload, Mode::Good, size, 1);
        template.seed = args.common.seed;
        template.pin_threads = args.common.pin;

        let results = match runner::sweep(&template, &args.threads) {
            Ok(results) => results,
            Err(e) => {
                eprintln!("error: {} benchmark failed: {e}", workload.as_str());
                return ExitCode::FAILURE;
            }
        };

        if args.common.format == Format::Text {
            print_header(workload, size, &args.threads);
            results.iter().for_each(print_progress);
            print_summary(&results, &args.threads);
        }

        all_results.extend(results);
    }

    if args.common.format != Format::Text {
        match report::render_all(&all_results, args.common.format) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if all_results.iter().any(|r| r.is_correct() == Some(false)) {
        ExitCode::from(EXIT_INCORRECT)
    } else {
        ExitCode::SUCCESS
    }
}
