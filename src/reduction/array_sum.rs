// Array sum benchmark: false sharing versus memory locality.
//
// Usage:
//   ./array_sum <mode> <size> <threads> [--access random|strided] [--stride S]
//               [--reduction] [--seed N] [--pin] [--format text|csv|json] [-v]
//   mode:    good | bad-fs | bad-ma
//   size:    number of elements (e.g. 100000000)
//   threads: number of worker threads (e.g. 1,2,4,8,16)
//
// The array holds i + 1 at index i, so every complete run sums to N(N+1)/2.
// Exit status 3 means the sum did not match.

use std::process::ExitCode;

use memaccess_benchmarks::cli;
use memaccess_benchmarks::Workload;

fn main() -> ExitCode {
    cli::bench_main(Workload::ArraySum)
}
