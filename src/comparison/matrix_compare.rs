// Matrix comparison benchmark: counts mismatches between two N x N matrices.
//
// Usage:
//   ./matrix_compare <mode> <N> <threads> [--seed S] [--pin] [--format text|csv|json] [-v]
//   mode: good | bad-fs | bad-ma (random traversal)
//
// Every 1000th element differs, so the count is floor((N*N - 1) / 1000) + 1.

use std::process::ExitCode;

use memaccess_benchmarks::cli;
use memaccess_benchmarks::Workload;

fn main() -> ExitCode {
    cli::bench_main(Workload::MatrixCompare)
}
