// Matrix initialization benchmark.
//
// Usage:
//   ./matrix_init <mode> <N> <threads> [--pin] [--format text|csv|json] [-v]
//   mode: good   (row blocks per thread)
//         bad-fs (neighbouring cells written by different threads)
//         bad-ma (column-major order)

use std::process::ExitCode;

use memaccess_benchmarks::cli;
use memaccess_benchmarks::Workload;

fn main() -> ExitCode {
    cli::bench_main(Workload::MatrixInit)
}
