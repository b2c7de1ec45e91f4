// Access pattern variation over one array.
//
// Usage:
//   ./access_variation <good|bad> <size> [threads] [--seed S] [--format text|csv|json]
//   good: linear sum, then increment every element and sum again
//   bad:  random-order sum, then a sum over every 5th element only

use std::process::ExitCode;

use memaccess_benchmarks::cli;

fn main() -> ExitCode {
    cli::variation_main()
}
