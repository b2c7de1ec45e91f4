//! Micro-benchmarks for parallel memory-access patterns: sum reduction, matrix
//! comparison and matrix initialization, each in a good, a false-sharing and a
//! bad-locality configuration.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod matrix;
pub mod report;
pub mod runner;
pub mod workloads;

pub use config::{Access, Mode, RunConfig, Workload};
pub use error::{Error, Result};
pub use runner::RunResult;
