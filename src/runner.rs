//! One benchmark run from validated parameters to an immutable [`RunResult`].

use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::config::{Mode, RunConfig, Workload};
use crate::engine::{Layout, ParallelExecutor, TraversalKind};
use crate::error::Result;
use crate::workloads::access_variation::{self, VariationMode};
use crate::workloads::{array_sum, matrix_compare, matrix_init, Measurement};

fn as_secs_f64<S: Serializer>(elapsed: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub workload: &'static str,
    pub mode: &'static str,
    /// Sub-pass name for workloads that time more than one region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<&'static str>,
    pub size: usize,
    pub elements: usize,
    pub threads: usize,
    pub layout: Option<Layout>,
    pub traversal: TraversalKind,
    pub value: u64,
    pub expected: Option<u64>,
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs_f64")]
    pub elapsed: Duration,
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<u64>,
}

impl RunResult {
    fn from_measurement(
        workload: &'static str,
        mode: &'static str,
        size: usize,
        elements: usize,
        threads: usize,
        measurement: Measurement,
    ) -> Self {
        Self {
            workload,
            mode,
            phase: None,
            size,
            elements,
            threads,
            layout: measurement.layout,
            traversal: measurement.traversal,
            value: measurement.value,
            expected: measurement.expected,
            elapsed: measurement.elapsed,
            seed: measurement.seed,
            probe: measurement.probe,
        }
    }

    /// `None` when the run has no known expected value.
    pub fn is_correct(&self) -> Option<bool> {
        self.expected.map(|expected| expected == self.value)
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Validates, builds a worker pool and runs the configured workload once.
pub fn run(config: &RunConfig) -> Result<RunResult> {
    config.validate()?;
    let executor = ParallelExecutor::new(config.executor_config())?;
    run_with(&executor, config)
}

/// Runs on an existing pool, whose thread count overrides `config.threads`.
pub fn run_with(executor: &ParallelExecutor, config: &RunConfig) -> Result<RunResult> {
    config.validate()?;
    let elements = config.elements()?;

    tracing::debug!(
        workload = config.workload.as_str(),
        mode = config.mode.as_str(),
        size = config.size,
        threads = executor.threads(),
        "starting run"
    );

    let measurement = match config.workload {
        Workload::ArraySum => array_sum::run(executor, config)?,
        Workload::MatrixCompare => matrix_compare::run(executor, config)?,
        Workload::MatrixInit => matrix_init::run(executor, config)?,
    };

    Ok(RunResult::from_measurement(
        config.workload.as_str(),
        config.mode.as_str(),
        config.size,
        elements,
        executor.threads(),
        measurement,
    ))
}

/// Runs the access-variation passes, one result per timed pass.
pub fn run_variation(
    mode: VariationMode,
    size: usize,
    config: &RunConfig,
) -> Result<Vec<RunResult>> {
    config.validate()?;
    let executor = ParallelExecutor::new(config.executor_config())?;
    let phases = access_variation::run(&executor, mode, size, config.seed_source())?;

    Ok(phases
        .into_iter()
        .map(|phase| {
            let mut result = RunResult::from_measurement(
                "access-variation",
                mode.as_str(),
                size,
                size,
                executor.threads(),
                phase.measurement,
            );
            result.phase = Some(phase.name);
            result
        })
        .collect())
}

/// Every mode of `template.workload` at every thread count in `thread_counts`.
pub fn sweep(template: &RunConfig, thread_counts: &[usize]) -> Result<Vec<RunResult>> {
    let mut results = Vec::with_capacity(thread_counts.len() * Mode::ALL.len());

    for &threads in thread_counts {
        let mut config = template.clone();
        config.threads = threads;
        config.validate()?;
        let executor = ParallelExecutor::new(config.executor_config())?;

        for mode in Mode::ALL {
            config.mode = mode;
            results.push(run_with(&executor, &config)?);
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn run_reports_parameters_and_result() {
        let mut config = RunConfig::new(Workload::ArraySum, Mode::Good, 1000, 4);
        config.seed = Some(1);

        let result = run(&config).unwrap();
        assert_eq!(result.workload, "array-sum");
        assert_eq!(result.mode, "good");
        assert_eq!(result.threads, 4);
        assert_eq!(result.elements, 1000);
        assert_eq!(result.value, 500_500);
        assert_eq!(result.is_correct(), Some(true));
    }

    #[test]
    fn invalid_config_rejected_before_running() {
        let config = RunConfig::new(Workload::MatrixInit, Mode::Good, 0, 4);
        assert!(matches!(run(&config), Err(Error::ZeroSize)));

        let config = RunConfig::new(Workload::ArraySum, Mode::BadMa, 10, 0);
        assert!(matches!(run(&config), Err(Error::ZeroThreads)));
    }

    #[test]
    fn sweep_covers_modes_and_thread_counts() {
        let mut template = RunConfig::new(Workload::MatrixCompare, Mode::Good, 64, 1);
        template.seed = Some(3);

        let results = sweep(&template, &[1, 2, 4]).unwrap();
        assert_eq!(results.len(), 9);
        assert!(results.iter().all(|r| r.value == 5 && r.is_correct() == Some(true)));
        assert_eq!(results[3].threads, 2);
        assert_eq!(results[4].mode, "bad-fs");
    }

    #[test]
    fn variation_results_are_labelled() {
        let mut config = RunConfig::new(Workload::ArraySum, Mode::Good, 100, 2);
        config.seed = Some(4);

        let results = run_variation(VariationMode::Bad, 100, &config).unwrap();
        let phases: Vec<_> = results.iter().map(|r| r.phase).collect();
        assert_eq!(phases, vec![Some("random"), Some("sparse")]);
        assert!(results.iter().all(|r| r.workload == "access-variation"));
    }
}
