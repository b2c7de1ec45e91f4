use super::{layout_for, measure, measure_reduction, triangular, Measurement};
use crate::config::{Access, Mode, RunConfig};
use crate::engine::executor::{is_coprime, stride_coverage};
use crate::engine::{IndexPermutation, ParallelExecutor, Traversal};
use crate::error::{try_alloc_with, Result};

/// `value[i] = i + 1`.
pub fn load_array(size: usize) -> Result<Vec<u64>> {
    try_alloc_with("array", size, |i| i as u64 + 1)
}

pub fn run(executor: &ParallelExecutor, config: &RunConfig) -> Result<Measurement> {
    let size = config.size;
    let array = load_array(size)?;
    let visit = |index: usize| array[index];

    let mut measurement = match config.mode {
        Mode::Good if config.reduction => measure_reduction(executor, size, visit),
        Mode::Good | Mode::BadFs => {
            measure(executor, layout_for(config.mode), size, Traversal::Linear, visit)?
        }
        Mode::BadMa => match config.access {
            Access::Random => {
                let order = IndexPermutation::random(size, config.seed_source())?;
                let mut measurement = measure(
                    executor,
                    layout_for(config.mode),
                    size,
                    Traversal::Permuted(order.as_slice()),
                    visit,
                )?;
                measurement.seed = Some(order.seed());
                measurement
            }
            Access::Strided => {
                let stride = config.stride;
                if !is_coprime(size, stride) {
                    tracing::warn!(
                        stride,
                        size,
                        reachable = stride_coverage(size, stride),
                        "stride and size are not co-prime, sum will not include all elements"
                    );
                }
                measure(
                    executor,
                    layout_for(config.mode),
                    size,
                    Traversal::Strided { stride },
                    visit,
                )?
            }
        },
    };

    let complete = config.mode != Mode::BadMa
        || config.access == Access::Random
        || is_coprime(size, config.stride);
    measurement.expected = complete.then(|| triangular(size));

    Ok(measurement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Workload;
    use crate::engine::{ExecutorConfig, Layout, TraversalKind};

    fn executor(threads: usize) -> ParallelExecutor {
        ParallelExecutor::new(ExecutorConfig {
            threads,
            pin_threads: false,
        })
        .unwrap()
    }

    fn config(mode: Mode, size: usize, threads: usize) -> RunConfig {
        let mut config = RunConfig::new(Workload::ArraySum, mode, size, threads);
        config.seed = Some(5);
        config
    }

    #[test]
    fn every_mode_sums_to_closed_form() {
        let executor = executor(4);
        for mode in Mode::ALL {
            let measurement = run(&executor, &config(mode, 1000, 4)).unwrap();
            assert_eq!(measurement.value, 500_500, "{:?}", mode);
            assert_eq!(measurement.expected, Some(500_500));
        }
    }

    #[test]
    fn strided_with_coprime_stride_is_complete() {
        let executor = executor(3);
        let mut config = config(Mode::BadMa, 1000, 3);
        config.access = Access::Strided;
        config.stride = 7;

        let measurement = run(&executor, &config).unwrap();
        assert_eq!(measurement.value, 500_500);
        assert_eq!(measurement.traversal, TraversalKind::Strided);
        assert_eq!(measurement.layout, Some(Layout::Isolated));
    }

    #[test]
    fn non_coprime_stride_runs_with_partial_coverage() {
        let executor = executor(2);
        let mut config = config(Mode::BadMa, 1000, 2);
        config.access = Access::Strided;
        config.stride = 64;

        let measurement = run(&executor, &config).unwrap();
        assert_eq!(measurement.expected, None);
        assert_ne!(measurement.value, 500_500);
    }

    #[test]
    fn parallel_reduction_variant() {
        let executor = executor(4);
        let mut config = config(Mode::Good, 1000, 4);
        config.reduction = true;

        let measurement = run(&executor, &config).unwrap();
        assert_eq!(measurement.value, 500_500);
        assert_eq!(measurement.layout, None);
        assert_eq!(measurement.traversal, TraversalKind::Reduction);
    }

    #[test]
    fn random_access_reports_its_seed() {
        let executor = executor(2);
        let measurement = run(&executor, &config(Mode::BadMa, 100, 2)).unwrap();
        assert_eq!(measurement.seed, Some(5));
        assert_eq!(measurement.traversal, TraversalKind::Permuted);
    }

    #[test]
    fn bad_fs_uses_packed_slots() {
        let executor = executor(2);
        let measurement = run(&executor, &config(Mode::BadFs, 100, 2)).unwrap();
        assert_eq!(measurement.layout, Some(Layout::Packed));
        assert_eq!(measurement.value, 5050);
    }
}
