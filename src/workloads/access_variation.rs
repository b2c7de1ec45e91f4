// Read, write and read-modify-write passes over one array, linear versus
// random and fixed-step orders.

use clap::ValueEnum;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{measure, triangular, Measurement};
use crate::engine::{IndexPermutation, Layout, ParallelExecutor, SeedSource, Traversal};
use crate::error::{try_alloc_with, Result};

/// Step of the sparse pass in bad mode. Only every `SPARSE_STEP`-th element
/// is read.
pub const SPARSE_STEP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariationMode {
    /// Linear sum, then increment-and-sum
    Good,
    /// Random-order sum, then a sparse fixed-step sum
    Bad,
}

impl VariationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariationMode::Good => "good",
            VariationMode::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub name: &'static str,
    pub measurement: Measurement,
}

pub fn load_array(size: usize) -> Result<Vec<AtomicU64>> {
    try_alloc_with("array", size, |i| AtomicU64::new(i as u64 + 1))
}

/// Sum of `array[k * step]` for an array holding `i + 1` at index `i`.
fn sparse_sum(size: usize, step: usize) -> u64 {
    let visited = size.div_ceil(step) as u64;
    let step = step as u64;
    // sum over k < visited of (k * step + 1)
    step.wrapping_mul(visited.wrapping_mul(visited.wrapping_sub(1)) / 2)
        .wrapping_add(visited)
}

pub fn run(
    executor: &ParallelExecutor,
    mode: VariationMode,
    size: usize,
    seed: SeedSource,
) -> Result<Vec<Phase>> {
    let array = load_array(size)?;
    let read = |index: usize| array[index].load(Ordering::Relaxed);

    let phases = match mode {
        VariationMode::Good => {
            let mut linear = measure(executor, Layout::Isolated, size, Traversal::Linear, read)?;
            linear.expected = Some(triangular(size));

            let mut modify =
                measure(executor, Layout::Isolated, size, Traversal::Linear, |index| {
                    let updated = array[index].load(Ordering::Relaxed) + 1;
                    array[index].store(updated, Ordering::Relaxed);
                    updated
                })?;
            modify.expected = Some(triangular(size).wrapping_add(size as u64));

            vec![
                Phase {
                    name: "linear",
                    measurement: linear,
                },
                Phase {
                    name: "modify",
                    measurement: modify,
                },
            ]
        }
        VariationMode::Bad => {
            let order = IndexPermutation::random(size, seed)?;
            let mut random = measure(
                executor,
                Layout::Isolated,
                size,
                Traversal::Permuted(order.as_slice()),
                read,
            )?;
            random.expected = Some(triangular(size));
            random.seed = Some(order.seed());

            let mut sparse = measure(
                executor,
                Layout::Isolated,
                size.div_ceil(SPARSE_STEP),
                Traversal::Linear,
                |position| read(position * SPARSE_STEP),
            )?;
            sparse.expected = Some(sparse_sum(size, SPARSE_STEP));

            vec![
                Phase {
                    name: "random",
                    measurement: random,
                },
                Phase {
                    name: "sparse",
                    measurement: sparse,
                },
            ]
        }
    };

    Ok(phases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ExecutorConfig;

    fn executor(threads: usize) -> ParallelExecutor {
        ParallelExecutor::new(ExecutorConfig {
            threads,
            pin_threads: false,
        })
        .unwrap()
    }

    #[test]
    fn good_mode_phases() {
        let phases = run(&executor(2), VariationMode::Good, 1000, SeedSource::Fixed(1)).unwrap();
        let names: Vec<_> = phases.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["linear", "modify"]);

        assert_eq!(phases[0].measurement.value, 500_500);
        assert_eq!(phases[1].measurement.value, 501_500);
        assert!(phases
            .iter()
            .all(|p| Some(p.measurement.value) == p.measurement.expected));
    }

    #[test]
    fn bad_mode_phases() {
        let phases = run(&executor(3), VariationMode::Bad, 1000, SeedSource::Fixed(2)).unwrap();
        assert_eq!(phases[0].name, "random");
        assert_eq!(phases[0].measurement.value, 500_500);
        assert_eq!(phases[0].measurement.seed, Some(2));

        // 1 + 6 + 11 + ... + 996
        assert_eq!(phases[1].name, "sparse");
        assert_eq!(phases[1].measurement.value, 99_700);
        assert_eq!(phases[1].measurement.expected, Some(99_700));
    }

    #[test]
    fn sparse_sum_handles_partial_last_step() {
        // indices 0, 5 of a 7-element array: 1 + 6
        assert_eq!(sparse_sum(7, 5), 7);
        assert_eq!(sparse_sum(1, 5), 1);
    }
}
