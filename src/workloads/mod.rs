//! Workloads that drive the engine: each allocates and fills its inputs outside
//! the timed region, then times exactly the parallel region plus the reduction.

pub mod access_variation;
pub mod array_sum;
pub mod matrix_compare;
pub mod matrix_init;

use std::time::{Duration, Instant};

use crate::config::Mode;
use crate::engine::{
    reduce, AccumulatorSet, IsolatedAccumulators, Layout, PackedAccumulators, ParallelExecutor,
    Traversal, TraversalKind,
};
use crate::error::Result;

/// Outcome of one timed region.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub value: u64,
    pub elapsed: Duration,
    /// `None` when the region used no accumulator slots.
    pub layout: Option<Layout>,
    pub traversal: TraversalKind,
    /// Value the workload must produce; `None` when coverage is known to be partial.
    pub expected: Option<u64>,
    pub seed: Option<u64>,
    /// Spot check of one written cell, for initialization workloads.
    pub probe: Option<u64>,
}

/// Accumulator layout each mode uses.
pub fn layout_for(mode: Mode) -> Layout {
    match mode {
        Mode::BadFs => Layout::Packed,
        Mode::Good | Mode::BadMa => Layout::Isolated,
    }
}

fn timed_region<A, F>(
    executor: &ParallelExecutor,
    len: usize,
    traversal: Traversal<'_>,
    slots: &A,
    visit: F,
) -> (u64, Duration)
where
    A: AccumulatorSet,
    F: Fn(usize) -> u64 + Sync,
{
    let start = Instant::now();
    executor.run(len, traversal, slots, visit);
    let value = reduce(slots);
    (value, start.elapsed())
}

/// Allocates the slots for `layout` (untimed) and times one region over them.
///
/// Dispatches to a concrete slot type so the per-element update is never a
/// virtual call.
pub(crate) fn measure<F>(
    executor: &ParallelExecutor,
    layout: Layout,
    len: usize,
    traversal: Traversal<'_>,
    visit: F,
) -> Result<Measurement>
where
    F: Fn(usize) -> u64 + Sync,
{
    let (value, elapsed) = match layout {
        Layout::Isolated => {
            let slots = IsolatedAccumulators::new(executor.threads())?;
            timed_region(executor, len, traversal, &slots, visit)
        }
        Layout::Packed => {
            let slots = PackedAccumulators::new(executor.threads())?;
            timed_region(executor, len, traversal, &slots, visit)
        }
    };

    Ok(Measurement {
        value,
        elapsed,
        layout: Some(layout),
        traversal: traversal.kind(),
        expected: None,
        seed: None,
        probe: None,
    })
}

/// Times the slot-free rayon reduction over `0..len`.
pub(crate) fn measure_reduction<F>(executor: &ParallelExecutor, len: usize, visit: F) -> Measurement
where
    F: Fn(usize) -> u64 + Sync + Send,
{
    let start = Instant::now();
    let value = executor.reduce_linear(len, visit);

    Measurement {
        value,
        elapsed: start.elapsed(),
        layout: None,
        traversal: TraversalKind::Reduction,
        expected: None,
        seed: None,
        probe: None,
    }
}

/// `1 + 2 + ... + n`, wrapping like the accumulators do.
pub fn triangular(n: usize) -> u64 {
    let n = n as u128;
    (n * (n + 1) / 2) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ExecutorConfig;

    #[test]
    fn triangular_numbers() {
        assert_eq!(triangular(0), 0);
        assert_eq!(triangular(1), 1);
        assert_eq!(triangular(1000), 500_500);
    }

    #[test]
    fn layouts_per_mode() {
        assert_eq!(layout_for(Mode::Good), Layout::Isolated);
        assert_eq!(layout_for(Mode::BadFs), Layout::Packed);
        assert_eq!(layout_for(Mode::BadMa), Layout::Isolated);
    }

    #[test]
    fn layout_does_not_change_the_result() {
        let executor = ParallelExecutor::new(ExecutorConfig {
            threads: 4,
            pin_threads: false,
        })
        .unwrap();
        let data: Vec<u64> = (1..=1000).collect();

        let isolated =
            measure(&executor, Layout::Isolated, 1000, Traversal::Linear, |i| data[i]).unwrap();
        let packed =
            measure(&executor, Layout::Packed, 1000, Traversal::Linear, |i| data[i]).unwrap();

        assert_eq!(isolated.value, 500_500);
        assert_eq!(packed.value, 500_500);
        assert_eq!(packed.layout, Some(Layout::Packed));
    }
}
