// Fork-join execution of one parallel region over a fixed worker pool.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;

use super::accumulator::AccumulatorSet;
use super::affinity;
use super::partition::partition_for;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub threads: usize,
    /// Pin each pool thread to its own core.
    pub pin_threads: bool,
}

/// Order in which the workers visit the elements of a region of `len` elements.
#[derive(Debug, Clone, Copy)]
pub enum Traversal<'a> {
    /// Contiguous partitions, elements visited in index order.
    Linear,
    /// Contiguous partitions of positions; position `i` visits element `order[i]`.
    Permuted(&'a [usize]),
    /// Worker `w` takes positions `w, w + T, w + 2T, ...` and position `i`
    /// visits element `(i * stride) % len`.
    Strided { stride: usize },
    /// Contiguous partitions of positions over a row-major `side x side`
    /// matrix walked column by column.
    ColumnMajor { side: usize },
}

impl Traversal<'_> {
    pub fn kind(&self) -> TraversalKind {
        match self {
            Traversal::Linear => TraversalKind::Linear,
            Traversal::Permuted(_) => TraversalKind::Permuted,
            Traversal::Strided { stride: 1 } => TraversalKind::Interleaved,
            Traversal::Strided { .. } => TraversalKind::Strided,
            Traversal::ColumnMajor { .. } => TraversalKind::ColumnMajor,
        }
    }
}

/// Name of a traversal without the data it borrows, for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalKind {
    Linear,
    Permuted,
    Strided,
    Interleaved,
    ColumnMajor,
    /// Rayon map/reduce with no accumulator slots.
    Reduction,
}

impl TraversalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalKind::Linear => "linear",
            TraversalKind::Permuted => "permuted",
            TraversalKind::Strided => "strided",
            TraversalKind::Interleaved => "interleaved",
            TraversalKind::ColumnMajor => "column-major",
            TraversalKind::Reduction => "reduction",
        }
    }
}

pub struct ParallelExecutor {
    pool: ThreadPool,
    threads: usize,
}

impl ParallelExecutor {
    pub fn new(config: ExecutorConfig) -> Result<Self> {
        if config.threads == 0 {
            return Err(Error::ZeroThreads);
        }

        let mut builder = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|index| format!("bench-worker-{index}"));

        if config.pin_threads {
            let cores = affinity::core_ids();
            builder = builder.start_handler(move |index| {
                affinity::pin_current(&cores, index);
            });
        }

        let pool = builder.build()?;

        tracing::debug!(
            threads = config.threads,
            pin_threads = config.pin_threads,
            "built worker pool"
        );

        Ok(Self {
            pool,
            threads: config.threads,
        })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Runs `visit` once per visited element on every pool thread at once and
    /// adds each returned delta to the calling worker's slot. Returns after all
    /// workers have finished.
    ///
    /// Worker ids are pool thread indexes, so each slot has exactly one writer.
    pub fn run<A, F>(&self, len: usize, traversal: Traversal<'_>, slots: &A, visit: F)
    where
        A: AccumulatorSet + ?Sized,
        F: Fn(usize) -> u64 + Sync,
    {
        assert_eq!(slots.len(), self.threads, "one accumulator slot per worker");
        if let Traversal::Permuted(order) = traversal {
            assert_eq!(order.len(), len, "permutation must cover the region");
        }

        let threads = self.threads;

        self.pool.broadcast(|ctx| {
            let worker = ctx.index();
            let mut touch = |index: usize| slots.accumulate(worker, visit(index));

            match traversal {
                Traversal::Linear => {
                    partition_for(len, threads, worker).range().for_each(touch);
                }
                Traversal::Permuted(order) => {
                    let part = partition_for(len, threads, worker);
                    order[part.range()].iter().for_each(|&index| touch(index));
                }
                Traversal::Strided { stride } => {
                    walk_strided(len, threads, worker, stride, &mut touch);
                }
                Traversal::ColumnMajor { side } => {
                    for position in partition_for(len, threads, worker).range() {
                        touch((position % side) * side + position / side);
                    }
                }
            }
        });
    }

    /// Sums `visit(i)` for every `i` in `0..len` with a rayon map/reduce inside
    /// the pool, keeping partial results on worker stacks instead of in slots.
    pub fn reduce_linear<F>(&self, len: usize, visit: F) -> u64
    where
        F: Fn(usize) -> u64 + Sync + Send,
    {
        let min_len = len.div_ceil(self.threads).max(1);

        self.pool.install(|| {
            (0..len)
                .into_par_iter()
                .with_min_len(min_len)
                .fold(|| 0u64, |acc, index| acc.wrapping_add(visit(index)))
                .reduce(|| 0u64, u64::wrapping_add)
        })
    }
}

fn mul_mod(a: usize, b: usize, modulus: usize) -> usize {
    ((a as u128 * b as u128) % modulus as u128) as usize
}

fn walk_strided(
    len: usize,
    threads: usize,
    worker: usize,
    stride: usize,
    touch: &mut impl FnMut(usize),
) {
    if len == 0 {
        return;
    }

    let step = mul_mod(threads, stride, len);
    let mut index = mul_mod(worker, stride, len);

    for _ in (worker..len).step_by(threads) {
        touch(index);
        index = if index >= len - step {
            index - (len - step)
        } else {
            index + step
        };
    }
}

pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

pub fn is_coprime(len: usize, stride: usize) -> bool {
    gcd(stride, len) == 1
}

/// Number of distinct elements a strided traversal of `len` elements reaches.
pub fn stride_coverage(len: usize, stride: usize) -> usize {
    match gcd(stride, len) {
        0 => 0,
        divisor => len / divisor,
    }
}
