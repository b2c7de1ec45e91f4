//! The parallel partial-aggregation engine: traversal orders, per-worker
//! accumulator slots, the fork-join executor and the final reduction.

pub mod accumulator;
pub mod affinity;
pub mod executor;
pub mod partition;
pub mod permutation;
pub mod reducer;

pub use accumulator::{AccumulatorSet, IsolatedAccumulators, Layout, PackedAccumulators};
pub use executor::{ExecutorConfig, ParallelExecutor, Traversal, TraversalKind};
pub use partition::{partition, partition_for, Partition};
pub use permutation::{IndexPermutation, SeedSource};
pub use reducer::reduce;
