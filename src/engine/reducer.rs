use super::accumulator::AccumulatorSet;

/// Wrapping sum of every worker's slot. Call only after the parallel region
/// has returned.
pub fn reduce<A: AccumulatorSet + ?Sized>(slots: &A) -> u64 {
    (0..slots.len()).fold(0u64, |total, worker| total.wrapping_add(slots.get(worker)))
}
