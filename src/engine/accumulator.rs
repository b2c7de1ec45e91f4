// Per-worker partial result slots in two physical layouts.
//
// Each slot has a single writer during a parallel region, so updates are a
// relaxed load followed by a relaxed store, never `fetch_add`.

use serde::Serialize;
use std::mem::size_of;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{try_alloc_with, Result};

pub const CACHE_LINE_SIZE: usize = 64;

/// Physical arrangement of the accumulator slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// One slot per cache line.
    Isolated,
    /// Slots back to back, several per cache line.
    Packed,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Isolated => "isolated",
            Layout::Packed => "packed",
        }
    }
}

pub trait AccumulatorSet: Sync {
    fn layout(&self) -> Layout;

    /// Number of slots, one per worker.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, worker: usize) -> u64;

    /// Adds `delta` (wrapping) to the worker's slot. Only the worker that owns
    /// the slot may call this while a parallel region is running.
    fn accumulate(&self, worker: usize, delta: u64);

    fn reset(&mut self);
}

#[inline]
fn add_single_writer(slot: &AtomicU64, delta: u64) {
    let current = slot.load(Ordering::Relaxed);
    slot.store(current.wrapping_add(delta), Ordering::Relaxed);
}

#[repr(align(64))]
struct PaddedSlot(AtomicU64);

const _: () = assert!(size_of::<PaddedSlot>() == CACHE_LINE_SIZE);

/// Each slot occupies a cache line of its own, so no two workers ever write to
/// the same line.
pub struct IsolatedAccumulators {
    slots: Vec<PaddedSlot>,
}

impl IsolatedAccumulators {
    pub fn new(workers: usize) -> Result<Self> {
        let slots = try_alloc_with("isolated accumulator slots", workers, |_| {
            PaddedSlot(AtomicU64::new(0))
        })?;
        Ok(Self { slots })
    }
}

impl AccumulatorSet for IsolatedAccumulators {
    fn layout(&self) -> Layout {
        Layout::Isolated
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, worker: usize) -> u64 {
        self.slots[worker].0.load(Ordering::Relaxed)
    }

    #[inline]
    fn accumulate(&self, worker: usize, delta: u64) {
        add_single_writer(&self.slots[worker].0, delta);
    }

    fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot.0.get_mut() = 0;
        }
    }
}

/// Slots stored contiguously. Eight workers share one 64-byte line, so their
/// writes invalidate each other's caches even though they never touch the same
/// slot.
pub struct PackedAccumulators {
    slots: Vec<AtomicU64>,
}

impl PackedAccumulators {
    pub fn new(workers: usize) -> Result<Self> {
        let slots = try_alloc_with("packed accumulator slots", workers, |_| AtomicU64::new(0))?;
        Ok(Self { slots })
    }
}

impl AccumulatorSet for PackedAccumulators {
    fn layout(&self) -> Layout {
        Layout::Packed
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, worker: usize) -> u64 {
        self.slots[worker].load(Ordering::Relaxed)
    }

    #[inline]
    fn accumulate(&self, worker: usize, delta: u64) {
        add_single_writer(&self.slots[worker], delta);
    }

    fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot.get_mut() = 0;
        }
    }
}
