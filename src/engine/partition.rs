use std::ops::Range;

/// Half-open index range `[start, end)` owned by exactly one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Range for one worker: `n / threads` elements each, the last worker also
/// takes the remainder.
///
/// With `n < threads` every worker but the last gets an empty range and the last
/// one takes everything. Callers should keep `threads <= n`.
pub fn partition_for(n: usize, threads: usize, worker: usize) -> Partition {
    debug_assert!(threads >= 1);
    debug_assert!(worker < threads);

    let chunk_size = n / threads;
    let start = worker * chunk_size;
    let end = if worker == threads - 1 {
        n
    } else {
        start + chunk_size
    };

    Partition { start, end }
}

pub fn partition(n: usize, threads: usize) -> Vec<Partition> {
    (0..threads)
        .map(|worker| partition_for(n, threads, worker))
        .collect()
}
