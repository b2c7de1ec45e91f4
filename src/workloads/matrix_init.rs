use std::sync::atomic::{AtomicU32, Ordering};

use super::{layout_for, measure, Measurement};
use crate::config::{Mode, RunConfig};
use crate::engine::{ParallelExecutor, Traversal};
use crate::error::Result;
use crate::matrix::Matrix;

pub const FILL_VALUE: u32 = 17;

/// Cell read back after the run as a spot check, when the matrix is large enough.
pub const PROBE_CELL: (usize, usize) = (17, 17);

/// Zeroed matrix. Cells are atomics so workers can write disjoint cells that
/// share cache lines; relaxed stores compile to plain stores.
pub fn allocate(side: usize) -> Result<Matrix<AtomicU32>> {
    Matrix::new_with("matrix", side, |_| AtomicU32::new(0))
}

fn traversal_for(mode: Mode, side: usize) -> Traversal<'static> {
    match mode {
        // Row blocks, row-major inside each block.
        Mode::Good => Traversal::Linear,
        // Neighbouring cells go to different workers.
        Mode::BadFs => Traversal::Strided { stride: 1 },
        Mode::BadMa => Traversal::ColumnMajor { side },
    }
}

pub fn run(executor: &ParallelExecutor, config: &RunConfig) -> Result<Measurement> {
    let matrix = allocate(config.size)?;
    let cells = matrix.cells();

    let mut measurement = measure(
        executor,
        layout_for(config.mode),
        cells.len(),
        traversal_for(config.mode, matrix.side()),
        |index| {
            cells[index].store(FILL_VALUE, Ordering::Relaxed);
            1
        },
    )?;

    let (row, col) = PROBE_CELL;
    measurement.probe = matrix
        .get(row, col)
        .map(|cell| u64::from(cell.load(Ordering::Relaxed)));
    measurement.expected = Some(cells.len() as u64);

    Ok(measurement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Workload;
    use crate::engine::{ExecutorConfig, TraversalKind};

    fn executor(threads: usize) -> ParallelExecutor {
        ParallelExecutor::new(ExecutorConfig {
            threads,
            pin_threads: false,
        })
        .unwrap()
    }

    #[test]
    fn every_mode_writes_every_cell_once() {
        let executor = executor(4);
        for mode in Mode::ALL {
            let config = RunConfig::new(Workload::MatrixInit, mode, 50, 4);
            let measurement = run(&executor, &config).unwrap();

            assert_eq!(measurement.value, 2500, "{:?}", mode);
            assert_eq!(measurement.expected, Some(2500));
            assert_eq!(measurement.probe, Some(u64::from(FILL_VALUE)));
        }
    }

    #[test]
    fn small_matrix_has_no_probe() {
        let executor = executor(2);
        let config = RunConfig::new(Workload::MatrixInit, Mode::Good, 10, 2);
        let measurement = run(&executor, &config).unwrap();

        assert_eq!(measurement.value, 100);
        assert_eq!(measurement.probe, None);
    }

    #[test]
    fn modes_use_distinct_traversals() {
        assert_eq!(traversal_for(Mode::Good, 4).kind(), TraversalKind::Linear);
        assert_eq!(traversal_for(Mode::BadFs, 4).kind(), TraversalKind::Interleaved);
        assert_eq!(traversal_for(Mode::BadMa, 4).kind(), TraversalKind::ColumnMajor);
    }

    #[test]
    fn all_cells_hold_fill_value_after_run() {
        let executor = executor(3);
        let matrix = allocate(20).unwrap();
        let cells = matrix.cells();

        crate::workloads::measure(
            &executor,
            crate::engine::Layout::Isolated,
            cells.len(),
            traversal_for(Mode::BadMa, 20),
            |index| {
                cells[index].store(FILL_VALUE, Ordering::Relaxed);
                1
            },
        )
        .unwrap();

        for row in 0..20 {
            assert!(matrix
                .row(row)
                .iter()
                .all(|cell| cell.load(Ordering::Relaxed) == FILL_VALUE));
        }
    }
}
