use super::{layout_for, measure, Measurement};
use crate::config::{Mode, RunConfig};
use crate::engine::{IndexPermutation, ParallelExecutor, Traversal};
use crate::error::Result;
use crate::matrix::Matrix;

/// Every `DIFF_PERIOD`-th element of the second matrix differs from the first.
pub const DIFF_PERIOD: usize = 1000;

/// `A[i] = i % 100`, `B` equal to `A` except every `DIFF_PERIOD`-th element,
/// which is one larger.
pub fn load_matrices(side: usize) -> Result<(Matrix<u64>, Matrix<u64>)> {
    let a = Matrix::new_with("matrix A", side, |i| (i % 100) as u64)?;
    let mut b = Matrix::new_with("matrix B", side, |i| (i % 100) as u64)?;

    for (cell, original) in b
        .cells_mut()
        .iter_mut()
        .zip(a.cells())
        .step_by(DIFF_PERIOD)
    {
        *cell = original + 1;
    }

    Ok((a, b))
}

/// Number of differing elements among `elements` flat positions.
pub fn expected_mismatches(elements: usize) -> u64 {
    elements.div_ceil(DIFF_PERIOD) as u64
}

pub fn run(executor: &ParallelExecutor, config: &RunConfig) -> Result<Measurement> {
    let (a, b) = load_matrices(config.size)?;
    let (a, b) = (a.cells(), b.cells());
    let elements = a.len();
    let visit = |index: usize| u64::from(a[index] != b[index]);

    let mut measurement = match config.mode {
        Mode::Good | Mode::BadFs => measure(
            executor,
            layout_for(config.mode),
            elements,
            Traversal::Linear,
            visit,
        )?,
        Mode::BadMa => {
            let order = IndexPermutation::random(elements, config.seed_source())?;
            let mut measurement = measure(
                executor,
                layout_for(config.mode),
                elements,
                Traversal::Permuted(order.as_slice()),
                visit,
            )?;
            measurement.seed = Some(order.seed());
            measurement
        }
    };

    measurement.expected = Some(expected_mismatches(elements));
    Ok(measurement)
}
