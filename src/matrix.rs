use crate::error::{try_alloc_with, Error, Result};

/// Square matrix stored row-major in one contiguous buffer.
pub struct Matrix<T> {
    cells: Vec<T>,
    side: usize,
}

impl<T> Matrix<T> {
    /// Builds a `side x side` matrix where `fill(i)` produces the cell at flat index `i`.
    pub fn new_with(
        what: &'static str,
        side: usize,
        fill: impl FnMut(usize) -> T,
    ) -> Result<Self> {
        let len = side
            .checked_mul(side)
            .ok_or(Error::SizeOverflow { size: side })?;
        let cells = try_alloc_with(what, len, fill)?;
        Ok(Self { cells, side })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.side + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.side && col < self.side {
            self.cells.get(self.index(row, col))
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.side;
        &self.cells[start..start + self.side]
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_index_views() {
        let matrix = Matrix::new_with("test", 3, |i| i).unwrap();
        assert_eq!(matrix.len(), 9);
        assert_eq!(matrix.row(1), &[3, 4, 5]);
        assert_eq!(matrix.get(2, 1), Some(&7));
        assert_eq!(matrix.index(2, 1), 7);
    }

    #[test]
    fn out_of_bounds_get_is_none() {
        let matrix = Matrix::new_with("test", 2, |_| 0u8).unwrap();
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 2), None);
    }

    #[test]
    fn overflowing_side_is_an_error() {
        let result = Matrix::new_with("test", usize::MAX, |_| 0u8);
        assert!(matches!(result, Err(Error::SizeOverflow { .. })));
    }

    #[test]
    fn cells_are_mutable() {
        let mut matrix = Matrix::new_with("test", 2, |_| 0u32).unwrap();
        matrix.cells_mut()[3] = 9;
        assert_eq!(matrix.get(1, 1), Some(&9));
    }
}
