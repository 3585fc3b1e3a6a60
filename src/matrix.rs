use std::marker::PhantomData;

use crate::{Error, Result, SequenceContext};

/// Row-major similarity matrix of `rows x cols` cells. Strategies are compared on the same
/// buffer, so it must be [reset](ScoreMatrix::reset) before every fill.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    cells: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl ScoreMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= 1 && cols >= 1, "score matrix needs at least one cell");
        Self {
            cells: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Allocates a zeroed matrix sized for the sequences of `ctx`
    pub fn for_context(ctx: &SequenceContext) -> Self {
        Self::new(ctx.rows(), ctx.cols())
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.cells[i * self.cols + j]
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: f32) {
        self.cells[i * self.cols + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [f32] {
        &mut self.cells[i * self.cols..(i + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    /// Global alignment score, the bottom-right cell
    pub fn score(&self) -> f32 {
        self.get(self.rows - 1, self.cols - 1)
    }

    /// Zeroes every cell
    pub fn reset(&mut self) {
        self.cells.fill(0.0);
    }

    pub(crate) fn check_dimensions(&self, ctx: &SequenceContext) -> Result<()> {
        let expected = (ctx.rows(), ctx.cols());
        let actual = (self.rows, self.cols);
        if expected != actual {
            return Err(Error::DimensionMismatch { expected, actual });
        }
        Ok(())
    }

    /// Raw view used by the wavefront engines to write disjoint blocks from several workers
    pub(crate) fn shared(&mut self) -> SharedCells<'_> {
        SharedCells {
            ptr: self.cells.as_mut_ptr(),
            cols: self.cols,
            len: self.cells.len(),
            phantom: PhantomData,
        }
    }
}

/// Unsynchronized view of a [`ScoreMatrix`] that can be copied into every task of a wave.
///
/// Holds the matrix mutably borrowed for `'a`, so nothing outside the fill can observe it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SharedCells<'a> {
    ptr: *mut f32,
    cols: usize,
    len: usize,
    phantom: PhantomData<&'a mut [f32]>,
}

// SAFETY: access goes through the unsafe `get`/`set`, whose callers guarantee that no cell is
// written by one task while another task reads or writes it
unsafe impl Send for SharedCells<'_> {}
unsafe impl Sync for SharedCells<'_> {}

impl SharedCells<'_> {
    /// # Safety
    ///
    /// No other task may be writing cell `(i, j)` concurrently
    #[inline(always)]
    pub unsafe fn get(&self, i: usize, j: usize) -> f32 {
        let index = i * self.cols + j;
        debug_assert!(index < self.len);
        unsafe { *self.ptr.add(index) }
    }

    /// # Safety
    ///
    /// No other task may be reading or writing cell `(i, j)` concurrently
    #[inline(always)]
    pub unsafe fn set(&self, i: usize, j: usize, value: f32) {
        let index = i * self.cols + j;
        debug_assert!(index < self.len);
        unsafe { *self.ptr.add(index) = value };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scoring;

    #[test]
    fn test_new_is_zeroed() {
        let matrix = ScoreMatrix::new(3, 4);
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 4);
        assert!(matrix.as_slice().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_row_major_layout() {
        let mut matrix = ScoreMatrix::new(2, 3);
        matrix.set(1, 2, 5.0);
        assert_eq!(matrix.as_slice()[5], 5.0);
        assert_eq!(matrix.row(1), &[0.0, 0.0, 5.0]);
        assert_eq!(matrix.score(), 5.0);
    }

    #[test]
    fn test_reset() {
        let mut matrix = ScoreMatrix::new(2, 2);
        matrix.set(0, 1, -2.0);
        matrix.set(1, 1, 3.0);
        matrix.reset();
        assert_eq!(matrix, ScoreMatrix::new(2, 2));
    }

    #[test]
    fn test_dimension_check() {
        let ctx = SequenceContext::new("ACG", "AC", &Scoring::default());
        assert!(ScoreMatrix::for_context(&ctx).check_dimensions(&ctx).is_ok());

        let err = ScoreMatrix::new(3, 3).check_dimensions(&ctx).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: (4, 3),
                actual: (3, 3)
            }
        ));
    }

    #[test]
    fn test_shared_cells_write_through() {
        let mut matrix = ScoreMatrix::new(2, 2);
        let cells = matrix.shared();
        unsafe {
            cells.set(1, 0, 7.0);
            assert_eq!(cells.get(1, 0), 7.0);
        }
        assert_eq!(matrix.get(1, 0), 7.0);
    }
}
