//! Wave/block decomposition shared by the two parallel engines.
//!
//! The interior `[1, rows) x [1, cols)` is tiled into square blocks of side `grain_size`.
//! Block `(bi, bj)` lies on wave `bi + bj` and depends only on its left, upper and upper-left
//! neighbours, which all lie on earlier waves. Every block of a wave may therefore run at the
//! same time as long as the previous wave has completed.

use std::ops::Range;

use log::{debug, trace};
use rayon::prelude::*;

use crate::{Error, Result, ScoreMatrix, SequenceContext, matrix::SharedCells};

/// Rectangle of interior cells processed by a single task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Block {
    pub fn len(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavePlan {
    rows: usize,
    cols: usize,
    grain_size: usize,
    block_rows: usize,
    block_cols: usize,
}

impl WavePlan {
    pub fn new(rows: usize, cols: usize, grain_size: usize) -> Result<Self> {
        if grain_size == 0 {
            return Err(Error::InvalidGrainSize(grain_size));
        }
        let plan = Self {
            rows,
            cols,
            grain_size,
            block_rows: rows.saturating_sub(1).div_ceil(grain_size),
            block_cols: cols.saturating_sub(1).div_ceil(grain_size),
        };
        debug!(
            "wave plan: {rows}x{cols} cells, grain {grain_size}, {}x{} blocks, {} waves",
            plan.block_rows,
            plan.block_cols,
            plan.num_waves()
        );
        Ok(plan)
    }

    pub fn grain_size(&self) -> usize {
        self.grain_size
    }

    /// Number of block anti-diagonals, zero when there are no interior cells
    pub fn num_waves(&self) -> usize {
        if self.block_rows == 0 || self.block_cols == 0 {
            return 0;
        }
        self.block_rows + self.block_cols - 1
    }

    /// First block row taking part in `wave`, for `wave < num_waves()`
    #[inline]
    pub fn start_idx(&self, wave: usize) -> usize {
        wave.saturating_sub(self.block_cols - 1)
    }

    /// Number of blocks on `wave`
    #[inline]
    pub fn num_blocks(&self, wave: usize) -> usize {
        wave.min(self.block_rows - 1) + 1 - self.start_idx(wave)
    }

    /// Block rows taking part in `wave`, the companion block column being `wave - bi`
    #[inline]
    pub fn block_rows_on(&self, wave: usize) -> Range<usize> {
        let start = self.start_idx(wave);
        start..start + self.num_blocks(wave)
    }

    /// Cells covered by block `(bi, wave - bi)`
    #[inline]
    pub fn block(&self, wave: usize, bi: usize) -> Block {
        let bj = wave - bi;
        let row_start = 1 + bi * self.grain_size;
        let col_start = 1 + bj * self.grain_size;
        Block {
            rows: row_start..(row_start + self.grain_size).min(self.rows),
            cols: col_start..(col_start + self.grain_size).min(self.cols),
        }
    }

    pub fn blocks(&self, wave: usize) -> impl Iterator<Item = Block> + '_ {
        self.block_rows_on(wave).map(move |bi| self.block(wave, bi))
    }
}

pub(crate) fn thread_pool(threads: Option<usize>) -> Result<rayon::ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .thread_name(|i| format!("wavealign-{i}"))
        .build()?;
    debug!("worker pool ready with {} threads", pool.current_num_threads());
    Ok(pool)
}

/// Fills row 0 and column 0 as two bulk parallel passes, returning the cells written. Must run
/// inside the engine's pool.
pub(crate) fn fill_boundary(ctx: &SequenceContext, matrix: &mut ScoreMatrix) -> u64 {
    let row_visited: u64 = matrix
        .row_mut(0)
        .par_iter_mut()
        .enumerate()
        .map(|(j, cell)| {
            *cell = ctx.boundary(j);
            1
        })
        .sum();
    trace!("boundary row: {row_visited} cells");

    let cols = matrix.cols();
    let col_visited: u64 = matrix
        .as_mut_slice()
        .par_chunks_mut(cols)
        .enumerate()
        .skip(1)
        .map(|(i, row)| {
            row[0] = ctx.boundary(i);
            1
        })
        .sum();
    trace!("boundary column: {col_visited} cells");

    row_visited + col_visited
}

/// Runs the recurrence over `block` in row-major order and returns the cells written.
///
/// # Safety
///
/// Every block of an earlier wave must be complete, and no other task may touch the cells of
/// `block` while this runs
#[inline]
pub(crate) unsafe fn fill_block(
    ctx: &SequenceContext,
    cells: SharedCells<'_>,
    block: Block,
) -> u64 {
    let mut visited = 0;
    for i in block.rows.clone() {
        for j in block.cols.clone() {
            unsafe {
                let score = ctx.recurrence(
                    i,
                    j,
                    cells.get(i - 1, j - 1),
                    cells.get(i - 1, j),
                    cells.get(i, j - 1),
                );
                cells.set(i, j, score);
            }
            visited += 1;
        }
    }
    visited
}
