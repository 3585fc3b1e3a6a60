//! Strategies for filling the [Needleman-Wunsch](https://en.wikipedia.org/wiki/Needleman%E2%80%93Wunsch_algorithm) similarity matrix.
//!
//! Each cell depends on the cell to the left, the cell above and the upper-left diagonal, so a
//! row-major sweep is inherently serial. Cells on the same anti-diagonal, however, never depend
//! on each other, which gives a "wavefront" that can be filled in parallel one diagonal at a
//! time. Spawning a task per cell costs more than the cell itself, so the parallel engines tile
//! the interior into square blocks of `grain_size` cells and run the wavefront over blocks.
//!
//! ```text
//! X: "GATTAC", Y: "GCATG", grain_size: 2
//!
//!          -   G   C   A   T   G
//!     -    b   b   b   b   b   b       b: boundary, filled before any wave
//!     G    b  [0   0] [1   1] [2]
//!     A    b  [0   0] [1   1] [2]      n: wave of the enclosing block
//!     T    b  [1   1] [2   2] [3]
//!     T    b  [1   1] [2   2] [3]
//!     A    b  [2   2] [3   3] [4]
//!     C    b  [2   2] [3   3] [4]
//! ```
//!
//! A block only reads from the blocks to its left, above and upper-left, all of which lie on
//! earlier waves. Blocks of one wave therefore run concurrently and write disjoint cells, with
//! a full barrier before the next wave starts.
//!
//! - [`sequential`]: row-major reference fill
//! - [`taskloop`]: each wave is one bulk parallel loop over its blocks with a sum reduction
//! - [`tasks`]: each block is spawned as its own task, the wave's tasks grouped in one scope
//!
//! All three produce bit-identical matrices and the same visited count.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Config, Error, Result, ScoreMatrix, SequenceContext};

pub mod sequential;
pub mod taskloop;
pub mod tasks;
pub mod wavefront;

pub use wavefront::{Block, WavePlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    Sequential,
    Taskloop,
    Tasks,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Sequential, Strategy::Taskloop, Strategy::Tasks];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Taskloop => "taskloop",
            Strategy::Tasks => "tasks",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of cells a complete fill writes: the interior plus row 0 and column 0
pub fn expected_visited(rows: usize, cols: usize) -> u64 {
    ((rows - 1) * (cols - 1) + rows + cols - 1) as u64
}

/// Outcome of a single fill. A visited count that disagrees with the expected count points at
/// a scheduling defect but the matrix is still returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct FillReport {
    pub strategy: Strategy,
    pub grain_size: usize,
    pub visited: u64,
    pub expected: u64,
    pub elapsed: Duration,
}

impl FillReport {
    pub fn is_consistent(&self) -> bool {
        self.visited == self.expected
    }
}

impl fmt::Display for FillReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "== {} version completed in {} seconds.",
            self.strategy,
            self.elapsed.as_secs_f32()
        )?;
        write!(f, "   Entries visited: {}", self.visited)?;
        if !self.is_consistent() {
            write!(f, " NOT OK (expected {})", self.expected)?;
        }
        Ok(())
    }
}

/// Validated configuration plus the worker pool shared by both wavefront strategies
#[derive(Debug)]
pub struct Engine {
    config: Config,
    pool: rayon::ThreadPool,
}

impl Engine {
    pub fn new(config: &Config) -> Result<Self> {
        if config.grain_size == 0 {
            return Err(Error::InvalidGrainSize(config.grain_size));
        }
        Ok(Self {
            config: config.clone(),
            pool: wavefront::thread_pool(config.threads)?,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Fills `matrix` with `strategy`. The matrix must be zeroed, see [`ScoreMatrix::reset`].
    pub fn fill(
        &self,
        strategy: Strategy,
        ctx: &SequenceContext,
        matrix: &mut ScoreMatrix,
    ) -> Result<FillReport> {
        let grain_size = self.config.grain_size;
        debug!(
            "{strategy}: filling {}x{} matrix (grain {grain_size}, {} threads)",
            ctx.rows(),
            ctx.cols(),
            self.threads()
        );

        let start = Instant::now();
        let visited = match strategy {
            Strategy::Sequential => sequential::fill(ctx, matrix)?,
            Strategy::Taskloop => taskloop::fill(ctx, matrix, grain_size, &self.pool)?,
            Strategy::Tasks => tasks::fill(ctx, matrix, grain_size, &self.pool)?,
        };
        let elapsed = start.elapsed();

        let report = FillReport {
            strategy,
            grain_size,
            visited,
            expected: expected_visited(ctx.rows(), ctx.cols()),
            elapsed,
        };
        if report.is_consistent() {
            debug!("{strategy}: {visited} cells in {elapsed:?}");
        } else {
            warn!(
                "{strategy}: visited {visited} cells, expected {}",
                report.expected
            );
        }
        Ok(report)
    }
}
