//! Wavealign computes global pairwise sequence alignments ([Needleman-Wunsch](https://en.wikipedia.org/wiki/Needleman%E2%80%93Wunsch_algorithm)) with a linear gap penalty, and compares three ways of filling the dynamic-programming matrix: a sequential row-major sweep, a wavefront where each anti-diagonal of blocks runs as one bulk parallel loop, and a wavefront where each block is spawned as its own task. All three produce bit-identical matrices and report the number of cells they wrote, which doubles as a self-check.
//!
//! See [`fill`] for how the matrix is decomposed into waves of blocks.
//!
//! # Example: filling with every strategy
//!
//! ```rust
//! use wavealign::{Config, Engine, ScoreMatrix, SequenceContext, Strategy};
//!
//! let config = Config { grain_size: 4, ..Config::default() };
//! let ctx = SequenceContext::new("GATTACA", "GCATGCU", &config.scoring);
//! let engine = Engine::new(&config).unwrap();
//!
//! let mut matrix = ScoreMatrix::for_context(&ctx);
//! for strategy in Strategy::ALL {
//!     matrix.reset();
//!     let report = engine.fill(strategy, &ctx, &mut matrix).unwrap();
//!     assert!(report.is_consistent());
//!     assert_eq!(matrix.score(), -1.0);
//! }
//! ```
//!
//! # Example: recovering the alignment
//!
//! ```rust
//! use wavealign::{Config, Engine, ScoreMatrix, SequenceContext, Strategy, traceback::Alignment};
//!
//! let config = Config::default();
//! let ctx = SequenceContext::new("ACGT", "AGT", &config.scoring);
//! let mut matrix = ScoreMatrix::for_context(&ctx);
//! Engine::new(&config).unwrap().fill(Strategy::Tasks, &ctx, &mut matrix).unwrap();
//!
//! let alignment = Alignment::from_matrix(&ctx, &matrix).unwrap();
//! assert_eq!(alignment.x_aligned, b"ACGT");
//! assert_eq!(alignment.y_aligned, b"A-GT");
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod r#const;
mod context;
mod error;
pub mod fill;
pub mod io;
mod matrix;
pub mod traceback;

pub use context::SequenceContext;
pub use error::{Error, Result};
pub use fill::{Engine, FillReport, Strategy, expected_visited};
pub use matrix::ScoreMatrix;

use r#const::*;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Scoring scheme used by the recurrence
    pub scoring: Scoring,
    /// Side length of the square blocks scheduled as one unit of parallel work. Must be at
    /// least 1; anything larger than the matrix collapses every wave into a single block.
    pub grain_size: usize,
    /// Worker threads for the parallel strategies, `None` uses one per logical CPU
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scoring: Scoring::default(),
            grain_size: GRAIN_SIZE,
            threads: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scoring {
    /// Added when the two symbols are identical
    pub match_score: f32,
    /// Added when the two symbols differ
    pub mismatch_score: f32,
    /// Added for every symbol aligned against a gap, so usually negative
    pub gap_penalty: f32,
}

impl Default for Scoring {
    fn default() -> Self {
        Scoring {
            match_score: MATCH_SCORE,
            mismatch_score: MISMATCH_SCORE,
            gap_penalty: GAP_PENALTY,
        }
    }
}
