use log::debug;

use crate::{Result, ScoreMatrix, SequenceContext, r#const::GAP_SYMBOL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Diagonal move, `X[i - 1]` aligned against `Y[j - 1]`
    Diagonal,
    /// Gap in `Y`, consuming `X[i - 1]`
    Up,
    /// Gap in `X`, consuming `Y[j - 1]`
    Left,
}

/// Global alignment recovered from a filled [`ScoreMatrix`]
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub x_aligned: Vec<u8>,
    pub y_aligned: Vec<u8>,
    pub score: f32,
    pub matches: usize,
    pub mismatches: usize,
    pub gaps: usize,
}

impl Alignment {
    /// Walks back from the bottom-right cell, preferring the diagonal, then up, then left when
    /// more than one predecessor reproduces the cell's score.
    pub fn from_matrix(ctx: &SequenceContext, matrix: &ScoreMatrix) -> Result<Self> {
        matrix.check_dimensions(ctx)?;

        let (x, y) = (ctx.x(), ctx.y());
        let gap = ctx.gap_penalty();

        let mut x_aligned = Vec::with_capacity(x.len() + y.len());
        let mut y_aligned = Vec::with_capacity(x.len() + y.len());
        let (mut matches, mut mismatches, mut gaps) = (0, 0, 0);

        let (mut i, mut j) = (x.len(), y.len());
        while i > 0 || j > 0 {
            let score = matrix.get(i, j);
            let step = if i > 0
                && j > 0
                && score == matrix.get(i - 1, j - 1) + ctx.substitution(i, j)
            {
                Step::Diagonal
            } else if i > 0 && (j == 0 || score == matrix.get(i - 1, j) + gap) {
                Step::Up
            } else {
                Step::Left
            };

            match step {
                Step::Diagonal => {
                    i -= 1;
                    j -= 1;
                    if x[i] == y[j] {
                        matches += 1;
                    } else {
                        mismatches += 1;
                    }
                    x_aligned.push(x[i]);
                    y_aligned.push(y[j]);
                }
                Step::Up => {
                    i -= 1;
                    gaps += 1;
                    x_aligned.push(x[i]);
                    y_aligned.push(GAP_SYMBOL);
                }
                Step::Left => {
                    j -= 1;
                    gaps += 1;
                    x_aligned.push(GAP_SYMBOL);
                    y_aligned.push(y[j]);
                }
            }
        }

        // built backwards
        x_aligned.reverse();
        y_aligned.reverse();

        let alignment = Self {
            x_aligned,
            y_aligned,
            score: matrix.score(),
            matches,
            mismatches,
            gaps,
        };
        debug!(
            "traceback: length {}, {matches} matches, {mismatches} mismatches, {gaps} gaps",
            alignment.len()
        );
        Ok(alignment)
    }

    /// Number of alignment columns, gaps included
    pub fn len(&self) -> usize {
        self.x_aligned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_aligned.is_empty()
    }

    /// Fraction of alignment columns that are identical symbols
    pub fn identity(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.matches as f32 / self.len() as f32
    }

    /// Fraction of gap-free columns that are identical symbols
    pub fn similarity(&self) -> f32 {
        let aligned = self.len() - self.gaps;
        if aligned == 0 {
            return 0.0;
        }
        self.matches as f32 / aligned as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scoring, fill::sequential};

    fn align(x: &str, y: &str) -> Alignment {
        let ctx = SequenceContext::new(x, y, &Scoring::default());
        let mut matrix = ScoreMatrix::for_context(&ctx);
        sequential::fill(&ctx, &mut matrix).unwrap();
        Alignment::from_matrix(&ctx, &matrix).unwrap()
    }

    #[test]
    fn test_gattaca() {
        let alignment = align("GATTACA", "GCATGCU");
        assert_eq!(alignment.x_aligned, b"GATTACA");
        assert_eq!(alignment.y_aligned, b"GCATGCU");
        assert_eq!(alignment.score, -1.0);
        assert_eq!(alignment.matches, 3);
        assert_eq!(alignment.mismatches, 4);
        assert_eq!(alignment.gaps, 0);
        assert_eq!(alignment.identity(), 3.0 / 7.0);
        assert_eq!(alignment.similarity(), 3.0 / 7.0);
    }

    #[test]
    fn test_single_gap() {
        let alignment = align("ACGT", "AGT");
        assert_eq!(alignment.x_aligned, b"ACGT");
        assert_eq!(alignment.y_aligned, b"A-GT");
        assert_eq!(alignment.score, 1.0);
        assert_eq!(alignment.gaps, 1);
        assert_eq!(alignment.matches, 3);
        assert_eq!(alignment.identity(), 0.75);
        assert_eq!(alignment.similarity(), 1.0);
    }

    #[test]
    fn test_empty_sequences() {
        let alignment = align("", "ACGT");
        assert_eq!(alignment.x_aligned, b"----");
        assert_eq!(alignment.y_aligned, b"ACGT");
        assert_eq!(alignment.gaps, 4);
        assert_eq!(alignment.similarity(), 0.0);

        let alignment = align("ACGT", "");
        assert_eq!(alignment.x_aligned, b"ACGT");
        assert_eq!(alignment.y_aligned, b"----");

        let alignment = align("", "");
        assert!(alignment.is_empty());
        assert_eq!(alignment.identity(), 0.0);
    }

    #[test]
    fn test_score_matches_path() {
        let scoring = Scoring::default();
        let alignment = align("TTAGCCGATAC", "TAGCGATTAAC");
        let path_score: f32 = alignment
            .x_aligned
            .iter()
            .zip(&alignment.y_aligned)
            .map(|(&a, &b)| {
                if a == GAP_SYMBOL || b == GAP_SYMBOL {
                    scoring.gap_penalty
                } else if a == b {
                    scoring.match_score
                } else {
                    scoring.mismatch_score
                }
            })
            .sum();
        assert_eq!(path_score, alignment.score);
    }
}
