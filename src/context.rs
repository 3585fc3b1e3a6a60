use crate::Scoring;

/// The two sequences being aligned together with the scoring scheme. Immutable once built,
/// shared by reference with every worker during a fill.
#[derive(Debug, Clone)]
pub struct SequenceContext {
    x: Vec<u8>,
    y: Vec<u8>,
    scoring: Scoring,
}

impl SequenceContext {
    pub fn new(x: impl Into<Vec<u8>>, y: impl Into<Vec<u8>>, scoring: &Scoring) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            scoring: scoring.clone(),
        }
    }

    pub fn x(&self) -> &[u8] {
        &self.x
    }

    pub fn y(&self) -> &[u8] {
        &self.y
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    /// Number of matrix rows, `|X| + 1`
    pub fn rows(&self) -> usize {
        self.x.len() + 1
    }

    /// Number of matrix columns, `|Y| + 1`
    pub fn cols(&self) -> usize {
        self.y.len() + 1
    }

    #[inline(always)]
    pub fn gap_penalty(&self) -> f32 {
        self.scoring.gap_penalty
    }

    /// Score of the boundary cell at `index` along row 0 or column 0
    #[inline(always)]
    pub fn boundary(&self, index: usize) -> f32 {
        index as f32 * self.scoring.gap_penalty
    }

    /// Substitution score for aligning `X[i - 1]` against `Y[j - 1]`
    #[inline(always)]
    pub fn substitution(&self, i: usize, j: usize) -> f32 {
        if self.x[i - 1] == self.y[j - 1] {
            self.scoring.match_score
        } else {
            self.scoring.mismatch_score
        }
    }

    /// Score of cell `(i, j)` from its diagonal, up and left neighbours. Every engine goes
    /// through this function so the matrices they produce are bit-identical.
    #[inline(always)]
    pub fn recurrence(&self, i: usize, j: usize, diag: f32, up: f32, left: f32) -> f32 {
        let gap = self.scoring.gap_penalty;
        let diag_score = diag + self.substitution(i, j);
        let up_score = up + gap;
        let left_score = left + gap;
        diag_score.max(up_score).max(left_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let ctx = SequenceContext::new("GATTACA", "GCAT", &Scoring::default());
        assert_eq!(ctx.rows(), 8);
        assert_eq!(ctx.cols(), 5);

        let ctx = SequenceContext::new("", "", &Scoring::default());
        assert_eq!(ctx.rows(), 1);
        assert_eq!(ctx.cols(), 1);
    }

    #[test]
    fn test_substitution() {
        let ctx = SequenceContext::new("AC", "AG", &Scoring::default());
        assert_eq!(ctx.substitution(1, 1), 1.0);
        assert_eq!(ctx.substitution(2, 2), -1.0);
        assert_eq!(ctx.substitution(2, 1), -1.0);
    }

    #[test]
    fn test_recurrence_picks_best_predecessor() {
        let ctx = SequenceContext::new("A", "A", &Scoring::default());
        // diagonal match wins
        assert_eq!(ctx.recurrence(1, 1, 0.0, -2.0, -2.0), 1.0);
        // gap from above wins over a poor diagonal
        assert_eq!(ctx.recurrence(1, 1, -10.0, 3.0, -2.0), 1.0);
        assert_eq!(ctx.recurrence(1, 1, -10.0, -2.0, 5.0), 3.0);
    }

    #[test]
    fn test_boundary() {
        let ctx = SequenceContext::new("ACGT", "AC", &Scoring::default());
        assert_eq!(ctx.boundary(0), 0.0);
        assert_eq!(ctx.boundary(3), -6.0);
    }
}
