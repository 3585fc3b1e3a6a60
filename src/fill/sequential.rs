use log::trace;

use crate::{Result, ScoreMatrix, SequenceContext};

/// Fills the boundary, then every interior cell in row-major order. Reference implementation
/// that the wavefront engines are checked against. Returns the number of cells written.
pub fn fill(ctx: &SequenceContext, matrix: &mut ScoreMatrix) -> Result<u64> {
    matrix.check_dimensions(ctx)?;

    let rows = ctx.rows();
    let cols = ctx.cols();
    let mut visited = 0;

    // Boundary
    for i in 1..rows {
        matrix.set(i, 0, ctx.boundary(i));
        visited += 1;
    }
    for j in 0..cols {
        matrix.set(0, j, ctx.boundary(j));
        visited += 1;
    }
    trace!("sequential: boundary filled ({visited} cells)");

    // Interior
    for i in 1..rows {
        for j in 1..cols {
            let score = ctx.recurrence(
                i,
                j,
                matrix.get(i - 1, j - 1),
                matrix.get(i - 1, j),
                matrix.get(i, j - 1),
            );
            matrix.set(i, j, score);
            visited += 1;
        }
    }

    Ok(visited)
}
