use log::trace;

use super::wavefront::{WavePlan, fill_block, fill_boundary};
use crate::{Result, ScoreMatrix, SequenceContext};

/// Wavefront fill where every block is spawned as its own task. The tasks of a wave share one
/// scope, each reporting into its own slot of `partials`; closing the scope is the barrier, after
/// which the partial counts are merged into the total.
pub fn fill(
    ctx: &SequenceContext,
    matrix: &mut ScoreMatrix,
    grain_size: usize,
    pool: &rayon::ThreadPool,
) -> Result<u64> {
    matrix.check_dimensions(ctx)?;
    let plan = WavePlan::new(ctx.rows(), ctx.cols(), grain_size)?;

    let mut visited = pool.install(|| fill_boundary(ctx, matrix));

    let cells = matrix.shared();
    let mut partials: Vec<u64> = Vec::new();
    for wave in 0..plan.num_waves() {
        partials.clear();
        partials.resize(plan.num_blocks(wave), 0);

        pool.scope(|s| {
            for (slot, block) in partials.iter_mut().zip(plan.blocks(wave)) {
                // SAFETY: blocks of one wave are disjoint and only read from earlier waves,
                // whose scopes have already closed
                s.spawn(move |_| *slot = unsafe { fill_block(ctx, cells, block) });
            }
        });

        let wave_visited: u64 = partials.iter().sum();
        trace!(
            "tasks: wave {wave} done, {} blocks, {wave_visited} cells",
            partials.len()
        );
        visited += wave_visited;
    }

    Ok(visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Scoring, fill::wavefront::thread_pool};

    #[test]
    fn test_gattaca() {
        let pool = thread_pool(Some(4)).unwrap();
        let ctx = SequenceContext::new("GATTACA", "GCATGCU", &Scoring::default());

        for grain_size in [1, 2, 3, 8, 100] {
            let mut matrix = ScoreMatrix::for_context(&ctx);
            let visited = fill(&ctx, &mut matrix, grain_size, &pool).unwrap();
            assert_eq!(visited, 64);
            assert_eq!(matrix.score(), -1.0);
        }
    }

    #[test]
    fn test_single_thread_pool() {
        let pool = thread_pool(Some(1)).unwrap();
        let ctx = SequenceContext::new("ACGTTGCA", "ACGGTCA", &Scoring::default());
        let mut matrix = ScoreMatrix::for_context(&ctx);

        assert_eq!(fill(&ctx, &mut matrix, 2, &pool).unwrap(), 7 * 8 + 9 + 8 - 1);
    }

    #[test]
    fn test_dimension_mismatch() {
        let pool = thread_pool(Some(2)).unwrap();
        let ctx = SequenceContext::new("ACG", "AC", &Scoring::default());
        let mut matrix = ScoreMatrix::new(4, 4);

        let err = fill(&ctx, &mut matrix, 1, &pool).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }
}
