use log::trace;
use rayon::prelude::*;

use super::wavefront::{WavePlan, fill_block, fill_boundary};
use crate::{Result, ScoreMatrix, SequenceContext};

/// Wavefront fill where the blocks of each wave are handed to the pool as one bulk parallel
/// loop, reduced into the visited count. The loop returning is the barrier between waves.
pub fn fill(
    ctx: &SequenceContext,
    matrix: &mut ScoreMatrix,
    grain_size: usize,
    pool: &rayon::ThreadPool,
) -> Result<u64> {
    matrix.check_dimensions(ctx)?;
    let plan = WavePlan::new(ctx.rows(), ctx.cols(), grain_size)?;

    Ok(pool.install(|| {
        let mut visited = fill_boundary(ctx, matrix);

        let cells = matrix.shared();
        for wave in 0..plan.num_waves() {
            let wave_visited: u64 = plan
                .block_rows_on(wave)
                .into_par_iter()
                // SAFETY: blocks of one wave are disjoint and only read from earlier waves,
                // which completed before this loop started
                .map(|bi| unsafe { fill_block(ctx, cells, plan.block(wave, bi)) })
                .sum();
            trace!(
                "taskloop: wave {wave} done, {} blocks, {wave_visited} cells",
                plan.num_blocks(wave)
            );
            visited += wave_visited;
        }

        visited
    }))
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
    fn test_rejects_zero_grain() {
        let pool = thread_pool(Some(1)).unwrap();
        let ctx = SequenceContext::new("AC", "AC", &Scoring::default());
        let mut matrix = ScoreMatrix::for_context(&ctx);

        let err = fill(&ctx, &mut matrix, 0, &pool).unwrap_err();
        assert!(matches!(err, Error::InvalidGrainSize(0)));
    }
}
