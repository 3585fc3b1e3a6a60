use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The score matrix was allocated for different sequences than the ones being aligned
    #[error("score matrix is {actual:?} (rows x cols) but the sequences require {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("grain size must be at least 1, got {0}")]
    InvalidGrainSize(usize),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} does not contain an alignment", .0.display())]
    EmptyAlignmentFile(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
