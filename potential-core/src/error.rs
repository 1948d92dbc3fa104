use thiserror::Error;

/// Errors raised while configuring a [`PotentialSolver`](crate::PotentialSolver).
///
/// The relaxation loop itself has no failure modes; everything here is
/// rejected before the first iteration runs.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("grid edge length must be >= 3, got {h}")]
    GridTooSmall { h: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("unknown relaxation strategy `{0}` (expected `jacobi` or `red-black`)")]
    UnknownStrategy(String),
}
