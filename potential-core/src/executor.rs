//! Where per-cell work runs: inline on the caller's thread, or on a dedicated
//! rayon pool owned by the solver.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::SolverError;

pub enum Executor {
    Sequential,
    Pool(ThreadPool),
}

impl Executor {
    /// `0` keeps everything on the calling thread.
    pub fn with_threads(threads: usize) -> Result<Self, SolverError> {
        if threads == 0 {
            return Ok(Executor::Sequential);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("relax-{i}"))
            .build()?;
        Ok(Executor::Pool(pool))
    }

    pub fn threads(&self) -> usize {
        match self {
            Executor::Sequential => 0,
            Executor::Pool(pool) => pool.current_num_threads(),
        }
    }

    /// Fill slot `i` of `staged` and `deltas` from `f(i)`.
    ///
    /// Every slot is written by exactly one task, so the parallel path needs
    /// no locking. Returns once all slots are written.
    pub fn sweep<F>(&self, staged: &mut [f32], deltas: &mut [f32], f: F)
    where
        F: Fn(usize) -> (f32, f32) + Sync + Send,
    {
        debug_assert_eq!(staged.len(), deltas.len());
        match self {
            Executor::Sequential => {
                for (i, (s, d)) in staged.iter_mut().zip(deltas.iter_mut()).enumerate() {
                    (*s, *d) = f(i);
                }
            }
            Executor::Pool(pool) => pool.install(|| {
                staged
                    .par_iter_mut()
                    .zip(deltas.par_iter_mut())
                    .enumerate()
                    .for_each(|(i, (s, d))| (*s, *d) = f(i));
            }),
        }
    }

    /// Largest entry, or `0.0` when empty.
    pub fn max(&self, deltas: &[f32]) -> f32 {
        match self {
            Executor::Sequential => deltas.iter().copied().fold(0.0, f32::max),
            Executor::Pool(pool) => {
                pool.install(|| deltas.par_iter().copied().reduce(|| 0.0, f32::max))
            }
        }
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Executor::Sequential => f.write_str("Sequential"),
            Executor::Pool(pool) => write!(f, "Pool({} threads)", pool.current_num_threads()),
        }
    }
}
