//! Steady-state potential on a square grid by relaxation of the discrete
//! Laplace equation, with circular regions held at fixed potential.
//!
//! ```no_run
//! use potential_core::{PotentialSolver, SolverConfig, StrategyKind};
//!
//! let config = SolverConfig::default().strategy(StrategyKind::Jacobi).threads(4);
//! let mut solver = PotentialSolver::with_config(512, config)?;
//! let secs = solver.solve();
//! let field = solver.result();
//! println!("{secs}s, centre = {}", field.get(256, 256));
//! # Ok::<(), potential_core::SolverError>(())
//! ```

mod cells;
mod error;
mod executor;
mod grid;
mod region;
mod solver;
mod strategy;

pub use cells::{Cell, CellClass, FreeCells, classify, initialise};
pub use error::SolverError;
pub use executor::Executor;
pub use grid::Grid;
pub use region::{ClampRegion, first_match, reference_regions};
pub use solver::{Convergence, DEFAULT_H, PotentialSolver, SolverConfig};
pub use strategy::{
    DELTA_NORMALIZATION, JACOBI_THRESHOLD, Jacobi, RED_BLACK_THRESHOLD, RedBlack, Relaxation,
    StrategyKind,
};
