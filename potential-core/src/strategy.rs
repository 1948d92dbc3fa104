//! Per-iteration update rules for the relaxation engine.
//!
//! Both strategies stage new values for one colour (or, for Jacobi, all free
//! cells) into a scratch buffer while the grid is only read, then commit them.
//! For Jacobi that staging *is* the snapshot. For red-black it is
//! indistinguishable from an in-place sweep, because every neighbour of an
//! even cell is odd and vice versa.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cells::{Cell, FreeCells};
use crate::error::SolverError;
use crate::executor::Executor;
use crate::grid::Grid;

/// Divisor applied to every raw change before comparing with a threshold.
pub const DELTA_NORMALIZATION: f32 = 100.0;
pub const JACOBI_THRESHOLD: f32 = 1e-5;
pub const RED_BLACK_THRESHOLD: f32 = 1e-7;

/// One interchangeable update rule over the free cells.
pub trait Relaxation: Send {
    /// Run one full iteration and return its largest normalized change.
    fn run_iteration(&mut self, grid: &mut Grid, exec: &Executor) -> f32;

    /// Iteration stops once the metric is at or below this.
    fn threshold(&self) -> f32;

    /// Log progress every this many iterations.
    fn report_every(&self) -> usize;

    fn kind(&self) -> StrategyKind;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Jacobi,
    #[default]
    RedBlack,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Jacobi => "jacobi",
            StrategyKind::RedBlack => "red-black",
        }
    }

    pub fn build(self, cells: FreeCells) -> Box<dyn Relaxation> {
        match self {
            StrategyKind::Jacobi => Box::new(Jacobi::new(cells.all)),
            StrategyKind::RedBlack => Box::new(RedBlack::new(cells.even, cells.odd)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jacobi" => Ok(StrategyKind::Jacobi),
            "red-black" | "redblack" | "rb" => Ok(StrategyKind::RedBlack),
            other => Err(SolverError::UnknownStrategy(other.to_string())),
        }
    }
}

/// A list of cells with one staging slot and one delta slot per cell.
#[derive(Debug)]
struct Sweep {
    cells: Vec<Cell>,
    staged: Vec<f32>,
    deltas: Vec<f32>,
}

impl Sweep {
    fn new(cells: Vec<Cell>) -> Self {
        let n = cells.len();
        Sweep {
            cells,
            staged: vec![0.0; n],
            deltas: vec![0.0; n],
        }
    }

    /// Stage the stencil average for every cell from the grid as it stands,
    /// write the staged values back, and return the largest normalized change.
    fn run(&mut self, grid: &mut Grid, exec: &Executor) -> f32 {
        let Sweep {
            cells,
            staged,
            deltas,
        } = self;
        {
            let prev: &Grid = grid;
            exec.sweep(staged, deltas, |i| {
                let Cell { x, y } = cells[i];
                let new = prev.neighbour_mean(x, y);
                (new, (new - prev.get(x, y)).abs() / DELTA_NORMALIZATION)
            });
        }
        for (cell, &value) in cells.iter().zip(staged.iter()) {
            grid.set(cell.x, cell.y, value);
        }
        exec.max(deltas)
    }
}

/// Every free cell reads the previous iteration's values.
#[derive(Debug)]
pub struct Jacobi {
    sweep: Sweep,
}

impl Jacobi {
    pub fn new(cells: Vec<Cell>) -> Self {
        Jacobi {
            sweep: Sweep::new(cells),
        }
    }
}

impl Relaxation for Jacobi {
    fn run_iteration(&mut self, grid: &mut Grid, exec: &Executor) -> f32 {
        self.sweep.run(grid, exec)
    }

    fn threshold(&self) -> f32 {
        JACOBI_THRESHOLD
    }

    fn report_every(&self) -> usize {
        100
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Jacobi
    }
}

/// Checkerboard Gauss-Seidel: even cells first, then odd cells against the
/// freshly updated even ones.
#[derive(Debug)]
pub struct RedBlack {
    even: Sweep,
    odd: Sweep,
}

impl RedBlack {
    pub fn new(even: Vec<Cell>, odd: Vec<Cell>) -> Self {
        debug_assert!(even.iter().all(|c| c.parity() == 0));
        debug_assert!(odd.iter().all(|c| c.parity() == 1));
        RedBlack {
            even: Sweep::new(even),
            odd: Sweep::new(odd),
        }
    }
}

impl Relaxation for RedBlack {
    fn run_iteration(&mut self, grid: &mut Grid, exec: &Executor) -> f32 {
        let even = self.even.run(grid, exec);
        let odd = self.odd.run(grid, exec);
        even.max(odd)
    }

    fn threshold(&self) -> f32 {
        RED_BLACK_THRESHOLD
    }

    fn report_every(&self) -> usize {
        1000
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::RedBlack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::initialise;
    use crate::region::ClampRegion;

    fn point_source() -> (Grid, FreeCells) {
        initialise(5, &[ClampRegion::new(2.0, 2.0, 8.0, 0.0)])
    }

    #[test]
    fn parses_names() {
        assert_eq!("jacobi".parse::<StrategyKind>().unwrap(), StrategyKind::Jacobi);
        assert_eq!("Red-Black".parse::<StrategyKind>().unwrap(), StrategyKind::RedBlack);
        assert!(matches!(
            "sor".parse::<StrategyKind>(),
            Err(SolverError::UnknownStrategy(_))
        ));
        assert_eq!(StrategyKind::RedBlack.to_string(), "red-black");
    }

    #[test]
    fn jacobi_reads_only_previous_values() {
        let (mut grid, free) = point_source();
        let mut jacobi = Jacobi::new(free.all);
        let delta = jacobi.run_iteration(&mut grid, &Executor::Sequential);

        // only the four direct neighbours of the source see it
        assert_eq!(grid.get(1, 2), 2.0);
        assert_eq!(grid.get(3, 2), 2.0);
        assert_eq!(grid.get(2, 1), 2.0);
        assert_eq!(grid.get(2, 3), 2.0);
        assert_eq!(grid.get(1, 1), 0.0);
        assert_eq!(grid.get(3, 3), 0.0);
        assert_eq!(delta, 2.0 / DELTA_NORMALIZATION);
    }

    #[test]
    fn red_black_odd_pass_sees_even_pass() {
        let (mut grid, free) = point_source();
        let mut rb = RedBlack::new(free.even, free.odd);
        rb.run_iteration(&mut grid, &Executor::Sequential);

        // odd cells next to the source: (0 + 0 + 0 + 8) / 4
        assert_eq!(grid.get(1, 2), 2.0);
        // even corner cells stay zero on pass one; their odd neighbours are
        // still zero at that point
        assert_eq!(grid.get(1, 1), 0.0);

        rb.run_iteration(&mut grid, &Executor::Sequential);
        // (1,1) now averages (1,2)=2 and (2,1)=2 with two border zeros
        assert_eq!(grid.get(1, 1), 1.0);
    }

    #[test]
    fn thresholds_are_per_strategy() {
        let free = FreeCells::default();
        assert_eq!(StrategyKind::Jacobi.build(free.clone()).threshold(), 1e-5);
        assert_eq!(StrategyKind::RedBlack.build(free).threshold(), 1e-7);
    }

    #[test]
    fn empty_cell_set_reports_zero() {
        let mut grid = Grid::zeroed(2);
        let mut rb = StrategyKind::RedBlack.build(FreeCells::default());
        assert_eq!(rb.run_iteration(&mut grid, &Executor::Sequential), 0.0);
    }

    #[test]
    fn pool_matches_sequential_bit_for_bit() {
        let regions = [
            ClampRegion::new(4.0, 11.0, 100.0, 2.0),
            ClampRegion::new(13.0, 3.0, 20.0, 1.0),
        ];
        for kind in [StrategyKind::Jacobi, StrategyKind::RedBlack] {
            let (mut a, free) = initialise(16, &regions);
            let mut b = a.clone();
            let mut seq = kind.build(free.clone());
            let mut par = kind.build(free);
            let pool = Executor::with_threads(4).unwrap();
            for _ in 0..50 {
                let da = seq.run_iteration(&mut a, &Executor::Sequential);
                let db = par.run_iteration(&mut b, &pool);
                assert_eq!(da, db);
            }
            assert_eq!(a, b);
        }
    }
}
