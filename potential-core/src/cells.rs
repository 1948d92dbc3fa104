//! Grid initialisation: stamping clamp regions and collecting the free cells.

use crate::grid::Grid;
use crate::region::{ClampRegion, first_match};

/// Interior coordinate of a cell the relaxation engine is allowed to update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    /// Checkerboard colour: `0` for even, `1` for odd.
    pub fn parity(&self) -> usize {
        (self.x + self.y) % 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellClass {
    Border,
    /// Pinned by the region at this index in the solver's region list.
    Clamped(usize),
    Free,
}

/// Every interior cell not covered by a clamp region, in row-major order,
/// plus its checkerboard split. Built once and never modified.
#[derive(Clone, Debug, Default)]
pub struct FreeCells {
    pub all: Vec<Cell>,
    pub even: Vec<Cell>,
    pub odd: Vec<Cell>,
}

impl FreeCells {
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

pub fn classify(h: usize, regions: &[ClampRegion], x: usize, y: usize) -> CellClass {
    if x == 0 || y == 0 || x + 1 >= h || y + 1 >= h {
        return CellClass::Border;
    }
    match first_match(regions, x, y) {
        Some((idx, _)) => CellClass::Clamped(idx),
        None => CellClass::Free,
    }
}

/// Build the zeroed `h`×`h` grid with every region stamped in, and the set of
/// cells left for relaxation.
///
/// Total for any `h`: below 3 there is no interior and the free set is empty.
pub fn initialise(h: usize, regions: &[ClampRegion]) -> (Grid, FreeCells) {
    let mut grid = Grid::zeroed(h);
    let mut free = FreeCells::default();

    for y in 1..h.saturating_sub(1) {
        for x in 1..h - 1 {
            match first_match(regions, x, y) {
                Some((_, region)) => grid.set(x, y, region.value()),
                None => {
                    let cell = Cell { x, y };
                    free.all.push(cell);
                    if cell.parity() == 0 {
                        free.even.push(cell);
                    } else {
                        free.odd.push(cell);
                    }
                }
            }
        }
    }

    (grid, free)
}
