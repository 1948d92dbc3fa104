//! Square row-major potential grid.

/// An `h`×`h` field of potentials, stored row-major (`y * h + x`).
///
/// Border cells are never written by the solver and stay at zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    h: usize,
    values: Vec<f32>,
}

impl Grid {
    pub fn zeroed(h: usize) -> Self {
        Grid {
            h,
            values: vec![0.0; h * h],
        }
    }

    pub fn h(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.h + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[self.index(x, y)]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: usize, y: usize, value: f32) {
        let i = self.index(x, y);
        self.values[i] = value;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn row(&self, y: usize) -> &[f32] {
        &self.values[y * self.h..(y + 1) * self.h]
    }

    /// Rows from `y = 0` upward.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[f32]> + ExactSizeIterator {
        // h == 0 would make chunks() panic
        self.values.chunks(self.h.max(1))
    }

    /// Copy out as nested rows, addressable `[y][x]`.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.rows().map(<[f32]>::to_vec).collect()
    }

    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.h || y + 1 == self.h
    }

    /// Average of the four orthogonal neighbours. Only valid for interior cells.
    #[inline]
    pub fn neighbour_mean(&self, x: usize, y: usize) -> f32 {
        let i = self.index(x, y);
        let h = self.h;
        let v = &self.values;
        (v[i - h] + v[i + h] + v[i - 1] + v[i + 1]) / 4.0
    }

    /// Distance of an interior cell from the discrete Laplace condition.
    pub fn residual(&self, x: usize, y: usize) -> f32 {
        (self.get(x, y) - self.neighbour_mean(x, y)).abs()
    }
}
