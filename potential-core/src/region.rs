//! Circular Dirichlet regions pinned to a constant potential.

/// A disc of cells clamped to `value` for the whole solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampRegion {
    cx: f32,
    cy: f32,
    value: f32,
    radius: f32,
}

impl ClampRegion {
    pub fn new(cx: f32, cy: f32, value: f32, radius: f32) -> Self {
        ClampRegion { cx, cy, value, radius }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.cx, self.cy)
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Boundary cells count as inside (`<=`).
    pub fn contains(&self, x: usize, y: usize) -> bool {
        let dx = x as f32 - self.cx;
        let dy = y as f32 - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// The two-electrode layout used when no regions are supplied: a 100 V disc
/// in the upper left and a smaller 20 V disc in the lower right.
pub fn reference_regions(h: usize) -> [ClampRegion; 2] {
    let h = h as f32;
    [
        ClampRegion::new(0.25 * h, 0.75 * h, 100.0, 0.125 * h),
        ClampRegion::new(0.875 * h, 0.125 * h, 20.0, 0.05 * h),
    ]
}

/// First region in list order that covers `(x, y)`.
pub fn first_match(regions: &[ClampRegion], x: usize, y: usize) -> Option<(usize, &ClampRegion)> {
    regions.iter().enumerate().find(|(_, r)| r.contains(x, y))
}
