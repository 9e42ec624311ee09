use glam::Vec2;

/// Row-major cell index with both coordinates clamped into the interior
/// band `[1, n-2]`. Stencil code resolves backtraced coordinates through
/// this so a sample that lands slightly off the grid still reads a valid
/// cell.
pub(crate) fn cell_index(n: usize, x: usize, y: usize) -> usize {
    x.clamp(1, n - 2) + y.clamp(1, n - 2) * n
}

/// Per-cell field storage for one simulation.
///
/// The grid is square with side `n = ceil(max(width, height) / cell_size)`.
/// The outer ring of cells is a ghost boundary: it is written only by the
/// boundary handler and is never a valid injection target.
#[derive(Debug, Clone)]
pub struct Grid {
    pub n: usize,
    pub cell_size: f32,
    pub density: Vec<f32>,
    pub density_prev: Vec<f32>,
    pub velocity_x: Vec<f32>,
    pub velocity_y: Vec<f32>,
    pub velocity_x_prev: Vec<f32>,
    pub velocity_y_prev: Vec<f32>,
}

impl Grid {
    pub fn new(n: usize, cell_size: f32) -> Self {
        let n = n.max(3);
        let size = n * n;
        Self {
            n,
            cell_size,
            density: vec![0.0; size],
            density_prev: vec![0.0; size],
            velocity_x: vec![0.0; size],
            velocity_y: vec![0.0; size],
            velocity_x_prev: vec![0.0; size],
            velocity_y_prev: vec![0.0; size],
        }
    }

    /// Grid covering a viewport at one cell per `cell_size` pixels.
    pub fn from_viewport(width: f32, height: f32, cell_size: f32) -> Self {
        Self::new((width.max(height) / cell_size).ceil() as usize, cell_size)
    }

    /// Clamped row-major index, see [`cell_index`].
    pub fn index(&self, x: usize, y: usize) -> usize {
        cell_index(self.n, x, y)
    }

    fn interior(&self, x: usize, y: usize) -> bool {
        (1..=self.n - 2).contains(&x) && (1..=self.n - 2).contains(&y)
    }

    /// Accumulates dye at an interior cell. Out-of-range coordinates are a
    /// silent no-op by policy, not an error.
    pub fn add_density(&mut self, x: usize, y: usize, amount: f32) {
        if self.interior(x, y) {
            self.density[x + y * self.n] += amount;
        }
    }

    /// Accumulates velocity at an interior cell, same bounds rule as
    /// [`Grid::add_density`].
    pub fn add_velocity(&mut self, x: usize, y: usize, amount: Vec2) {
        if self.interior(x, y) {
            let idx = x + y * self.n;
            self.velocity_x[idx] += amount.x;
            self.velocity_y[idx] += amount.y;
        }
    }

    /// Reallocates for a new viewport. All field state is lost.
    pub fn resize(&mut self, width: f32, height: f32) {
        let next = Self::from_viewport(width, height, self.cell_size);
        log::debug!("grid resize: {} -> {} cells per side", self.n, next.n);
        *self = next;
    }
}
