//! Per-tick orchestration of the stable-fluids scheme.

use glam::Vec2;

use crate::config::Config;
use crate::grid::Grid;
use crate::solver::{self, Boundary};

/// Fixed per-tick timestep. Deliberately not scaled by measured elapsed
/// time, so transport and fade speed track the display refresh rate.
pub const DT: f32 = 0.16;

/// One fluid simulation: grid state plus the step orchestration.
///
/// External events funnel through [`FluidSim::add_density`] and
/// [`FluidSim::add_velocity`] before the tick; the driver then calls
/// [`FluidSim::step`] exactly once per frame.
#[derive(Debug, Clone)]
pub struct FluidSim {
    pub grid: Grid,
}

impl FluidSim {
    pub fn new(viewport_width: f32, viewport_height: f32, cell_size: f32) -> Self {
        Self {
            grid: Grid::from_viewport(viewport_width, viewport_height, cell_size),
        }
    }

    /// Pixels per cell, for pointer-space to cell-space translation
    /// (`cell_x = floor(pixel_x / cell_size)`).
    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size
    }

    pub fn add_density(&mut self, x: usize, y: usize, amount: f32) {
        self.grid.add_density(x, y, amount);
    }

    pub fn add_velocity(&mut self, x: usize, y: usize, amount: Vec2) {
        self.grid.add_velocity(x, y, amount);
    }

    /// Drops all field state and reallocates the grid for a new viewport.
    /// Must not run concurrently with an in-flight step or draw; the
    /// single driver thread serializes the two.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.grid.resize(viewport_width, viewport_height);
    }

    /// Advances the simulation one tick: velocity step, then density step.
    pub fn step(&mut self, config: &Config) {
        self.velocity_step(config.viscosity);
        self.density_step(config.diffusion, config.decay_rate);
    }

    /// Diffuse the velocity field, project it divergence-free, self-advect
    /// it, then project again. The velocity field is never decayed.
    fn velocity_step(&mut self, viscosity: f32) {
        let g = &mut self.grid;
        let n = g.n;
        solver::diffuse(
            Boundary::VelocityX,
            &mut g.velocity_x_prev,
            &g.velocity_x,
            viscosity,
            DT,
            n,
        );
        solver::diffuse(
            Boundary::VelocityY,
            &mut g.velocity_y_prev,
            &g.velocity_y,
            viscosity,
            DT,
            n,
        );
        solver::project(
            &mut g.velocity_x_prev,
            &mut g.velocity_y_prev,
            &mut g.velocity_x,
            &mut g.velocity_y,
            n,
        );
        solver::advect(
            Boundary::VelocityX,
            &mut g.velocity_x,
            &g.velocity_x_prev,
            &g.velocity_x_prev,
            &g.velocity_y_prev,
            DT,
            n,
        );
        solver::advect(
            Boundary::VelocityY,
            &mut g.velocity_y,
            &g.velocity_y_prev,
            &g.velocity_x_prev,
            &g.velocity_y_prev,
            DT,
            n,
        );
        solver::project(
            &mut g.velocity_x,
            &mut g.velocity_y,
            &mut g.velocity_x_prev,
            &mut g.velocity_y_prev,
            n,
        );
    }

    /// Diffuse the dye, carry it along the divergence-free velocity field,
    /// then fade every cell by `decay_rate`.
    fn density_step(&mut self, diffusion: f32, decay_rate: f32) {
        let g = &mut self.grid;
        let n = g.n;
        solver::diffuse(
            Boundary::Scalar,
            &mut g.density_prev,
            &g.density,
            diffusion,
            DT,
            n,
        );
        solver::advect(
            Boundary::Scalar,
            &mut g.density,
            &g.density_prev,
            &g.velocity_x,
            &g.velocity_y,
            DT,
            n,
        );
        for d in &mut g.density {
            *d *= decay_rate;
        }
    }
}
