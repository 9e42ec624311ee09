//! Core library for fluidtrail: a pointer-driven stable-fluids trail.
//!
//! The simulation advances by alternating diffusion, pressure projection,
//! and semi-Lagrangian advection over a square grid, then composites the
//! density field into a pixel buffer through a five-stop color ramp.

pub mod app;
pub mod color;
pub mod config;
pub mod export;
pub mod grid;
pub mod render;
pub mod sim;
pub mod solver;

pub use app::TrailApp;
pub use color::{ColorRamp, ColorStop};
pub use config::Config;
pub use export::ImageExporter;
pub use grid::Grid;
pub use render::PixelBuffer;
pub use sim::{DT, FluidSim};
pub use solver::Boundary;
