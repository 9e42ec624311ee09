//! Headless PNG export of rendered frames.

use std::error::Error;
use std::path::Path;

use crate::config::Config;
use crate::render::{self, PixelBuffer};
use crate::sim::FluidSim;

pub struct ImageExporter {
    buffer: PixelBuffer,
}

impl ImageExporter {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: PixelBuffer::new(width, height),
        }
    }

    /// Renders the current density field and writes it as a PNG.
    pub fn export_density_png(
        &mut self,
        sim: &FluidSim,
        config: &Config,
        path: &Path,
    ) -> Result<(), Box<dyn Error>> {
        self.buffer.clear();
        render::draw(&sim.grid, config, &mut self.buffer);
        self.buffer.to_rgba_image().save(path)?;
        Ok(())
    }

    /// Steps the simulation `steps` times, writing one numbered frame per
    /// tick.
    pub fn export_frame_sequence(
        &mut self,
        sim: &mut FluidSim,
        config: &Config,
        steps: usize,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<(), Box<dyn Error>> {
        for i in 0..steps {
            sim.step(config);
            let filename = format!("{}_frame_{:04}.png", prefix, i);
            self.export_density_png(sim, config, &output_dir.join(filename))?;
        }
        Ok(())
    }
}
