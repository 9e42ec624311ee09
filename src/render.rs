//! Density-to-pixel compositing.

use image::RgbaImage;

use crate::color::ColorRamp;
use crate::config::Config;
use crate::grid::Grid;

/// Cells at or below this density are skipped entirely.
pub const DENSITY_FLOOR: f32 = 0.005;
/// Density value mapped to the top of the color ramp.
pub const DENSITY_SCALE: f32 = 80.0;

/// Straight-alpha RGBA pixel buffer the trail is composited into. The
/// buffer outlives individual frames; the driver clears or keeps its
/// contents between draws.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<[f32; 4]>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    pub fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        self.pixels[x + y * self.width]
    }

    /// Source-over blend of `rgba` onto one pixel. A fully transparent
    /// result leaves the pixel unchanged.
    pub fn blend(&mut self, x: usize, y: usize, rgba: [f32; 4]) {
        let px = &mut self.pixels[x + y * self.width];
        let a = rgba[3];
        let existing = px[3];
        let out_a = a + existing * (1.0 - a);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            px[c] = (rgba[c] * a + px[c] * existing * (1.0 - a)) / out_a;
        }
        px[3] = out_a;
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width as u32, self.height as u32);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let src = self.pixels[x as usize + y as usize * self.width];
            *pixel = image::Rgba(src.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
        }
        img
    }
}

/// Composites the density field into `buffer`: every cell above the
/// density floor paints a `cell_size` square block at its screen position,
/// colored through the ramp regenerated from `config.color_intensity`.
pub fn draw(grid: &Grid, config: &Config, buffer: &mut PixelBuffer) {
    let ramp = ColorRamp::trail(config.color_intensity);
    let cs = grid.cell_size;
    for cy in 0..grid.n {
        let y0 = (cy as f32 * cs) as usize;
        if y0 >= buffer.height {
            break;
        }
        let y1 = (((cy + 1) as f32 * cs) as usize).min(buffer.height);
        for cx in 0..grid.n {
            let x0 = (cx as f32 * cs) as usize;
            if x0 >= buffer.width {
                break;
            }
            let density = grid.density[cx + cy * grid.n];
            if density <= DENSITY_FLOOR {
                continue;
            }
            let rgba = ramp.sample((density / DENSITY_SCALE).min(1.0));
            let x1 = (((cx + 1) as f32 * cs) as usize).min(buffer.width);
            for py in y0..y1 {
                for px in x0..x1 {
                    buffer.blend(px, py, rgba);
                }
            }
        }
    }
}
