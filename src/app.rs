//! Desktop driver: pointer input, per-frame tick, egui canvas.

use eframe::egui;
use glam::Vec2;

use crate::config::{self, Config};
use crate::render::{self, PixelBuffer};
use crate::sim::FluidSim;

/// Drag delta in pixels to cell velocity per tick.
const VELOCITY_SCALE: f32 = 0.6;
/// Injection splat radius in cells around the pointer cell.
const SPLAT_RADIUS: i32 = 2;

/// Latest pointer sample. Input handlers only record here; the driver
/// consumes the record exactly once per tick, so the last write before the
/// tick wins.
#[derive(Debug, Clone, Copy, Default)]
struct InputState {
    current: Option<egui::Pos2>,
    last: Option<egui::Pos2>,
}

impl InputState {
    fn record(&mut self, pos: egui::Pos2) {
        self.current = Some(pos);
    }

    fn release(&mut self) {
        self.current = None;
        self.last = None;
    }

    fn take_sample(&mut self) -> Option<(egui::Pos2, egui::Vec2)> {
        let pos = self.current?;
        let delta = self.last.map_or(egui::Vec2::ZERO, |l| pos - l);
        self.last = Some(pos);
        Some((pos, delta))
    }
}

pub struct TrailApp {
    sim: FluidSim,
    config: Config,
    input: InputState,
    buffer: PixelBuffer,
    texture: Option<egui::TextureHandle>,
    canvas_size: egui::Vec2,
    paused: bool,
    frame_count: usize,
}

impl TrailApp {
    pub fn new(cc: &eframe::CreationContext<'_>, width: f32, height: f32, cell_size: f32) -> Self {
        let config = cc
            .storage
            .and_then(|s| eframe::get_value(s, eframe::APP_KEY))
            .unwrap_or_default();
        Self {
            sim: FluidSim::new(width, height, cell_size),
            config,
            input: InputState::default(),
            buffer: PixelBuffer::new(width as usize, height as usize),
            texture: None,
            canvas_size: egui::vec2(width, height),
            paused: false,
            frame_count: 0,
        }
    }

    /// Injects the consumed pointer sample: dye around the pointer cell
    /// and momentum along the drag delta. Cells outside the interior are
    /// dropped by the injection bounds rule.
    fn inject(&mut self, pos: egui::Pos2, delta: egui::Vec2, origin: egui::Pos2) {
        let cs = self.sim.cell_size();
        let cell_x = ((pos.x - origin.x) / cs).floor() as i32;
        let cell_y = ((pos.y - origin.y) / cs).floor() as i32;
        let velocity = Vec2::new(delta.x, delta.y) * VELOCITY_SCALE / cs;
        let r_sq = (SPLAT_RADIUS * SPLAT_RADIUS) as f32;

        for dy in -SPLAT_RADIUS..=SPLAT_RADIUS {
            for dx in -SPLAT_RADIUS..=SPLAT_RADIUS {
                let dist_sq = (dx * dx + dy * dy) as f32;
                if dist_sq > r_sq {
                    continue;
                }
                let x = cell_x + dx;
                let y = cell_y + dy;
                if x < 0 || y < 0 {
                    continue;
                }
                let falloff = 1.0 - dist_sq / (r_sq + 1.0);
                self.sim
                    .add_density(x as usize, y as usize, self.config.density_amount * falloff);
                self.sim
                    .add_velocity(x as usize, y as usize, velocity * falloff);
            }
        }
    }

    fn color_image(&self) -> egui::ColorImage {
        let mut pixels = Vec::with_capacity(self.buffer.width * self.buffer.height);
        for y in 0..self.buffer.height {
            for x in 0..self.buffer.width {
                let [r, g, b, a] = self.buffer.pixel(x, y);
                pixels.push(egui::Color32::from_rgba_unmultiplied(
                    (r.clamp(0.0, 1.0) * 255.0) as u8,
                    (g.clamp(0.0, 1.0) * 255.0) as u8,
                    (b.clamp(0.0, 1.0) * 255.0) as u8,
                    (a.clamp(0.0, 1.0) * 255.0) as u8,
                ));
            }
        }
        egui::ColorImage {
            size: [self.buffer.width, self.buffer.height],
            pixels,
        }
    }
}

impl eframe::App for TrailApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.config);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("fluidtrail");
                if ui.button(if self.paused { "Resume" } else { "Pause" }).clicked() {
                    self.paused = !self.paused;
                }
                if ui.button("Clear").clicked() {
                    let size = self.canvas_size;
                    self.sim.resize(size.x, size.y);
                }
                ui.label(format!(
                    "Frame {} | {}x{} cells",
                    self.frame_count, self.sim.grid.n, self.sim.grid.n
                ));
            });

            ui.horizontal(|ui| {
                ui.add(
                    egui::Slider::new(&mut self.config.density_amount, config::DENSITY_AMOUNT_RANGE)
                        .text("Density"),
                );
                ui.add(
                    egui::Slider::new(&mut self.config.viscosity, config::VISCOSITY_RANGE)
                        .logarithmic(true)
                        .text("Viscosity"),
                );
                ui.add(
                    egui::Slider::new(&mut self.config.diffusion, config::DIFFUSION_RANGE)
                        .logarithmic(true)
                        .text("Diffusion"),
                );
            });
            ui.horizontal(|ui| {
                ui.add(
                    egui::Slider::new(&mut self.config.color_intensity, config::COLOR_INTENSITY_RANGE)
                        .text("Intensity"),
                );
                ui.add(
                    egui::Slider::new(&mut self.config.decay_rate, config::DECAY_RATE_RANGE)
                        .text("Decay"),
                );
            });

            ui.separator();

            let available = ui.available_size();
            let canvas = egui::vec2(available.x.max(1.0), available.y.max(1.0));
            let (rect, response) =
                ui.allocate_exact_size(canvas, egui::Sense::click_and_drag());

            // Destructive resize, serialized with step/draw on this thread.
            if (canvas.x - self.canvas_size.x).abs() > 0.5
                || (canvas.y - self.canvas_size.y).abs() > 0.5
            {
                self.canvas_size = canvas;
                self.sim.resize(canvas.x, canvas.y);
                self.buffer = PixelBuffer::new(canvas.x as usize, canvas.y as usize);
                self.texture = None;
            }

            if response.dragged() || response.is_pointer_button_down_on() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.input.record(pos);
                }
            } else {
                self.input.release();
            }

            if !self.paused {
                if let Some((pos, delta)) = self.input.take_sample() {
                    self.inject(pos, delta, rect.min);
                }
                self.sim.step(&self.config);
                self.frame_count += 1;
            }

            self.buffer.clear();
            render::draw(&self.sim.grid, &self.config, &mut self.buffer);

            let image = self.color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ctx.load_texture("trail", image, egui::TextureOptions::NEAREST))
                }
            }
            if let Some(texture) = &self.texture {
                ui.painter().image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
        });

        ctx.request_repaint();
    }
}
