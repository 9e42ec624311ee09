use std::path::Path;

use fluidtrail::{Config, FluidSim, ImageExporter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "test" {
        run_headless_test()?;
    } else {
        run_gui_app();
    }

    Ok(())
}

fn run_headless_test() -> Result<(), Box<dyn std::error::Error>> {
    println!("Running headless fluid trail test...");

    let config = Config::default();
    let mut sim = FluidSim::new(500.0, 500.0, 10.0);
    let mut exporter = ImageExporter::new(500, 500);

    // Scatter droplets with a rightward push
    let n = sim.grid.n;
    for _ in 0..8 {
        let x = 1 + rand::random::<usize>() % (n - 2);
        let y = 1 + rand::random::<usize>() % (n - 2);
        sim.add_density(x, y, config.density_amount);
        sim.add_velocity(x, y, glam::Vec2::new(1.5, 0.0));
    }

    exporter.export_density_png(&sim, &config, Path::new("trail_frame_0000.png"))?;

    for frame in 1..=20 {
        sim.step(&config);
        let path = format!("trail_frame_{:04}.png", frame);
        exporter.export_density_png(&sim, &config, Path::new(&path))?;

        if frame % 5 == 0 {
            let total: f32 = sim.grid.density.iter().sum();
            println!("frame {frame}: total density {total:.3}");
        }
    }

    println!("Test completed! Generated 21 frames.");
    Ok(())
}

fn run_gui_app() {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 800.0])
            .with_title("fluidtrail - pointer-driven fluid trail"),
        ..Default::default()
    };

    eframe::run_native(
        "fluidtrail",
        options,
        Box::new(|cc| Box::new(fluidtrail::TrailApp::new(cc, 800.0, 800.0, 10.0))),
    )
    .unwrap();
}
