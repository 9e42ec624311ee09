use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fluidtrail::render::{self, PixelBuffer};
use fluidtrail::{Config, FluidSim};

fn benchmark_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    for size in [50usize, 100, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let config = Config::default();
            let mut sim = FluidSim::new((size * 10) as f32, (size * 10) as f32, 10.0);

            sim.add_density(size / 2, size / 2, config.density_amount);
            sim.add_velocity(size / 2, size / 2, glam::Vec2::new(2.0, 0.0));

            b.iter(|| {
                black_box(sim.step(&config));
            });
        });
    }
    group.finish();
}

fn benchmark_draw(c: &mut Criterion) {
    let config = Config::default();
    let mut sim = FluidSim::new(500.0, 500.0, 10.0);
    sim.add_density(25, 25, 300.0);
    for _ in 0..5 {
        sim.step(&config);
    }

    let mut buffer = PixelBuffer::new(500, 500);
    c.bench_function("draw_500px", |b| {
        b.iter(|| {
            buffer.clear();
            render::draw(black_box(&sim.grid), &config, &mut buffer);
        });
    });
}

criterion_group!(benches, benchmark_step, benchmark_draw);
criterion_main!(benches);
