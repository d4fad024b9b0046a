//! Per-frame cost of the pulsation tick and of building the scene.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pulsing_spheres::{Options, Scene};

fn options(count: u32) -> Options {
    let mut options = Options::default();
    options.scene.sampler_count = count;
    options.scene.seed = Some(1);
    options
}

fn tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    for count in [1_000, 5_000, 20_000] {
        let Ok(mut scene) = Scene::build(&options(count)) else {
            continue;
        };
        let _ = group.bench_function(format!("{count}_spheres"), |b| {
            b.iter(|| {
                scene.advance(black_box(1.0 / 60.0));
                black_box(scene.animator().instances().len())
            });
        });
    }
    group.finish();
}

fn build_benchmark(c: &mut Criterion) {
    let options = options(5_000);
    let _ = c.bench_function("build_5000_spheres", |b| {
        b.iter(|| black_box(Scene::build(black_box(&options)).is_ok()));
    });
}

criterion_group!(benches, tick_benchmark, build_benchmark);
criterion_main!(benches);
