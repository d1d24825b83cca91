#![warn(clippy::all)]

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::sync::atomic::AtomicUsize;

use voxtrace::acceleration::Grid;
use voxtrace::demo::*;
use voxtrace::rng::*;
use voxtrace::*;

const NX: usize = 24;
const NY: usize = 16;

fn random(grid: Option<GridResolution>) -> (Scene, Camera) {
  let mut rng = RttRng::seed_from_u64(0);
  match random_scene(NX as f64 / NY as f64, grid, &mut rng) {
    Ok(v) => v,
    Err(e) => panic!("random scene: {}", e),
  }
}

pub fn criterion_benchmark(c: &mut Criterion) {
  let options = RenderOptions {
    width: NX,
    height: NY,
    samples: 1,
    seed: 0,
  };
  for (name, grid) in &[
    ("render/random/brute-force", None),
    ("render/random/grid-auto", Some(GridResolution::Auto)),
  ] {
    let (scene, camera) = random(*grid);
    let tracer = RayTracer::new(&scene);
    // render returns a large Vec (the image), so use iter_batched to deal with the
    // memory drop.
    c.bench_function(name, |b| {
      b.iter_batched(
        || AtomicUsize::new(0),
        |progress| render(&tracer, &camera, &options, &progress),
        BatchSize::SmallInput,
      )
    });
  }

  c.bench_function("grid/build/random", |b| {
    b.iter_batched(
      || random(None).0,
      |mut scene| scene.geometries.build_grid(Grid::auto_resolution(scene.geometries.len())),
      BatchSize::LargeInput,
    )
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
