//! Engine throughput benchmarks
//!
//! Comparing:
//! - Serial vs. parallel per-particle force sweep, across particle counts
//! - Cutoff-based spring construction cost as particle count grows

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use biospring::config::Configuration;
use biospring::engine::Engine;
use biospring::topology::Topology;
use biospring::vector::Vec3;

/// Particles on a cubic lattice with unit spacing, fully cross-linked
/// below `cutoff` so every particle has several neighbors to force
/// against.
fn lattice_topology(particle_count: usize, cutoff: f32) -> Topology {
    let mut topology = Topology::new(0);
    let side = (particle_count as f64).cbrt().ceil() as usize;
    let mut placed = 0;
    'fill: for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                if placed == particle_count {
                    break 'fill;
                }
                let position = Vec3::new(x as f32, y as f32, z as f32);
                topology.add_particle(format!("P{placed}"), position);
                placed += 1;
            }
        }
    }
    topology.add_springs_from_cutoff(cutoff, 1.0);
    topology
}

fn engine_with(particle_count: usize, parallel: bool) -> Engine {
    let mut config = Configuration::default();
    config.simulation.enable_parallel_forces = parallel;
    config.steric.enable = true;
    config.coulomb.enable = true;
    let topology = lattice_topology(particle_count, 1.8);
    Engine::setup(config, topology, None, None).expect("valid benchmark configuration")
}

fn bench_compute_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_step");

    for particle_count in [64usize, 216, 512].iter() {
        group.bench_with_input(
            BenchmarkId::new("serial", particle_count),
            particle_count,
            |b, &count| {
                let mut engine = engine_with(count, false);
                b.iter(|| {
                    engine.compute_step().expect("step should not error");
                    black_box(engine.energies());
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", particle_count),
            particle_count,
            |b, &count| {
                let mut engine = engine_with(count, true);
                b.iter(|| {
                    engine.compute_step().expect("step should not error");
                    black_box(engine.energies());
                });
            },
        );
    }

    group.finish();
}

fn bench_cutoff_spring_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("cutoff_spring_construction");

    for particle_count in [100usize, 500, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("add_springs_from_cutoff", particle_count),
            particle_count,
            |b, &count| {
                b.iter_batched(
                    || {
                        let mut topology = Topology::new(0);
                        for i in 0..count {
                            topology.add_particle(
                                format!("P{i}"),
                                Vec3::new(i as f32, 0.0, 0.0),
                            );
                        }
                        topology
                    },
                    |mut topology| {
                        black_box(topology.add_springs_from_cutoff(5.0, 1.0));
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_step, bench_cutoff_spring_construction);
criterion_main!(benches);
