//! Integrator and frame driver benchmarks
//!
//! - Raw RK4 steps over the gravitation field for growing body counts
//! - One full frame of the built-in scenarios (250 steps plus trail sampling)
//! - Work-precision: closure error of a circular orbit for several step counts,
//!   reported as durations scaled by 1e9 so Criterion can plot them

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

extern crate cycler;
use cycler::physics::gravitation::Gravitation;
use cycler::physics::integrators::{Integrator, RungeKuttaFourthOrder};
use cycler::physics::math::{PI, Scalar, Vector};
use cycler::physics::state::StateVector;
use cycler::scenario::ScenarioCatalog;
use cycler::simulation::{FrameSettings, Simulation};

/// Bodies on a ring with unit masses, moving tangentially
fn ring_of_bodies(count: usize) -> (StateVector, Vec<Scalar>) {
    let state = StateVector::from_bodies((0..count).map(|i| {
        let angle = i as Scalar * 2.0 * PI / count as Scalar;
        let direction = Vector::new(libm::cos(angle), libm::sin(angle));
        (direction * 10.0, direction.perp() * 0.3)
    }));

    (state, vec![1.0; count])
}

fn bench_rk4_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("rk4_step");

    for &body_count in &[2, 4, 8, 16, 32, 64] {
        group.throughput(Throughput::Elements(body_count as u64));

        group.bench_with_input(
            BenchmarkId::new("gravitation", body_count),
            &body_count,
            |b, &count| {
                let (mut state, masses) = ring_of_bodies(count);
                let gravitation = Gravitation::new(&masses, 1.0);

                b.iter(|| {
                    RungeKuttaFourthOrder.step(state.as_mut_slice(), &gravitation, 1e-4);
                    black_box(&state);
                });
            },
        );
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_one_frame");

    for name in ScenarioCatalog::names() {
        group.bench_function(name, |b| {
            let scenario = ScenarioCatalog::get(name).unwrap();
            let mut simulation = Simulation::from_scenario(scenario, FrameSettings::default())
                .unwrap();

            b.iter(|| {
                if simulation.advance_one_frame(&mut ()).is_err() {
                    simulation.reset();
                }
                black_box(simulation.state());
            });
        });
    }

    group.finish();
}

fn bench_work_precision(c: &mut Criterion) {
    let mut group = c.benchmark_group("work_precision");
    group.sample_size(10);

    // Unit masses in a circular binary, G = 1, period 2π / sqrt(2)
    let masses = [1.0, 1.0];
    let gravitation = Gravitation::new(&masses, 1.0);
    let speed = libm::sqrt(2.0) / 2.0;
    let period = 2.0 * PI / libm::sqrt(2.0);

    for &steps in &[50usize, 100, 200, 400, 800] {
        group.bench_with_input(BenchmarkId::new("closure_error", steps), &steps, |b, &steps| {
            b.iter_custom(|iters| {
                let mut total_error = 0.0;

                for _ in 0..iters {
                    let mut state = StateVector::from_bodies([
                        (Vector::new(-0.5, 0.0), Vector::new(0.0, -speed)),
                        (Vector::new(0.5, 0.0), Vector::new(0.0, speed)),
                    ]);
                    let start = state.position(1);
                    let dt = period / steps as Scalar;

                    for _ in 0..steps {
                        RungeKuttaFourthOrder.step(state.as_mut_slice(), &gravitation, dt);
                    }

                    total_error += (state.position(1) - start).length();
                }

                let average_error = total_error / iters as Scalar;
                std::time::Duration::from_nanos((average_error * 1e9) as u64)
            });
        });
    }

    group.finish();
}

criterion_group!(performance, bench_rk4_step, bench_frame);
criterion_group!(precision, bench_work_precision);
criterion_main!(performance, precision);
