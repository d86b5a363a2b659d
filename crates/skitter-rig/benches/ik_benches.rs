//! Benchmarks for chain solving and full body updates.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;
use skitter_rig::{Body, Chain, Ik, MoveIntent, solve_chain};

fn bench_solve_chain(c: &mut Criterion) {
    c.bench_function("solve_chain_4_joints", |b| {
        let ik = Ik::default();
        let mut chain = Chain::column(Vec3::ZERO, 4, 0.75).unwrap();
        let mut flip = false;
        b.iter(|| {
            // Alternate targets so the early exit never hides the solve.
            flip = !flip;
            let target = if flip {
                Vec3::new(1.2, 0.0, 0.4)
            } else {
                Vec3::new(0.4, 0.0, 1.2)
            };
            solve_chain(
                &mut chain,
                Vec3::new(0.0, 2.0, 0.0),
                target,
                Vec3::new(0.5, 1.5, 0.5),
                &ik,
            );
            black_box(&chain);
        })
    });
}

fn bench_body_update(c: &mut Criterion) {
    c.bench_function("body_update_8_legs", |b| {
        let mut body = Body::new(Vec3::new(0.0, 1.0, 0.0));
        let intent = MoveIntent {
            forward: true,
            ..Default::default()
        };
        b.iter(|| {
            body.update(1.0 / 60.0, intent);
            black_box(&body);
        })
    });
}

criterion_group!(benches, bench_solve_chain, bench_body_update);
criterion_main!(benches);
