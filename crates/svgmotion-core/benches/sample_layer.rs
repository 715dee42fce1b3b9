use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use svgmotion_core::{resolve, AnimationProperties, Keyframe};

fn dense_keyframes(count: usize) -> Vec<Keyframe> {
    (0..count)
        .map(|i| {
            let mut properties = AnimationProperties::new();
            properties.set("opacity", i as f64 / count as f64);
            properties.set("translateX", i as f64 * 4.0);
            properties.set("fill", if i % 2 == 0 { "#204080" } else { "#80a0ff" });
            Keyframe {
                id: format!("k{i}"),
                time: i as f64 * 250.0,
                properties,
            }
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let keyframes = dense_keyframes(24);
    let base = AnimationProperties::new();

    c.bench_function("resolve_mid_clip", |b| {
        b.iter(|| resolve(black_box(&keyframes), black_box(&base), black_box(2_625.0)))
    });
    c.bench_function("resolve_clamped", |b| {
        b.iter(|| resolve(black_box(&keyframes), black_box(&base), black_box(90_000.0)))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
