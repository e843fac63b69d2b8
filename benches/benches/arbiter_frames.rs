// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_gesture::GestureArbiter;
use understory_gesture::gestures::{PanConfig, PanGesture, TapGesture, ZoomConfig, ZoomGesture};
use understory_gesture::types::{HandId, HandSample};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Frames of up to `max_hands` hands wandering around a 1000x1000 screen,
/// touching and lifting at random.
fn gen_frames(count: usize, max_hands: u32, seed: u64) -> Vec<Vec<HandSample>> {
    let mut rng = Rng::new(seed);
    let mut hands: Vec<HandSample> = (0..max_hands)
        .map(|i| {
            HandSample::new(
                HandId(i),
                Point::new(rng.next_f64() * 1000.0, rng.next_f64() * 1000.0),
                false,
            )
        })
        .collect();
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        for h in &mut hands {
            h.position.x += (rng.next_f64() - 0.5) * 40.0;
            h.position.y += (rng.next_f64() - 0.5) * 40.0;
            if rng.next_f64() < 0.1 {
                h.touching = !h.touching;
            }
        }
        let visible = (rng.next_u64() % (u64::from(max_hands) + 1)) as usize;
        out.push(hands[..visible].to_vec());
    }
    out
}

/// One hand dragging steadily to the user's right, then lifting.
fn gen_swipe(len: usize) -> Vec<Vec<HandSample>> {
    let mut out: Vec<Vec<HandSample>> = (0..len)
        .map(|i| vec![HandSample::new(HandId(1), Point::new(900.0 - i as f64 * 5.0, 500.0), true)])
        .collect();
    out.push(vec![HandSample::new(HandId(1), Point::new(900.0 - len as f64 * 5.0, 500.0), false)]);
    out.push(vec![]);
    out
}

fn arbiter_with_builtins() -> GestureArbiter {
    let mut arbiter = GestureArbiter::new();
    arbiter.register_gesture(TapGesture::default());
    arbiter.register_gesture(PanGesture::new("pan", PanConfig::default()).unwrap());
    arbiter.register_gesture(ZoomGesture::new("zoom", ZoomConfig::default()).unwrap());
    arbiter.start();
    arbiter
}

fn bench_random_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("arbiter_random");
    for &hands in &[1u32, 2, 4] {
        let frames = gen_frames(1024, hands, 0xBADC_F00D_1234_5678 ^ u64::from(hands));
        group.throughput(Throughput::Elements(frames.len() as u64));
        group.bench_function(format!("builtins_hands{}", hands), |b| {
            b.iter_batched(
                arbiter_with_builtins,
                |mut arbiter| {
                    for f in &frames {
                        arbiter.on_frame(black_box(f));
                    }
                    black_box(arbiter.owner());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_swipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("arbiter_swipe");
    let frames = gen_swipe(200);
    group.throughput(Throughput::Elements(frames.len() as u64));
    group.bench_function("builtins", |b| {
        b.iter_batched(
            arbiter_with_builtins,
            |mut arbiter| {
                for f in &frames {
                    arbiter.on_frame(black_box(f));
                }
                black_box(arbiter.owner());
            },
            BatchSize::SmallInput,
        )
    });
    // Many competing pans that never reach the detection distance.
    let jitter = gen_frames(512, 1, 0xFACE_FEED_CAFE_BABE);
    group.bench_function("pans_x32_jitter", |b| {
        b.iter_batched(
            || {
                let mut arbiter = GestureArbiter::new();
                for i in 0..32 {
                    let config = PanConfig {
                        detection_distance: 10_000.0,
                        completion_distance: 10_000.0,
                        ..PanConfig::default()
                    };
                    arbiter.register_gesture(PanGesture::new(format!("pan{i}"), config).unwrap());
                }
                arbiter.start();
                arbiter
            },
            |mut arbiter| {
                for f in &jitter {
                    arbiter.on_frame(black_box(f));
                }
                black_box(arbiter.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_random_frames, bench_swipe);
criterion_main!(benches);
