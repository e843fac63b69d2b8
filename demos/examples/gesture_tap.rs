// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single tap, frame by frame.
//!
//! Prints the detector state after each frame and the completion record.
//! Set `RUST_LOG=understory_gesture=debug` to also see the arbiter's own log.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_tap`

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_gesture::arbiter::{GestureArbiter, GestureListener};
use understory_gesture::gestures::TapGesture;
use understory_gesture::types::{DataKey, GestureRecord, HandId, HandSample};

struct PrintCompleted;

impl GestureListener for PrintCompleted {
    fn on_gesture_completed(&mut self, record: &GestureRecord) {
        println!(
            "  -> {} completed at {:?} (touched at {:?})",
            record.name,
            record.hands.first().map(|h| h.position),
            record.data.point(DataKey::InitialPosition),
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut arbiter = GestureArbiter::new();
    let tap = arbiter.register_gesture(TapGesture::default());
    arbiter.add_listener(PrintCompleted);
    arbiter.start();

    let down = HandSample::new(HandId(1), Point::new(320.0, 180.0), true);
    let up = HandSample {
        touching: false,
        position: Point::new(321.0, 181.0),
        ..down
    };
    let frames: [&[HandSample]; 4] = [&[down], &[up], &[], &[]];

    for (i, hands) in frames.into_iter().enumerate() {
        arbiter.on_frame(hands);
        let state = arbiter.detector(tap).map(|d| d.state()).unwrap_or_default();
        println!("frame {i}: {} hand(s), tap is {state}", hands.len());
    }
}
