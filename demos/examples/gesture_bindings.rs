// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap, pan and zoom competing for the same hands, with actions bound by name.
//!
//! The zoom wins the two-hand spread and the tap is reset on that frame; once the
//! zoom completes, a right swipe is picked up by the pan.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_bindings`

use kurbo::Point;
use understory_gesture::arbiter::{GestureArbiter, GestureListener};
use understory_gesture::bindings::ActionBindings;
use understory_gesture::gestures::{
    PanConfig, PanDirections, PanGesture, TapGesture, ZoomConfig, ZoomDirection, ZoomGesture,
};
use understory_gesture::types::{DataKey, GestureRecord, HandId, HandSample};

struct Zoomer;

impl GestureListener for Zoomer {
    fn on_gesture_started(&mut self, r: &GestureRecord) {
        println!("zoom started around {:?}", r.data.point(DataKey::StartPoint));
    }
    fn on_gesture_in_progress(&mut self, r: &GestureRecord) {
        let (Some(start), Some(now)) = (
            r.data.distance(DataKey::InitialDistance),
            r.data.distance(DataKey::CurrentDistance),
        ) else {
            return;
        };
        println!("zoom factor {:.2}", now / start);
    }
    fn on_gesture_completed(&mut self, _: &GestureRecord) {
        println!("zoom done");
    }
}

struct NextPage;

impl GestureListener for NextPage {
    fn on_gesture_completed(&mut self, r: &GestureRecord) {
        println!("next page (swipe from {:?})", r.data.point(DataKey::InitialPosition));
    }
}

fn hand(id: u32, x: f64, y: f64, touching: bool) -> HandSample {
    HandSample::new(HandId(id), Point::new(x, y), touching)
}

fn main() {
    let mut arbiter = GestureArbiter::new();
    arbiter.register_gesture(TapGesture::default());
    arbiter.register_gesture(
        PanGesture::new(
            "swipe-right",
            PanConfig {
                directions: PanDirections::RIGHT,
                ..PanConfig::default()
            },
        )
        .expect("valid pan thresholds"),
    );
    arbiter.register_gesture(
        ZoomGesture::new(
            "zoom",
            ZoomConfig {
                direction: ZoomDirection::Both,
                ..ZoomConfig::default()
            },
        )
        .expect("valid zoom thresholds"),
    );

    let mut bindings = ActionBindings::new();
    bindings.bind("zoom", Zoomer);
    bindings.bind("swipe-right", NextPage);
    arbiter.add_listener(bindings);
    arbiter.start();

    let mut frames: Vec<Vec<HandSample>> = Vec::new();
    // Two hands spreading apart.
    for gap in [100.0, 120.0, 150.0, 180.0, 210.0] {
        frames.push(vec![hand(1, 400.0, 300.0, true), hand(2, 400.0 + gap, 300.0, true)]);
    }
    frames.push(vec![hand(1, 400.0, 300.0, false), hand(2, 610.0, 300.0, false)]);
    frames.push(vec![]);
    // One hand swiping right (decreasing x, the sensor faces the user).
    for step in 0..6 {
        frames.push(vec![hand(3, 500.0 - f64::from(step) * 15.0, 300.0, true)]);
    }
    frames.push(vec![hand(3, 410.0, 300.0, false)]);
    frames.push(vec![]);

    for f in &frames {
        arbiter.on_frame(f);
    }
    println!("{arbiter:?}");
}
