// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sensor thread feeding frames while the main thread rebinds actions.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_threads`

use std::sync::{Arc, Mutex};
use std::thread;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_gesture::arbiter::GestureListener;
use understory_gesture::bindings::ActionBindings;
use understory_gesture::gestures::TapGesture;
use understory_gesture::sync::SharedArbiter;
use understory_gesture::types::{GestureRecord, HandId, HandSample};

struct Say(&'static str);

impl GestureListener for Say {
    fn on_gesture_completed(&mut self, r: &GestureRecord) {
        println!("{}: {}", r.name, self.0);
    }
}

fn tap_frames(x: f64) -> [Vec<HandSample>; 4] {
    let down = HandSample::new(HandId(1), Point::new(x, 100.0), true);
    let up = HandSample {
        touching: false,
        ..down
    };
    [vec![down], vec![up], vec![], vec![]]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let arbiter = SharedArbiter::default();
    let bindings = Arc::new(Mutex::new(ActionBindings::new()));
    bindings.lock().unwrap().bind("tap", Say("open"));

    arbiter.register_gesture(TapGesture::default());
    arbiter.add_listener(Arc::clone(&bindings));
    arbiter.start();

    let sensor = arbiter.clone();
    thread::spawn(move || {
        for f in tap_frames(10.0) {
            sensor.on_frame(&f);
        }
    })
    .join()
    .unwrap();

    // Rebind from this thread, then let the sensor tap again.
    bindings.lock().unwrap().bind("tap", Say("close"));
    let sensor = arbiter.clone();
    thread::spawn(move || {
        for f in tap_frames(20.0) {
            sensor.on_frame(&f);
        }
    })
    .join()
    .unwrap();

    arbiter.dispose();
}
