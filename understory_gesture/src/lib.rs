// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: frame-driven hand gesture recognition with single-owner arbitration.
//!
//! ## Overview
//!
//! A sensor reports, once per frame, the hands it tracks on a virtual touch screen as
//! [`HandSample`](crate::types::HandSample)s. Each gesture is a small state machine (a
//! [`GestureDetector`](crate::detector::GestureDetector)) fed those frames, and a
//! [`GestureArbiter`](crate::arbiter::GestureArbiter) decides which detector owns the
//! physical motion and tells [`GestureListener`](crate::arbiter::GestureListener)s
//! when a gesture starts, progresses, and completes.
//!
//! This crate does no 3D geometry: whether a hand is touching comes from the sensor side.
//!
//! ## Built-in gestures
//!
//! - [`TapGesture`](crate::gestures::TapGesture): one hand touches and lifts.
//! - [`PanGesture`](crate::gestures::PanGesture): one hand drags past a threshold in an
//!   allowed direction.
//! - [`ZoomGesture`](crate::gestures::ZoomGesture): two hands pinch or spread.
//!
//! Custom gestures implement [`GestureDetector`](crate::detector::GestureDetector), usually
//! holding a [`SingleHandTracker`](crate::tracking::SingleHandTracker) or
//! [`DualHandTracker`](crate::tracking::DualHandTracker) for hand continuity.
//!
//! ## Lifecycle
//!
//! Every detector walks `NotDetected → PossibleDetection → InProgress → Completed`
//! and back to `NotDetected`, and may fall back to `NotDetected` early. The arbiter
//! checks each reported transition against that graph and panics on a detector bug.
//!
//! Live gestures report start and progress; non-live gestures only report completion.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::arbiter::{GestureArbiter, GestureListener};
//! use understory_gesture::bindings::ActionBindings;
//! use understory_gesture::gestures::{PanConfig, PanDirections, PanGesture};
//! use understory_gesture::types::{DataKey, GestureRecord, HandId, HandSample};
//!
//! #[derive(Debug)]
//! struct Scroll;
//! impl GestureListener for Scroll {
//!     fn on_gesture_started(&mut self, record: &GestureRecord) {
//!         assert!(record.has_data(DataKey::InitialPosition));
//!     }
//! }
//!
//! let swipe = PanGesture::new(
//!     "swipe-right",
//!     PanConfig {
//!         directions: PanDirections::RIGHT,
//!         ..PanConfig::default()
//!     },
//! )
//! .unwrap();
//!
//! let mut bindings = ActionBindings::new();
//! bindings.bind("swipe-right", Scroll);
//!
//! let mut arbiter = GestureArbiter::new();
//! arbiter.register_gesture(swipe);
//! arbiter.add_listener(bindings);
//! arbiter.start();
//!
//! // The sensor faces the user, so moving right decreases x.
//! for x in [200.0, 180.0, 150.0, 120.0] {
//!     arbiter.on_frame(&[HandSample::new(HandId(1), Point::new(x, 0.0), true)]);
//! }
//! assert!(arbiter.owner().is_some());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo and enables [`sync`](crate::sync) for sharing
//!   one arbiter between threads.
//! - `libm`: `no_std` float support through Kurbo.
//! - `serde`: serialization of configurations and frame types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod arbiter;
pub mod bindings;
pub mod detector;
pub mod error;
pub mod frame;
pub mod gestures;
#[cfg(feature = "std")]
pub mod sync;
pub mod tracking;
pub mod types;

pub use arbiter::{DetectorId, GestureArbiter, GestureListener, ListenerId};
pub use detector::GestureDetector;
pub use error::{ConfigError, IllegalTransition};
pub use types::{GestureRecord, GestureState, HandId, HandSample};
