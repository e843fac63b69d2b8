// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sharing one arbiter between the sensor thread and the rest of the application.
//!
//! Frames arrive on one thread while registration and binding changes usually come
//! from another. [`SharedArbiter`] wraps the arbiter in a mutex so each call is
//! serialized against frame processing.
//!
//! A poisoned lock is recovered. The arbiter settles ownership and resets for a frame
//! before any listener runs, so a panic inside a listener leaves it consistent.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::arbiter::{DetectorId, GestureArbiter, GestureListener, ListenerId};
use crate::detector::GestureDetector;
use crate::frame::HandFrameSink;
use crate::types::{GestureRecord, HandSample};

/// Cloneable, thread-safe handle to a [`GestureArbiter`].
#[derive(Clone, Debug, Default)]
pub struct SharedArbiter {
    inner: Arc<Mutex<GestureArbiter>>,
}

impl SharedArbiter {
    /// Wrap an arbiter.
    pub fn new(arbiter: GestureArbiter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(arbiter)),
        }
    }

    /// Lock the arbiter for several operations at once.
    pub fn lock(&self) -> MutexGuard<'_, GestureArbiter> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the arbiter.
    pub fn with<R>(&self, f: impl FnOnce(&mut GestureArbiter) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`GestureArbiter::on_frame`].
    pub fn on_frame(&self, hands: &[HandSample]) {
        self.lock().on_frame(hands);
    }

    /// See [`GestureArbiter::register_gesture`].
    pub fn register_gesture<D: GestureDetector + 'static>(&self, detector: D) -> DetectorId {
        self.lock().register_gesture(detector)
    }

    /// See [`GestureArbiter::register_gestures`].
    pub fn register_gestures<I>(&self, detectors: I) -> Vec<DetectorId>
    where
        I: IntoIterator<Item = Box<dyn GestureDetector>>,
    {
        self.lock().register_gestures(detectors)
    }

    /// See [`GestureArbiter::unregister_gesture`].
    pub fn unregister_gesture(&self, id: DetectorId) -> Option<Box<dyn GestureDetector>> {
        self.lock().unregister_gesture(id)
    }

    /// See [`GestureArbiter::unregister_all_gestures`].
    pub fn unregister_all_gestures(&self) {
        self.lock().unregister_all_gestures();
    }

    /// See [`GestureArbiter::add_listener`].
    pub fn add_listener<L: GestureListener + 'static>(&self, listener: L) -> ListenerId {
        self.lock().add_listener(listener)
    }

    /// See [`GestureArbiter::remove_listener`].
    pub fn remove_listener(&self, id: ListenerId) -> Option<Box<dyn GestureListener>> {
        self.lock().remove_listener(id)
    }

    /// See [`GestureArbiter::start`].
    pub fn start(&self) {
        self.lock().start();
    }

    /// See [`GestureArbiter::stop`].
    pub fn stop(&self) {
        self.lock().stop();
    }

    /// See [`GestureArbiter::dispose`].
    pub fn dispose(&self) {
        self.lock().dispose();
    }
}

impl From<GestureArbiter> for SharedArbiter {
    fn from(arbiter: GestureArbiter) -> Self {
        Self::new(arbiter)
    }
}

impl HandFrameSink for SharedArbiter {
    fn on_frame(&mut self, hands: &[HandSample]) {
        Self::on_frame(self, hands);
    }
}

/// A listener behind a shared mutex, so the application can keep a handle to it
/// (for example to rebind [`ActionBindings`](crate::bindings::ActionBindings)).
impl<L: GestureListener> GestureListener for Arc<Mutex<L>> {
    fn on_gesture_started(&mut self, record: &GestureRecord) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_gesture_started(record);
    }

    fn on_gesture_in_progress(&mut self, record: &GestureRecord) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_gesture_in_progress(record);
    }

    fn on_gesture_completed(&mut self, record: &GestureRecord) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_gesture_completed(record);
    }
}
