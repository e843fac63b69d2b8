// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action bindings: route each gesture's notifications to one listener by name.
//!
//! [`ActionBindings`] is itself a [`GestureListener`]. Add it to a
//! [`GestureArbiter`](crate::arbiter::GestureArbiter) and bind one listener per
//! gesture name; records of unbound gestures are dropped.
//!
//! ```
//! use understory_gesture::arbiter::GestureListener;
//! use understory_gesture::bindings::ActionBindings;
//! use understory_gesture::types::GestureRecord;
//!
//! #[derive(Debug)]
//! struct OpenMenu;
//! impl GestureListener for OpenMenu {
//!     fn on_gesture_completed(&mut self, _: &GestureRecord) {}
//! }
//!
//! let mut bindings = ActionBindings::new();
//! assert!(bindings.bind("tap", OpenMenu).is_none());
//! assert!(bindings.is_bound("tap"));
//! // Binding again replaces the previous listener.
//! assert!(bindings.bind("tap", OpenMenu).is_some());
//! assert_eq!(bindings.len(), 1);
//! ```

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use tracing::trace;

use crate::arbiter::GestureListener;
use crate::types::GestureRecord;

/// Dispatcher holding at most one listener per gesture name.
#[derive(Default)]
pub struct ActionBindings {
    bindings: BTreeMap<String, Box<dyn GestureListener>>,
}

impl core::fmt::Debug for ActionBindings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionBindings")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ActionBindings {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `listener` to the gesture called `name`, returning the listener it replaces.
    pub fn bind<L: GestureListener + 'static>(
        &mut self,
        name: impl Into<String>,
        listener: L,
    ) -> Option<Box<dyn GestureListener>> {
        let name = name.into();
        trace!(%name, "action bound");
        self.bindings.insert(name, Box::new(listener))
    }

    /// Remove the listener bound to `name`.
    pub fn unbind(&mut self, name: &str) -> Option<Box<dyn GestureListener>> {
        trace!(name, "action unbound");
        self.bindings.remove(name)
    }

    /// Whether a listener is bound to `name`.
    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bound gestures.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drop every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    fn bound(&mut self, record: &GestureRecord) -> Option<&mut (dyn GestureListener + 'static)> {
        self.bindings.get_mut(record.name.as_str()).map(|l| &mut **l)
    }
}

impl GestureListener for ActionBindings {
    fn on_gesture_started(&mut self, record: &GestureRecord) {
        if let Some(l) = self.bound(record) {
            l.on_gesture_started(record);
        }
    }

    fn on_gesture_in_progress(&mut self, record: &GestureRecord) {
        if let Some(l) = self.bound(record) {
            l.on_gesture_in_progress(record);
        }
    }

    fn on_gesture_completed(&mut self, record: &GestureRecord) {
        if let Some(l) = self.bound(record) {
            l.on_gesture_completed(record);
        }
    }
}
