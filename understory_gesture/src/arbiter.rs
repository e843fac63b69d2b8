// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration: feed frames to detectors, pick one owner, notify listeners.
//!
//! ## Ownership
//!
//! While no detector owns the frame, every registered detector is updated in
//! registration order. The first one to report [`GestureState::InProgress`]
//! becomes the owner: iteration stops there and every other detector is reset.
//! From then on only the owner is updated, until it reports a state other than
//! `InProgress` or `Completed`.
//!
//! ## Notifications
//!
//! After each detector update the old and new states pick the callback:
//!
//! | old | new | callback |
//! |---|---|---|
//! | `PossibleDetection` | `InProgress` | [`on_gesture_started`](GestureListener::on_gesture_started), live only |
//! | `InProgress` | `InProgress` | [`on_gesture_in_progress`](GestureListener::on_gesture_in_progress), live only |
//! | `InProgress` | `Completed` | [`on_gesture_completed`](GestureListener::on_gesture_completed) |
//!
//! Every other legal transition is silent. A transition outside the graph of
//! [`GestureState::can_transition_to`] is a detector bug and panics.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::arbiter::{GestureArbiter, GestureListener};
//! use understory_gesture::gestures::TapGesture;
//! use understory_gesture::types::{GestureRecord, HandId, HandSample};
//!
//! #[derive(Debug, Default)]
//! struct Printer;
//! impl GestureListener for Printer {
//!     fn on_gesture_completed(&mut self, record: &GestureRecord) {
//!         assert_eq!(record.name, "tap");
//!     }
//! }
//!
//! let mut arbiter = GestureArbiter::new();
//! arbiter.register_gesture(TapGesture::default());
//! arbiter.add_listener(Printer);
//! arbiter.start();
//!
//! let down = HandSample::new(HandId(1), Point::new(10.0, 10.0), true);
//! let up = HandSample { touching: false, ..down };
//! arbiter.on_frame(&[down]);
//! arbiter.on_frame(&[up]);
//! arbiter.on_frame(&[]);
//! assert!(arbiter.owner().is_some());
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::detector::GestureDetector;
use crate::types::{GestureRecord, GestureState, HandSample};

/// Receiver of gesture lifecycle notifications.
///
/// All methods default to doing nothing, so a listener only overrides what it needs.
pub trait GestureListener: Send {
    /// A live gesture was recognized this frame.
    fn on_gesture_started(&mut self, record: &GestureRecord) {
        let _ = record;
    }

    /// A live gesture is still ongoing.
    fn on_gesture_in_progress(&mut self, record: &GestureRecord) {
        let _ = record;
    }

    /// A gesture finished.
    fn on_gesture_completed(&mut self, record: &GestureRecord) {
        let _ = record;
    }
}

/// Handle of a detector registered with a [`GestureArbiter`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DetectorId(u32);

/// Handle of a listener added to a [`GestureArbiter`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ListenerId(u32);

/// Which callback a transition maps to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Notification {
    Started,
    InProgress,
    Completed,
}

impl Notification {
    fn for_transition(live: bool, old: GestureState, new: GestureState) -> Option<Self> {
        use GestureState as S;
        match (old, new) {
            (S::PossibleDetection, S::InProgress) if live => Some(Self::Started),
            (S::InProgress, S::InProgress) if live => Some(Self::InProgress),
            (S::InProgress, S::Completed) => Some(Self::Completed),
            _ => None,
        }
    }

    fn deliver(self, listener: &mut dyn GestureListener, record: &GestureRecord) {
        match self {
            Self::Started => listener.on_gesture_started(record),
            Self::InProgress => listener.on_gesture_in_progress(record),
            Self::Completed => listener.on_gesture_completed(record),
        }
    }
}

/// Owns a set of detectors and listeners and runs the per-frame arbitration.
///
/// A new arbiter is stopped; call [`start`](Self::start) before feeding frames.
#[derive(Default)]
pub struct GestureArbiter {
    detectors: Vec<(DetectorId, Box<dyn GestureDetector>)>,
    listeners: Vec<(ListenerId, Box<dyn GestureListener>)>,
    owner: Option<DetectorId>,
    running: bool,
    next_id: u32,
}

impl core::fmt::Debug for GestureArbiter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let detectors: Vec<(&DetectorId, &str, GestureState)> = self
            .detectors
            .iter()
            .map(|(id, d)| (id, d.name(), d.state()))
            .collect();
        f.debug_struct("GestureArbiter")
            .field("detectors", &detectors)
            .field("listeners", &self.listeners.len())
            .field("owner", &self.owner)
            .field("running", &self.running)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl GestureArbiter {
    /// Create a stopped arbiter with no detectors and no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Register a detector. It takes part in arbitration after those already registered.
    pub fn register_gesture<D: GestureDetector + 'static>(&mut self, detector: D) -> DetectorId {
        self.register_boxed(Box::new(detector))
    }

    /// Register an already boxed detector.
    pub fn register_boxed(&mut self, detector: Box<dyn GestureDetector>) -> DetectorId {
        let id = DetectorId(self.bump());
        trace!(?id, name = detector.name(), "gesture registered");
        self.detectors.push((id, detector));
        id
    }

    /// Register several detectors in iteration order.
    pub fn register_gestures<I>(&mut self, detectors: I) -> Vec<DetectorId>
    where
        I: IntoIterator<Item = Box<dyn GestureDetector>>,
    {
        detectors
            .into_iter()
            .map(|d| self.register_boxed(d))
            .collect()
    }

    /// Remove a detector, handing it back. Releases ownership if it was the owner.
    pub fn unregister_gesture(&mut self, id: DetectorId) -> Option<Box<dyn GestureDetector>> {
        let index = self.index_of(id)?;
        if self.owner == Some(id) {
            debug!(?id, "owner unregistered, ownership released");
            self.owner = None;
        }
        let (_, detector) = self.detectors.remove(index);
        trace!(?id, name = detector.name(), "gesture unregistered");
        Some(detector)
    }

    /// Remove several detectors. Unknown handles are skipped.
    pub fn unregister_gestures<I>(&mut self, ids: I) -> Vec<Box<dyn GestureDetector>>
    where
        I: IntoIterator<Item = DetectorId>,
    {
        ids.into_iter()
            .filter_map(|id| self.unregister_gesture(id))
            .collect()
    }

    /// Remove every detector and release ownership.
    pub fn unregister_all_gestures(&mut self) {
        trace!(count = self.detectors.len(), "all gestures unregistered");
        self.detectors.clear();
        self.owner = None;
    }

    /// Subscribe a listener to every detector's notifications.
    pub fn add_listener<L: GestureListener + 'static>(&mut self, listener: L) -> ListenerId {
        let id = ListenerId(self.bump());
        trace!(?id, "listener added");
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unsubscribe a listener, handing it back.
    pub fn remove_listener(&mut self, id: ListenerId) -> Option<Box<dyn GestureListener>> {
        let index = self.listeners.iter().position(|(l, _)| *l == id)?;
        trace!(?id, "listener removed");
        Some(self.listeners.remove(index).1)
    }

    /// Begin processing frames.
    pub fn start(&mut self) {
        if !self.running {
            debug!("gesture arbiter started");
        }
        self.running = true;
    }

    /// Stop processing frames, resetting every detector and releasing ownership.
    pub fn stop(&mut self) {
        if self.running {
            debug!("gesture arbiter stopped");
        }
        self.running = false;
        self.owner = None;
        for (_, detector) in &mut self.detectors {
            detector.reset();
        }
    }

    /// Whether frames are being processed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop, then drop every detector and listener.
    pub fn dispose(&mut self) {
        self.stop();
        self.unregister_all_gestures();
        self.listeners.clear();
    }

    /// The detector currently owning the frame.
    pub fn owner(&self) -> Option<DetectorId> {
        self.owner
    }

    /// Look up a registered detector.
    pub fn detector(&self, id: DetectorId) -> Option<&dyn GestureDetector> {
        self.detectors
            .iter()
            .find(|(d, _)| *d == id)
            .map(|(_, d)| &**d)
    }

    /// Iterate over registered detectors in arbitration order.
    pub fn detectors(&self) -> impl Iterator<Item = (DetectorId, &dyn GestureDetector)> + '_ {
        self.detectors.iter().map(|(id, d)| (*id, &**d))
    }

    /// Number of registered detectors.
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Whether no detector is registered.
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Number of subscribed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn index_of(&self, id: DetectorId) -> Option<usize> {
        self.detectors.iter().position(|(d, _)| *d == id)
    }

    /// Process one frame of hands.
    ///
    /// Ignored while the arbiter is stopped.
    ///
    /// # Panics
    ///
    /// If a detector reports a state not reachable from its previous one.
    pub fn on_frame(&mut self, hands: &[HandSample]) {
        if !self.running {
            trace!(hands = hands.len(), "frame ignored, arbiter stopped");
            return;
        }

        if let Some(owner) = self.owner {
            let index = self.index_of(owner);
            debug_assert!(index.is_some(), "owner {owner:?} is not registered");
            if let Some(index) = index {
                let (state, notification) = self.advance(index, hands);
                if !matches!(state, GestureState::InProgress | GestureState::Completed) {
                    debug!(?owner, %state, "ownership released");
                    self.owner = None;
                }
                self.notify(index, notification);
                return;
            }
        }

        for index in 0..self.detectors.len() {
            let (state, notification) = self.advance(index, hands);
            if state == GestureState::InProgress {
                let id = self.detectors[index].0;
                debug!(?id, name = self.detectors[index].1.name(), "ownership acquired");
                self.owner = Some(id);
                for (other, (_, detector)) in self.detectors.iter_mut().enumerate() {
                    if other != index {
                        trace!(name = detector.name(), "reset by arbitration");
                        detector.reset();
                    }
                }
                self.notify(index, notification);
                break;
            }
            self.notify(index, notification);
        }
    }

    /// Update one detector and validate its transition.
    fn advance(
        &mut self,
        index: usize,
        hands: &[HandSample],
    ) -> (GestureState, Option<Notification>) {
        let detector = &mut *self.detectors[index].1;
        let old = detector.state();
        let new = detector.update(hands);
        if let Err(err) = GestureState::check_transition(detector.name(), old, new) {
            panic!("{err}");
        }
        if old != new {
            debug!(name = detector.name(), %old, %new, "gesture state changed");
        }
        (new, Notification::for_transition(detector.is_live(), old, new))
    }

    /// Deliver a notification for the detector at `index`.
    ///
    /// Runs after ownership has been settled for the frame, so a listener that
    /// panics leaves the arbiter consistent.
    fn notify(&mut self, index: usize, notification: Option<Notification>) {
        let Some(notification) = notification else {
            return;
        };
        let detector = &*self.detectors[index].1;
        let record = GestureRecord {
            name: detector.name().into(),
            state: detector.state(),
            hands: detector.hands().to_vec(),
            data: detector.data().clone(),
            live: detector.is_live(),
        };
        for (_, listener) in &mut self.listeners {
            notification.deliver(&mut **listener, &record);
        }
    }
}
