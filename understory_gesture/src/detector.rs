// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The detector contract.
//!
//! Every gesture is a [`GestureDetector`]: a small state machine fed one frame of
//! [`HandSample`]s at a time. Detectors own their tracking state and their auxiliary
//! data bag; only their own [`update`](GestureDetector::update) and
//! [`reset`](GestureDetector::reset) mutate it.
//!
//! Concrete detectors in [`gestures`](crate::gestures) hold a
//! [`SingleHandTracker`](crate::tracking::SingleHandTracker) or
//! [`DualHandTracker`](crate::tracking::DualHandTracker) for hand continuity and
//! implement their own transition logic on top.

use crate::types::{GestureData, GestureState, HandSample};

/// A gesture state machine.
///
/// `update` must return a state reachable from [`state`](Self::state) per
/// [`GestureState::can_transition_to`]; the arbiter treats anything else as a defect.
pub trait GestureDetector: Send {
    /// Name consumers bind to. Expected to be unique among registered detectors.
    fn name(&self) -> &str;

    /// Whether started and in-progress notifications are delivered for this detector.
    fn is_live(&self) -> bool;

    /// State after the most recent update or reset.
    fn state(&self) -> GestureState;

    /// Feed one frame and return the new state.
    fn update(&mut self, hands: &[HandSample]) -> GestureState;

    /// Discard all tracking state and readouts, returning to
    /// [`GestureState::NotDetected`].
    fn reset(&mut self);

    /// Auxiliary readouts published so far.
    fn data(&self) -> &GestureData;

    /// Hands the detector is following, as of the latest frame.
    fn hands(&self) -> &[HandSample];
}
