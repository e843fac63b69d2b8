// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand continuity helpers shared by the concrete detectors.
//!
//! ## Usage
//!
//! A detector holds one tracker value and, on every update:
//! 1) calls `observe` with the frame to get the candidate hand(s) and whether the
//!    touch was just released,
//! 2) computes its own next state from that,
//! 3) calls `commit` with the next state. Committing [`GestureState::NotDetected`]
//!    forgets the tracked hand(s).
//!
//! The last candidate seen is kept across the frame where the hand disappears so a
//! detector completing on that frame can still report where the hand was.

use tracing::trace;

use crate::types::{GestureState, HandId, HandSample};

/// What a [`SingleHandTracker`] saw in one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SingleHandFrame {
    /// The tracked hand, if it could be followed in this frame.
    pub hand: Option<HandSample>,
    /// True when the tracked hand is still present but no longer touching.
    pub touch_released: bool,
}

/// Follows exactly one touching hand across frames.
#[derive(Clone, Debug, Default)]
pub struct SingleHandTracker {
    id: Option<HandId>,
    last: Option<HandSample>,
}

impl SingleHandTracker {
    /// Create a tracker that follows no hand.
    pub const fn new() -> Self {
        Self { id: None, last: None }
    }

    /// Id of the hand being followed.
    pub fn tracked_id(&self) -> Option<HandId> {
        self.id
    }

    /// The most recent sample of the followed hand, if any.
    pub fn last_hand(&self) -> Option<&HandSample> {
        self.last.as_ref()
    }

    /// The followed hand as a slice (empty or one element).
    pub fn hands(&self) -> &[HandSample] {
        self.last.as_slice()
    }

    /// Work out the candidate hand for this frame.
    ///
    /// - One touching hand: start or continue following it. If it is a different
    ///   hand than the one being followed, tracking is dropped; it will be picked up
    ///   again on the next frame.
    /// - No touching hand: if the followed hand is still present, report it with
    ///   `touch_released` set. If it vanished, report nothing.
    /// - Several touching hands: ambiguous, report nothing.
    pub fn observe(&mut self, hands: &[HandSample]) -> SingleHandFrame {
        let mut touching = hands.iter().filter(|h| h.touching);
        let first = touching.next();
        let several = touching.next().is_some();

        let mut frame = SingleHandFrame::default();
        match (first, several) {
            (Some(hand), false) => match self.id {
                None => {
                    self.id = Some(hand.id);
                    frame.hand = Some(*hand);
                }
                Some(id) if id == hand.id => frame.hand = Some(*hand),
                Some(id) => {
                    trace!(tracked = id.0, touching = hand.id.0, "single-hand tracking reset");
                    self.reset();
                }
            },
            (None, _) => {
                if let Some(id) = self.id
                    && let Some(hand) = hands.iter().find(|h| h.id == id)
                {
                    frame.hand = Some(*hand);
                    frame.touch_released = true;
                }
            }
            (Some(_), true) => {}
        }

        if frame.hand.is_some() {
            self.last = frame.hand;
        }
        frame
    }

    /// Record the state the detector settled on for this frame.
    pub fn commit(&mut self, state: GestureState) {
        if state == GestureState::NotDetected {
            self.reset();
        }
    }

    /// Forget the followed hand.
    pub fn reset(&mut self) {
        self.id = None;
        self.last = None;
    }
}

/// What a [`DualHandTracker`] saw in one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DualHandFrame {
    /// The tracked pair, in acquisition order, if both could be followed.
    pub hands: Option<[HandSample; 2]>,
    /// True when the pair is still present but at least one hand stopped touching.
    pub touch_released: bool,
}

/// Follows a pair of touching hands across frames.
#[derive(Clone, Debug, Default)]
pub struct DualHandTracker {
    ids: Option<[HandId; 2]>,
    last: Option<[HandSample; 2]>,
}

impl DualHandTracker {
    /// Create a tracker that follows no hands.
    pub const fn new() -> Self {
        Self {
            ids: None,
            last: None,
        }
    }

    /// Ids of the pair being followed, in acquisition order.
    pub fn tracked_ids(&self) -> Option<[HandId; 2]> {
        self.ids
    }

    /// The followed pair as a slice (empty or two elements).
    pub fn hands(&self) -> &[HandSample] {
        match &self.last {
            Some(pair) => pair.as_slice(),
            None => &[],
        }
    }

    /// Work out the candidate pair for this frame.
    ///
    /// - Exactly two touching hands: acquire them if nothing is followed yet,
    ///   otherwise continue only if they are the followed pair; any other pair drops
    ///   tracking.
    /// - More than two touching hands: drop tracking.
    /// - Fewer than two touching hands: if both followed hands are still present,
    ///   report them with `touch_released` set, otherwise drop tracking.
    pub fn observe(&mut self, hands: &[HandSample]) -> DualHandFrame {
        let mut touching = hands.iter().filter(|h| h.touching).copied();
        let touching = (touching.next(), touching.next(), touching.next());

        let mut frame = DualHandFrame::default();
        match touching {
            (Some(a), Some(b), None) => match self.ids {
                None => {
                    self.ids = Some([a.id, b.id]);
                    frame.hands = Some([a, b]);
                }
                Some(ids) => match find_pair(ids, &[a, b]) {
                    Some(pair) => frame.hands = Some(pair),
                    None => {
                        trace!(?ids, "dual-hand tracking reset: different pair touching");
                        self.reset();
                    }
                },
            },
            (Some(_), Some(_), Some(_)) => {
                if let Some(ids) = self.ids {
                    trace!(?ids, "dual-hand tracking reset: too many hands touching");
                    self.reset();
                }
            }
            _ => {
                if let Some(ids) = self.ids {
                    match find_pair(ids, hands) {
                        Some(pair) => {
                            frame.hands = Some(pair);
                            frame.touch_released = true;
                        }
                        None => {
                            trace!(?ids, "dual-hand tracking reset: hand lost");
                            self.reset();
                        }
                    }
                }
            }
        }

        if frame.hands.is_some() {
            self.last = frame.hands;
        }
        frame
    }

    /// Record the state the detector settled on for this frame.
    pub fn commit(&mut self, state: GestureState) {
        if state == GestureState::NotDetected {
            self.reset();
        }
    }

    /// Forget the followed pair.
    pub fn reset(&mut self) {
        self.ids = None;
        self.last = None;
    }
}

fn find_pair(ids: [HandId; 2], hands: &[HandSample]) -> Option<[HandSample; 2]> {
    let first = hands.iter().find(|h| h.id == ids[0])?;
    let second = hands.iter().find(|h| h.id == ids[1])?;
    Some([*first, *second])
}
