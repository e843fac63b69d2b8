// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap: touch the virtual screen with one hand and lift it again.

use alloc::string::String;

use kurbo::Point;

use crate::detector::GestureDetector;
use crate::tracking::{SingleHandFrame, SingleHandTracker};
use crate::types::{DataKey, DataValue, GestureData, GestureState, HandSample};

/// Single-hand tap (click) detector.
///
/// A tap is never live: listeners only hear about it once it has completed.
///
/// | state | input | next |
/// |---|---|---|
/// | `NotDetected` | a hand starts touching | `PossibleDetection` |
/// | `PossibleDetection` | hand still touching | `PossibleDetection` |
/// | `PossibleDetection` | touch released | `InProgress` |
/// | `PossibleDetection` | hand lost | `NotDetected` |
/// | `InProgress` | anything | `Completed` |
/// | `Completed` | anything | `NotDetected` |
///
/// On entering `InProgress` the position of the initial touch is published as
/// [`DataKey::InitialPosition`].
#[derive(Clone, Debug)]
pub struct TapGesture {
    name: String,
    state: GestureState,
    tracker: SingleHandTracker,
    initial_position: Option<Point>,
    data: GestureData,
}

impl TapGesture {
    /// Create a tap detector called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: GestureState::NotDetected,
            tracker: SingleHandTracker::new(),
            initial_position: None,
            data: GestureData::new(),
        }
    }

    /// Where the tracked hand first touched, if a tap is underway.
    pub fn initial_position(&self) -> Option<Point> {
        self.initial_position
    }

    fn step(&mut self, frame: SingleHandFrame) -> GestureState {
        match self.state {
            GestureState::NotDetected => match frame.hand {
                Some(hand) => {
                    self.initial_position = Some(hand.position);
                    GestureState::PossibleDetection
                }
                None => GestureState::NotDetected,
            },
            GestureState::PossibleDetection => match frame.hand {
                Some(hand) if hand.touching => GestureState::PossibleDetection,
                _ if frame.touch_released => {
                    if let Some(p) = self.initial_position {
                        self.data.insert(DataKey::InitialPosition, DataValue::Point(p));
                    }
                    GestureState::InProgress
                }
                _ => GestureState::NotDetected,
            },
            GestureState::InProgress => GestureState::Completed,
            GestureState::Completed => GestureState::NotDetected,
        }
    }

    fn clear(&mut self) {
        self.initial_position = None;
        self.data.remove(DataKey::InitialPosition);
    }
}

impl Default for TapGesture {
    fn default() -> Self {
        Self::new("tap")
    }
}

impl GestureDetector for TapGesture {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_live(&self) -> bool {
        false
    }

    fn state(&self) -> GestureState {
        self.state
    }

    fn update(&mut self, hands: &[HandSample]) -> GestureState {
        let frame = self.tracker.observe(hands);
        let next = self.step(frame);
        self.tracker.commit(next);
        if next == GestureState::NotDetected {
            self.clear();
        }
        self.state = next;
        next
    }

    fn reset(&mut self) {
        self.tracker.reset();
        self.clear();
        self.state = GestureState::NotDetected;
    }

    fn data(&self) -> &GestureData {
        &self.data
    }

    fn hands(&self) -> &[HandSample] {
        self.tracker.hands()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HandId;

    fn hand(id: u32, x: f64, y: f64, touching: bool) -> HandSample {
        HandSample::new(HandId(id), Point::new(x, y), touching)
    }

    #[test]
    fn touch_and_release_is_a_tap() {
        let mut tap = TapGesture::default();
        assert_eq!(tap.update(&[hand(1, 10.0, 20.0, true)]), GestureState::PossibleDetection);
        assert_eq!(tap.update(&[hand(1, 11.0, 20.0, true)]), GestureState::PossibleDetection);
        assert_eq!(tap.update(&[hand(1, 12.0, 21.0, false)]), GestureState::InProgress);
        assert_eq!(
            tap.data().point(DataKey::InitialPosition),
            Some(Point::new(10.0, 20.0))
        );
        assert_eq!(tap.update(&[]), GestureState::Completed);
        // The last known hand is still reported on the completing frame.
        assert_eq!(tap.hands().len(), 1);
        assert_eq!(tap.hands()[0].position, Point::new(12.0, 21.0));
        assert_eq!(tap.update(&[]), GestureState::NotDetected);
        assert!(tap.data().is_empty());
        assert!(tap.hands().is_empty());
    }

    #[test]
    fn losing_the_hand_is_not_a_tap() {
        let mut tap = TapGesture::default();
        tap.update(&[hand(1, 0.0, 0.0, true)]);
        assert_eq!(tap.update(&[]), GestureState::NotDetected);
        assert_eq!(tap.initial_position(), None);
    }

    #[test]
    fn second_hand_touching_aborts() {
        let mut tap = TapGesture::default();
        tap.update(&[hand(1, 0.0, 0.0, true)]);
        assert_eq!(
            tap.update(&[hand(1, 0.0, 0.0, true), hand(2, 5.0, 5.0, true)]),
            GestureState::NotDetected
        );
    }

    #[test]
    fn reset_is_idempotent() {
        let mut tap = TapGesture::default();
        tap.update(&[hand(1, 0.0, 0.0, true)]);
        tap.update(&[hand(1, 0.0, 0.0, false)]);
        assert!(!tap.data().is_empty());
        tap.reset();
        assert_eq!(tap.state(), GestureState::NotDetected);
        assert!(tap.data().is_empty());
        tap.reset();
        assert_eq!(tap.state(), GestureState::NotDetected);
        assert!(tap.data().is_empty());
        assert!(tap.hands().is_empty());
    }
}
